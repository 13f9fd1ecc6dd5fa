use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("course not found: {code}")]
    CourseNotFound { code: String },

    #[error("course already exists: {code}")]
    CourseExists { code: String },

    #[error("invalid course code: {reason}")]
    InvalidCourseCode { reason: String },

    #[error("invalid exam window: start {start} is not before end {end}")]
    InvalidExamWindow { start: String, end: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
