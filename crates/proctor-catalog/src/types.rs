use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An academic course. The surrogate id is assigned by SQLite and never
/// changes; `code` is unique (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub title: String,
}

/// A scheduled exam sitting for one course. Many exams may reference the
/// same course (midterm plus final, or multiple sections).
///
/// `course_code` is denormalized from the join so callers never need a
/// second lookup; `start_time < end_time` is enforced on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
