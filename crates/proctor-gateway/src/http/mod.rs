pub mod courses;
pub mod exam_time;
pub mod exams;
pub mod health;

use axum::http::StatusCode;
use axum::Json;
use proctor_catalog::CatalogError;
use serde_json::{json, Value};
use tracing::warn;

/// Map a catalog error to an HTTP response.
///
/// Validation problems and unknown/duplicate courses keep their message;
/// storage failures are logged here and collapsed into a generic 500 body.
pub(crate) fn catalog_error(context: &str, err: CatalogError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        CatalogError::InvalidCourseCode { .. } | CatalogError::InvalidExamWindow { .. } => {
            StatusCode::BAD_REQUEST
        }
        CatalogError::CourseNotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::CourseExists { .. } => StatusCode::CONFLICT,
        CatalogError::Database(_) => {
            warn!(context, error = %err, "catalog query failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "storage unavailable"})),
            );
        }
    };
    (status, Json(json!({"error": err.to_string()})))
}
