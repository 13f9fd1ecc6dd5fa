//! Course admin endpoint — POST /api/courses.
//!
//! Request:  `{"code": "CMSC 23200", "title": "Introduction to Computer Security"}`
//! Response: `201` + the stored course, `409` on duplicate code.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::app::AppState;
use crate::http::catalog_error;
use proctor_catalog::Course;

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
}

/// POST /api/courses — administrative insert of a new course.
pub async fn create_course_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), (StatusCode, Json<Value>)> {
    let course = state
        .catalog
        .insert_course(&req.code, &req.title)
        .map_err(|e| catalog_error("POST /api/courses", e))?;

    Ok((StatusCode::CREATED, Json(course)))
}
