//! Exam catalog endpoints — GET /api/exams, POST /api/exams.
//!
//! GET returns every exam recorded for a course, matched by code
//! (case-insensitive) and possibly served from the query cache. A course
//! with no exams yields `[]` with success status. POST is the
//! administrative insert path.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;
use crate::http::catalog_error;
use proctor_catalog::Exam;

#[derive(Deserialize)]
pub struct ExamsParams {
    #[serde(rename = "courseCode")]
    course_code: Option<String>,
}

/// Wire shape for one exam record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: i64,
    pub course_code: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<Exam> for ExamRecord {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id,
            course_code: exam.course_code,
            start_time: exam.start_time,
            end_time: exam.end_time,
        }
    }
}

/// GET /api/exams — list all exams for a course.
pub async fn list_exams_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExamsParams>,
) -> Result<Json<Vec<ExamRecord>>, (StatusCode, Json<Value>)> {
    let Some(course_code) = params.course_code else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing required query parameter: courseCode"})),
        ));
    };

    let exams = state
        .catalog
        .exams_by_course(&course_code)
        .map_err(|e| catalog_error("GET /api/exams", e))?;

    Ok(Json(exams.into_iter().map(ExamRecord::from).collect()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    pub course_code: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// POST /api/exams — record a scheduled exam for an existing course.
///
/// 404 when the course does not exist, 400 when the window is inverted.
pub async fn create_exam_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<ExamRecord>), (StatusCode, Json<Value>)> {
    let exam = state
        .catalog
        .insert_exam(&req.course_code, req.start_time, req.end_time)
        .map_err(|e| catalog_error("POST /api/exams", e))?;

    Ok((StatusCode::CREATED, Json(exam.into())))
}
