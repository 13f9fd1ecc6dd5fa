//! Schedule lookup endpoint — GET /api/exam-time?classTime=<string>
//!
//! Resolves a class meeting time ("8:30 MWF") or course code ("CMSC 23200")
//! against the static lookup table.
//!
//! Response: `{"examTime": "WED 10:00 AM–12:00 PM"}` or `{"examTime": null}`.
//! An unknown key is a success with a null examTime; only a missing
//! classTime parameter is a client error.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

#[derive(Deserialize)]
pub struct ExamTimeParams {
    #[serde(rename = "classTime")]
    class_time: Option<String>,
}

#[derive(Serialize)]
pub struct ExamTimeReply {
    #[serde(rename = "examTime")]
    pub exam_time: Option<String>,
}

/// GET /api/exam-time — look up the exam window for a class time.
pub async fn exam_time_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExamTimeParams>,
) -> Result<Json<ExamTimeReply>, (StatusCode, Json<Value>)> {
    let Some(class_time) = params.class_time else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "missing required query parameter: classTime"})),
        ));
    };

    let exam_time = state.schedule.resolve(&class_time).map(str::to_string);
    Ok(Json(ExamTimeReply { exam_time }))
}
