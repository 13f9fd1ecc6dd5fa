use axum::{
    routing::{get, post},
    Router,
};
use proctor_catalog::CatalogStore;
use proctor_core::ProctorConfig;
use proctor_lookup::ScheduleTable;
use std::sync::Arc;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
///
/// The schedule table is immutable after startup; the catalog store does
/// its own locking. Nothing here needs a lock at this level.
pub struct AppState {
    pub config: ProctorConfig,
    pub schedule: ScheduleTable,
    pub catalog: CatalogStore,
}

impl AppState {
    pub fn new(config: ProctorConfig, schedule: ScheduleTable, catalog: CatalogStore) -> Self {
        Self {
            config,
            schedule,
            catalog,
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route(
            "/api/exam-time",
            get(crate::http::exam_time::exam_time_handler),
        )
        .route(
            "/api/exams",
            get(crate::http::exams::list_exams_handler)
                .post(crate::http::exams::create_exam_handler),
        )
        .route(
            "/api/courses",
            post(crate::http::courses::create_course_handler),
        )
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
}
