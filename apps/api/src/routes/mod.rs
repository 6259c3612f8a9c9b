pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

/// Resume uploads can be a few MB; the axum default (2 MB) is too tight.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(handlers::handle_list_jobs).post(handlers::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(handlers::handle_get_job).put(handlers::handle_update_job),
        )
        // Applications (submit + lifecycle)
        .route(
            "/api/v1/applications",
            get(handlers::handle_recent_applications).post(handlers::handle_submit),
        )
        .route("/api/v1/applications/:id", get(handlers::handle_get_application))
        .route(
            "/api/v1/applications/:id/status",
            patch(handlers::handle_transition_status),
        )
        // Candidates
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route("/api/v1/candidates/:id", get(handlers::handle_get_candidate))
        // Interviews
        .route(
            "/api/v1/interviews",
            get(handlers::handle_list_interviews).post(handlers::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            patch(handlers::handle_update_interview),
        )
        // Aggregate views
        .route("/api/v1/pipeline", get(handlers::handle_pipeline))
        .route("/api/v1/stats", get(handlers::handle_stats))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
