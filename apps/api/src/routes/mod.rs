pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::screening::handlers as screening;
use crate::state::AppState;

/// Resume files above this size are rejected before extraction.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs & candidates
        .route(
            "/api/job-positions",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/job-positions/:id", get(jobs::handle_get_job))
        .route("/api/candidates", get(jobs::handle_list_candidates))
        .route("/api/candidates/:id", get(jobs::handle_get_candidate))
        // Screening
        .route("/api/parse-resume", post(screening::handle_parse_resume))
        .route(
            "/api/generate-standard-profile",
            post(screening::handle_generate_standard_profile),
        )
        .route("/api/rank-resume", post(screening::handle_rank_resume))
        .route("/api/upload-resume", post(screening::handle_upload_resume))
        .route(
            "/api/upload-resume-file",
            post(screening::handle_upload_resume_file)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}
