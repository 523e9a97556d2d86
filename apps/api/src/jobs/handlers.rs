//! Axum route handlers for job positions and candidates.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::{JobPosition, NewJobPosition};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    #[serde(alias = "jobId")]
    pub job_id: Option<u64>,
}

/// GET /api/job-positions
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Json<Vec<JobPosition>> {
    Json(state.store.list_jobs().await)
}

/// GET /api/job-positions/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<JobPosition>, AppError> {
    let Path(id) = path?;
    state
        .store
        .get_job(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job position {id} not found")))
}

/// POST /api/job-positions
///
/// Recruiters only.
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<NewJobPosition>, JsonRejection>,
) -> Result<(StatusCode, Json<JobPosition>), AppError> {
    user.require_recruiter()?;
    let Json(request) = payload?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }

    let job = state.store.create_job(request).await;
    tracing::info!("{} created job position {}", user.username, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/candidates?job_id=
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    _user: AuthUser,
    query: Result<Query<CandidateQuery>, QueryRejection>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.store.list_candidates(query.job_id).await))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Candidate>, AppError> {
    let Path(id) = path?;
    state
        .store
        .get_candidate(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}
