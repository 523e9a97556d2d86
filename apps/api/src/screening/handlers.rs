//! Axum route handlers for the screening API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::auth::AuthUser;
use crate::document::extract_text;
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::profile::StandardProfile;
use crate::models::resume::{null_as_default, ResumeData};
use crate::screening::assembler::assemble_candidate;
use crate::screening::ranking::{rank, RankingCriteria, RankingResult, RankingSubject};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateProfileRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
}

/// Both halves are loosely shaped; `screening::intake` folds them into strict records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResumeRequest {
    pub resume_data: Option<Value>,
    pub standard_profile: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeRequest {
    pub job_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_text: String,
}

fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

fn require_object(value: Option<Value>, field: &str) -> Result<Value, AppError> {
    match value {
        Some(v @ Value::Object(_)) => Ok(v),
        _ => Err(AppError::Validation(format!("{field} must be a JSON object"))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/parse-resume
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    _user: AuthUser,
    payload: Result<Json<ParseResumeRequest>, JsonRejection>,
) -> Result<Json<ResumeData>, AppError> {
    let Json(request) = payload?;
    let text = require_text(&request.resume_text, "resumeText")?;
    Ok(Json(state.extractor.extract(text).await?))
}

/// POST /api/generate-standard-profile
pub async fn handle_generate_standard_profile(
    State(state): State<AppState>,
    _user: AuthUser,
    payload: Result<Json<GenerateProfileRequest>, JsonRejection>,
) -> Result<Json<StandardProfile>, AppError> {
    let Json(request) = payload?;
    let position = require_text(&request.position, "position")?;
    Ok(Json(state.profiles.generate(position).await?))
}

/// POST /api/rank-resume
///
/// Pure ranking: no AI call, nothing stored.
pub async fn handle_rank_resume(
    _user: AuthUser,
    payload: Result<Json<RankResumeRequest>, JsonRejection>,
) -> Result<Json<RankingResult>, AppError> {
    let Json(request) = payload?;
    let resume = require_object(request.resume_data, "resumeData")?;
    let profile = require_object(request.standard_profile, "standardProfile")?;

    let result = rank(
        &RankingSubject::from_value(&resume),
        &RankingCriteria::from_value(&profile),
    );
    Ok(Json(result))
}

/// POST /api/upload-resume
///
/// Full pipeline: extract → standard profile for the job title → rank → store.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<UploadResumeRequest>, JsonRejection>,
) -> Result<Json<Candidate>, AppError> {
    let Json(request) = payload?;
    let job_id = request
        .job_id
        .ok_or_else(|| AppError::Validation("jobId is required".to_string()))?;
    let text = require_text(&request.resume_text, "resumeText")?;

    info!("{} submitted a resume for job {job_id}", user.username);
    Ok(Json(screen_resume(&state, job_id, text).await?))
}

/// POST /api/upload-resume-file
///
/// Multipart form: `jobId` (text) and `resume` (PDF or plain-text file).
pub async fn handle_upload_resume_file(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Candidate>, AppError> {
    let mut multipart = multipart?;
    let mut job_id: Option<u64> = None;
    let mut upload: Option<(Bytes, Option<String>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("jobId") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid jobId field: {e}")))?;
                job_id = Some(raw.trim().parse().map_err(|_| {
                    AppError::Validation("jobId must be a positive integer".to_string())
                })?);
            }
            Some("resume") => {
                let content_type = field.content_type().map(String::from);
                let file_name = field.file_name().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume file: {e}")))?;
                upload = Some((data, content_type, file_name));
            }
            _ => {}
        }
    }

    let job_id = job_id.ok_or_else(|| AppError::Validation("jobId is required".to_string()))?;
    let (data, content_type, file_name) =
        upload.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    // Fail on an unknown job before paying for extraction.
    if state.store.get_job(job_id).await.is_none() {
        return Err(job_not_found(job_id));
    }

    let text = extract_text(data, content_type.as_deref(), file_name.as_deref()).await?;
    info!(
        "{} uploaded {} for job {job_id}",
        user.username,
        file_name.as_deref().unwrap_or("a resume file")
    );
    Ok(Json(screen_resume(&state, job_id, &text).await?))
}

fn job_not_found(job_id: u64) -> AppError {
    AppError::NotFound(format!("Job position {job_id} not found"))
}

/// Runs the screening pipeline for one resume against one job.
async fn screen_resume(
    state: &AppState,
    job_id: u64,
    resume_text: &str,
) -> Result<Candidate, AppError> {
    let job = state
        .store
        .get_job(job_id)
        .await
        .ok_or_else(|| job_not_found(job_id))?;

    let resume = state.extractor.extract(resume_text).await?;
    let profile = state.profiles.generate(&job.title).await?;
    let ranking = rank(&RankingSubject::from(&resume), &RankingCriteria::from(&profile));

    info!(
        "Ranked '{}' for job {} ('{}'): {:?} ({}), extractor={}, profiles={}",
        resume.name,
        job.id,
        job.title,
        ranking.ranking,
        ranking.match_score,
        state.extractor.backend(),
        state.profiles.backend()
    );

    assemble_candidate(&state.store, job.id, &resume, &ranking).await
}
