//! Candidate Assembler: extracted resume + ranking → stored `Candidate`.

use chrono::Utc;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::resume::ResumeData;
use crate::screening::ranking::{candidate_years, summarize_years, RankingResult, RankingSubject};
use crate::store::ProfileStore;

/// Builds the candidate record and stores it under `job_id`.
/// Unknown job → `NotFound`, nothing stored.
pub async fn assemble_candidate(
    store: &ProfileStore,
    job_id: u64,
    resume: &ResumeData,
    ranking: &RankingResult,
) -> Result<Candidate, AppError> {
    store.create_candidate(build_candidate(job_id, resume, ranking)).await
}

fn build_candidate(job_id: u64, resume: &ResumeData, ranking: &RankingResult) -> NewCandidate {
    let years = candidate_years(&RankingSubject::from(resume), Utc::now().date_naive());

    let education = resume
        .education
        .iter()
        .map(|e| e.degree.trim())
        .find(|degree| !degree.is_empty())
        .unwrap_or("N/A")
        .to_string();

    NewCandidate {
        job_id,
        name: resume.name.clone(),
        location: resume.location.clone(),
        experience: summarize_years(years),
        education,
        match_score: ranking.match_score,
        skills: resume.skills.clone(),
        category: ranking.ranking,
        summary: resume.summary.clone(),
    }
}
