use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::screening::ranking::Ranking;

/// A screened applicant, linked to exactly one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u64,
    pub job_id: u64,
    pub name: String,
    pub location: String,
    /// Summarized, e.g. "5 years".
    pub experience: String,
    /// First listed degree, or "N/A".
    pub education: String,
    pub match_score: u32,
    pub skills: Vec<String>,
    pub category: Ranking,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Everything the store needs to persist a candidate; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub job_id: u64,
    pub name: String,
    pub location: String,
    pub experience: String,
    pub education: String,
    pub match_score: u32,
    pub skills: Vec<String>,
    pub category: Ranking,
    pub summary: String,
}
