//! In-memory Profile Store for job positions and candidates.
//!
//! Constructed once at startup and shared through `AppState`. A single lock
//! guards both maps and both id counters, so id assignment, the foreign-key
//! check and the candidate-list append happen atomically.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::job::{JobPosition, NewJobPosition};

#[derive(Default)]
struct StoreInner {
    jobs: BTreeMap<u64, JobPosition>,
    candidates: BTreeMap<u64, Candidate>,
    last_job_id: u64,
    last_candidate_id: u64,
}

/// Ids start at 1, increase monotonically and are never reused.
#[derive(Default)]
pub struct ProfileStore {
    inner: RwLock<StoreInner>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_job(&self, new_job: NewJobPosition) -> JobPosition {
        let mut inner = self.inner.write().await;
        inner.last_job_id += 1;

        let job = JobPosition {
            id: inner.last_job_id,
            title: new_job.title,
            department: new_job.department,
            location: new_job.location,
            description: new_job.description,
            requirements: new_job.requirements,
            skills: new_job.skills,
            deadline: new_job.deadline,
            status: new_job.status,
            candidates: Vec::new(),
            created_at: Utc::now(),
        };
        inner.jobs.insert(job.id, job.clone());

        info!("Created job position {} ('{}')", job.id, job.title);
        job
    }

    pub async fn get_job(&self, id: u64) -> Option<JobPosition> {
        self.inner.read().await.jobs.get(&id).cloned()
    }

    /// All jobs in id order.
    pub async fn list_jobs(&self) -> Vec<JobPosition> {
        self.inner.read().await.jobs.values().cloned().collect()
    }

    /// Stores a candidate and appends its id to the owning job.
    /// Fails with `NotFound` (storing nothing) when the job does not exist.
    pub async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, AppError> {
        let mut inner = self.inner.write().await;

        if !inner.jobs.contains_key(&new.job_id) {
            return Err(AppError::NotFound(format!(
                "Job position {} not found",
                new.job_id
            )));
        }

        inner.last_candidate_id += 1;
        let candidate = Candidate {
            id: inner.last_candidate_id,
            job_id: new.job_id,
            name: new.name,
            location: new.location,
            experience: new.experience,
            education: new.education,
            match_score: new.match_score,
            skills: new.skills,
            category: new.category,
            summary: new.summary,
            created_at: Utc::now(),
        };

        inner.candidates.insert(candidate.id, candidate.clone());
        if let Some(job) = inner.jobs.get_mut(&candidate.job_id) {
            job.candidates.push(candidate.id);
        }

        info!(
            "Created candidate {} for job {} ({:?}, score {})",
            candidate.id, candidate.job_id, candidate.category, candidate.match_score
        );
        Ok(candidate)
    }

    pub async fn get_candidate(&self, id: u64) -> Option<Candidate> {
        self.inner.read().await.candidates.get(&id).cloned()
    }

    /// Candidates in id order, optionally restricted to one job.
    pub async fn list_candidates(&self, job_id: Option<u64>) -> Vec<Candidate> {
        self.inner
            .read()
            .await
            .candidates
            .values()
            .filter(|c| job_id.map_or(true, |id| c.job_id == id))
            .cloned()
            .collect()
    }
}
