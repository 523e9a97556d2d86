//! Standard Profile Generator: job title → `StandardProfile`.
//!
//! Same two-backend pattern as the resume extractor. The LLM backend caches
//! profiles per position, so repeated screenings for one job rank against
//! the same expectations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::profile::StandardProfile;
use crate::screening::prompts::{PROFILE_PERSONA, PROFILE_PROMPT_TEMPLATE};

#[async_trait]
pub trait StandardProfileGenerator: Send + Sync {
    async fn generate(&self, position: &str) -> Result<StandardProfile, AppError>;

    /// "llm" | "placeholder", for logs.
    fn backend(&self) -> &'static str;
}

/// Cache key: case- and whitespace-insensitive.
fn cache_key(position: &str) -> String {
    position
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// LlmProfileGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmProfileGenerator {
    llm: Arc<dyn CompletionBackend>,
    cache: RwLock<HashMap<String, StandardProfile>>,
}

impl LlmProfileGenerator {
    pub fn new(llm: Arc<dyn CompletionBackend>) -> Self {
        Self {
            llm,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl StandardProfileGenerator for LlmProfileGenerator {
    async fn generate(&self, position: &str) -> Result<StandardProfile, AppError> {
        let key = cache_key(position);
        if let Some(profile) = self.cache.read().await.get(&key) {
            debug!("Standard profile cache hit for '{key}'");
            return Ok(profile.clone());
        }

        let prompt = PROFILE_PROMPT_TEMPLATE.replace("{position}", position.trim());
        let system = json_system(PROFILE_PERSONA);

        let profile: StandardProfile = complete_json(self.llm.as_ref(), &prompt, &system)
            .await
            .map_err(|e| AppError::from_llm("Standard profile generation failed", e))?;
        let profile = profile.normalized(position);

        info!(
            "Generated standard profile for '{}': {} required, {} preferred skills",
            profile.position,
            profile.required_skills.len(),
            profile.preferred_skills.len()
        );

        // A concurrent request may have filled the slot first; keep that one.
        let mut cache = self.cache.write().await;
        Ok(cache.entry(key).or_insert(profile).clone())
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PlaceholderProfileGenerator
// ────────────────────────────────────────────────────────────────────────────

/// Returns the same web-developer profile for every position.
pub struct PlaceholderProfileGenerator;

#[async_trait]
impl StandardProfileGenerator for PlaceholderProfileGenerator {
    async fn generate(&self, position: &str) -> Result<StandardProfile, AppError> {
        Ok(StandardProfile {
            position: position.trim().to_string(),
            required_skills: vec![
                "JavaScript".to_string(),
                "React".to_string(),
                "TypeScript".to_string(),
            ],
            preferred_skills: vec![
                "Next.js".to_string(),
                "Redux".to_string(),
                "GraphQL".to_string(),
                "Testing".to_string(),
            ],
            minimum_experience: 3,
            education_level: "Bachelor's Degree".to_string(),
            responsibilities: vec![
                "Develop and maintain web applications".to_string(),
                "Collaborate with designers and backend developers".to_string(),
                "Optimize applications for performance".to_string(),
            ],
        })
    }

    fn backend(&self) -> &'static str {
        "placeholder"
    }
}
