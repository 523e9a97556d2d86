use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "Active".to_string()
}

/// A job opening. `id` and `candidates` are owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosition {
    pub id: u64,
    pub title: String,
    pub department: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub deadline: String,
    pub status: String,
    pub candidates: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields for a new job.
/// Any `id` or `candidates` keys in the request body are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobPosition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub deadline: String,
    #[serde(default = "default_status")]
    pub status: String,
}
