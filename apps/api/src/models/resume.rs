use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Structured candidate data extracted from a free-text resume.
///
/// Every field defaults to empty so that any JSON object decodes; shape
/// problems are the extractor's concern, not the ranking engine's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "deserialize_skill_names")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
}

impl ResumeData {
    /// Trims skills and drops case-insensitive duplicates, keeping the first spelling.
    pub fn normalized(mut self) -> Self {
        self.skills = dedup_case_insensitive(self.skills);
        self
    }
}

/// Removes blank entries and case-insensitive duplicates, preserving order.
pub fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

/// Treats an explicit `null` like a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A skill as emitted by an AI backend: either a bare name or `{"skill": .., "level": ..}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SkillName {
    Plain(String),
    Rated {
        #[serde(alias = "name")]
        skill: String,
    },
}

/// Accepts a list of skill names or rated skill objects.
pub fn deserialize_skill_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let skills = Option::<Vec<SkillName>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(skills
        .into_iter()
        .map(|s| match s {
            SkillName::Plain(name) => name,
            SkillName::Rated { skill } => skill,
        })
        .collect())
}
