use serde::{Deserialize, Deserializer, Serialize};

use crate::models::resume::{dedup_case_insensitive, deserialize_skill_names, null_as_default};

/// The expectation record for a job title: what a standard hire looks like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "deserialize_skill_names")]
    pub required_skills: Vec<String>,
    #[serde(deserialize_with = "deserialize_skill_names")]
    pub preferred_skills: Vec<String>,
    /// Whole years.
    #[serde(deserialize_with = "deserialize_whole_years")]
    pub minimum_experience: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub education_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearsValue {
    Number(f64),
    Text(String),
}

/// Accepts `3`, `3.5`, `"3"`, `"3+ years"` or `null`. Fractions round down;
/// negative or unreadable values become 0.
fn deserialize_whole_years<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let years = match Option::<YearsValue>::deserialize(deserializer)? {
        Some(YearsValue::Number(n)) => n,
        Some(YearsValue::Text(text)) => text
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect::<String>()
            .parse()
            .unwrap_or(0.0),
        None => 0.0,
    };
    Ok(if years.is_finite() && years > 0.0 {
        years.floor() as u32
    } else {
        0
    })
}

impl StandardProfile {
    /// De-duplicates both skill lists case-insensitively and fills in the
    /// requested position when the backend left it blank.
    pub fn normalized(mut self, position: &str) -> Self {
        self.required_skills = dedup_case_insensitive(self.required_skills);
        self.preferred_skills = dedup_case_insensitive(self.preferred_skills);
        if self.position.trim().is_empty() {
            self.position = position.trim().to_string();
        }
        self
    }
}
