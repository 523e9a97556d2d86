//! Tolerant decoding at the ranking boundary.
//!
//! Loosely-shaped JSON (whatever a client or an older AI prompt produced) is
//! folded into the strict `RankingSubject` / `RankingCriteria` records. Missing
//! or wrong-typed values become empty/neutral; nothing here fails.

use serde_json::Value;

use crate::models::profile::StandardProfile;
use crate::models::resume::ResumeData;
use crate::screening::ranking::{DatedRole, RankingCriteria, RankingSubject};

impl RankingSubject {
    pub fn from_value(value: &Value) -> Self {
        let mut skills = string_list(value.get("skills"));
        skills.extend(string_list(value.get("softSkills")));

        let mut roles = Vec::new();
        let mut text = Vec::new();
        let mut stated_years = None;

        match value.get("experience") {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    roles.push(DatedRole {
                        start_date: str_field(entry, "startDate").unwrap_or_default().to_string(),
                        end_date: str_field(entry, "endDate").unwrap_or_default().to_string(),
                    });
                    for key in ["title", "description"] {
                        if let Some(s) = str_field(entry, key) {
                            text.push(s.to_string());
                        }
                    }
                }
            }
            Some(Value::String(s)) => text.push(s.clone()),
            Some(v) => stated_years = number(v),
            None => {}
        }
        if let Some(summary) = str_field(value, "summary") {
            text.push(summary.to_string());
        }

        let mut degrees = Vec::new();
        match value.get("education") {
            Some(Value::Array(entries)) => {
                degrees.extend(entries.iter().filter_map(|e| match e {
                    Value::String(s) => Some(s.clone()),
                    other => str_field(other, "degree").map(String::from),
                }));
            }
            Some(Value::String(s)) => degrees.push(s.clone()),
            _ => {}
        }
        if let Some(q) = str_field(value, "qualifications") {
            degrees.push(q.to_string());
        }

        RankingSubject {
            skills,
            roles,
            stated_years,
            experience_text: text.join("\n"),
            degrees,
        }
    }
}

impl RankingCriteria {
    pub fn from_value(value: &Value) -> Self {
        let (experience_text, experience_number) = match value.get("requiredExperience") {
            Some(Value::String(s)) => (Some(s.clone()), None),
            Some(v) => (None, number(v)),
            None => (None, None),
        };

        let minimum_years = value
            .get("minimumExperience")
            .and_then(number)
            .or(experience_number)
            .or_else(|| value.get("experience").and_then(number));

        let education_level = ["educationLevel", "requiredQualifications", "education"]
            .iter()
            .find_map(|key| str_field(value, key))
            .filter(|s| !s.trim().is_empty())
            .map(String::from);

        RankingCriteria {
            required_skills: string_list(value.get("requiredSkills")),
            preferred_skills: string_list(value.get("preferredSkills")),
            minimum_years,
            experience_text,
            education_level,
        }
    }
}

impl From<&ResumeData> for RankingSubject {
    fn from(resume: &ResumeData) -> Self {
        let mut text: Vec<&str> = resume
            .experience
            .iter()
            .flat_map(|e| [e.title.as_str(), e.description.as_str()])
            .collect();
        text.push(&resume.summary);

        RankingSubject {
            skills: resume.skills.clone(),
            roles: resume
                .experience
                .iter()
                .map(|e| DatedRole {
                    start_date: e.start_date.clone(),
                    end_date: e.end_date.clone(),
                })
                .collect(),
            stated_years: None,
            experience_text: text.join("\n"),
            degrees: resume.education.iter().map(|e| e.degree.clone()).collect(),
        }
    }
}

impl From<&StandardProfile> for RankingCriteria {
    fn from(profile: &StandardProfile) -> Self {
        RankingCriteria {
            required_skills: profile.required_skills.clone(),
            preferred_skills: profile.preferred_skills.clone(),
            minimum_years: (profile.minimum_experience > 0)
                .then_some(profile.minimum_experience as f64),
            experience_text: None,
            education_level: Some(profile.education_level.clone())
                .filter(|s| !s.trim().is_empty()),
        }
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str())
}

/// A number, or a string holding one (`"3"`, `"3+"`, `"3 years"`).
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Skill-like lists: `["a", "b"]`, `[{"skill": "a"}]`, `[{"name": "a"}]` or `"a, b"`.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(_) => str_field(item, "skill")
                    .or_else(|| str_field(item, "name"))
                    .map(String::from),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
