//! Resume Extractor: free-text resume → `ResumeData`.
//!
//! Two interchangeable backends behind `ResumeExtractor`:
//! - `LlmResumeExtractor`: AI call + fail-fast JSON decode
//! - `PlaceholderResumeExtractor`: fabricated record for environments without AI access
//!
//! `AppState` holds an `Arc<dyn ResumeExtractor>`, chosen at startup from config.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{complete_json, CompletionBackend};
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeData};
use crate::screening::prompts::{RESUME_PARSE_PERSONA, RESUME_PARSE_PROMPT_TEMPLATE};
use crate::screening::ranking::extract_years;

#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<ResumeData, AppError>;

    /// "llm" | "placeholder", for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmResumeExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmResumeExtractor {
    llm: Arc<dyn CompletionBackend>,
}

impl LlmResumeExtractor {
    pub fn new(llm: Arc<dyn CompletionBackend>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeExtractor for LlmResumeExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ResumeData, AppError> {
        let prompt = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let system = json_system(RESUME_PARSE_PERSONA);

        let resume: ResumeData = complete_json(self.llm.as_ref(), &prompt, &system)
            .await
            .map_err(|e| AppError::from_llm("Resume extraction failed", e))?;

        let resume = resume.normalized();
        info!(
            "Extracted resume for '{}' with {} skills",
            resume.name,
            resume.skills.len()
        );
        Ok(resume)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PlaceholderResumeExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Skills the placeholder recognises in resume text.
const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "TypeScript",
    "FastAPI",
    "Next.js",
    "Node.js",
    "Java",
    "Go",
    "Rust",
    "C++",
    "SQL",
    "PostgreSQL",
    "MongoDB",
    "Docker",
    "Kubernetes",
    "AWS",
    "GraphQL",
    "Redux",
    "Testing",
];

/// Drawn from when the text mentions none of the vocabulary.
const FALLBACK_SKILLS: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "TypeScript",
    "FastAPI",
    "Next.js",
];

/// Fabricates a structurally valid record. Not deterministic.
pub struct PlaceholderResumeExtractor;

#[async_trait]
impl ResumeExtractor for PlaceholderResumeExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ResumeData, AppError> {
        Ok(fabricate_resume(resume_text).normalized())
    }

    fn backend(&self) -> &'static str {
        "placeholder"
    }
}

fn fabricate_resume(text: &str) -> ResumeData {
    static EMAIL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").unwrap());
    static PHONE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\+?\d[\d\s().-]{7,}\d").unwrap());

    let name = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .filter(|line| line.len() <= 60 && !line.contains('@'))
        .unwrap_or("John Doe")
        .to_string();

    let email = EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "john.doe@example.com".to_string());

    let phone = PHONE_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| "555-123-4567".to_string());

    let lower = text.to_lowercase();
    let mut skills: Vec<String> = SKILL_VOCABULARY
        .iter()
        .filter(|skill| mentions(&lower, &skill.to_lowercase()))
        .map(|s| s.to_string())
        .collect();
    if skills.is_empty() {
        let mut rng = rand::rng();
        let mut pool = FALLBACK_SKILLS.to_vec();
        pool.shuffle(&mut rng);
        let take = rng.random_range(3..=pool.len());
        skills = pool.into_iter().take(take).map(String::from).collect();
    }

    let years = extract_years(text).map(|y| y.floor() as i32).unwrap_or(5);
    let start_year = Utc::now().year() - years;

    ResumeData {
        name,
        email,
        phone,
        location: "New York, USA".to_string(),
        skills,
        experience: vec![ExperienceEntry {
            title: "Senior Developer".to_string(),
            company: "Tech Company".to_string(),
            start_date: format!("{start_year}-01"),
            end_date: "Present".to_string(),
            description: "Led development of web applications using modern technologies."
                .to_string(),
        }],
        education: vec![EducationEntry {
            institution: "University of Technology".to_string(),
            degree: "B.S. Computer Science".to_string(),
            start_date: format!("{}-09", start_year - 4),
            end_date: format!("{}-05", start_year),
        }],
        summary: "Experienced developer with skills in web development and software engineering."
            .to_string(),
    }
}

/// Whole-term containment: `java` does not match inside `javascript`.
fn mentions(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    struct CannedBackend(&'static str);

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Err(LlmError::Timeout(std::time::Duration::from_secs(1)))
        }
    }

    const RESUME: &str = "Jane Smith\njane.smith@mail.com | +1 (415) 555-0100\n\
        Backend engineer, 7 years of experience with Rust, Go and PostgreSQL.\n\
        Also wrote some JavaScript.";

    #[tokio::test]
    async fn test_llm_extractor_decodes_and_normalizes() {
        let extractor = LlmResumeExtractor::new(Arc::new(CannedBackend(
            r#"```json
            {"name": "Jane Smith", "skills": ["Rust", "rust", {"skill": "Go", "level": "Advanced"}]}
            ```"#,
        )));
        let resume = extractor.extract(RESUME).await.unwrap();
        assert_eq!(resume.name, "Jane Smith");
        assert_eq!(resume.skills, vec!["Rust", "Go"]);
        assert!(resume.experience.is_empty());
    }

    #[tokio::test]
    async fn test_llm_extractor_tolerates_null_fields() {
        let extractor = LlmResumeExtractor::new(Arc::new(CannedBackend(
            r#"{"name":"Ada","phone":null,"skills":["Rust"],"experience":[{"title":"Eng","startDate":"2020-01","endDate":null}]}"#,
        )));
        let resume = extractor.extract(RESUME).await.unwrap();
        assert_eq!(resume.name, "Ada");
        assert!(resume.phone.is_empty());
        assert_eq!(resume.experience[0].title, "Eng");
        assert!(resume.experience[0].end_date.is_empty());
    }

    #[tokio::test]
    async fn test_llm_extractor_non_json_is_parse_error_with_raw() {
        let raw = "Sorry, I can't help with that.";
        let extractor = LlmResumeExtractor::new(Arc::new(CannedBackend(raw)));
        match extractor.extract(RESUME).await {
            Err(AppError::Parse { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_llm_extractor_upstream_failure() {
        let extractor = LlmResumeExtractor::new(Arc::new(FailingBackend));
        let err = extractor.extract(RESUME).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_placeholder_reads_obvious_fields() {
        let resume = PlaceholderResumeExtractor.extract(RESUME).await.unwrap();
        assert_eq!(resume.name, "Jane Smith");
        assert_eq!(resume.email, "jane.smith@mail.com");
        assert_eq!(resume.phone, "+1 (415) 555-0100");
        assert_eq!(resume.skills, vec!["JavaScript", "Go", "Rust", "PostgreSQL"]);
        assert_eq!(
            resume.experience[0].start_date,
            format!("{}-01", Utc::now().year() - 7)
        );
    }

    #[tokio::test]
    async fn test_placeholder_falls_back_to_random_skills() {
        let resume = PlaceholderResumeExtractor
            .extract("A person with no recognisable skills")
            .await
            .unwrap();
        assert!((3..=FALLBACK_SKILLS.len()).contains(&resume.skills.len()));
        assert!(resume
            .skills
            .iter()
            .all(|s| FALLBACK_SKILLS.contains(&s.as_str())));
        assert_eq!(resume.education.len(), 1);
    }

    #[test]
    fn test_mentions_respects_word_boundaries() {
        assert!(mentions("java and javascript", "java"));
        assert!(!mentions("javascript only", "java"));
        assert!(mentions("c++, rust", "c++"));
        assert!(mentions("built with next.js.", "next.js"));
        assert!(!mentions("golang", "go"));
    }
}
