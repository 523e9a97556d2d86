//! Ranking Engine: compares a candidate against a standard profile.
//!
//! Pure and deterministic: no I/O, no randomness, inputs are borrowed.
//!
//! Algorithm:
//! 1. skills_match: every required ∪ preferred skill (case-insensitive union,
//!    required first) → whether the resume lists it, ignoring case
//! 2. skill_score = 2 × required hits + 1 × preferred hits
//! 3. experience: +2 bonus when candidate years ≥ minimum years
//!    (text containment when the profile only has free-text experience)
//! 4. match_score = round(100 × points / max_points), 0 when nothing is scorable
//! 5. category from match_score; a fully covered, non-empty required set
//!    never ranks below `good`

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const REQUIRED_SKILL_POINTS: u32 = 2;
pub const PREFERRED_SKILL_POINTS: u32 = 1;
pub const EXPERIENCE_BONUS: u32 = 2;

/// Day counts over 365.25 put calendar-exact spans just under the whole
/// year (2021-01-01 to 2024-01-01 is 2.998); this much shortfall still counts.
const YEAR_SLACK: f64 = 0.01;

/// Canonical ranking categories, ordered worst to best.
///
/// Thresholds on `match_score`: best ≥ 80, better ≥ 60, good ≥ 40, else poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    Poor,
    Good,
    Better,
    Best,
}

impl Ranking {
    pub fn from_match_score(score: u32) -> Self {
        match score {
            80.. => Ranking::Best,
            60..=79 => Ranking::Better,
            40..=59 => Ranking::Good,
            _ => Ranking::Poor,
        }
    }
}

/// Output of the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub ranking: Ranking,
    /// 0 – 100
    pub match_score: u32,
    /// Weighted skill points before normalization.
    pub skill_score: u32,
    /// Profile spelling → present in resume. Required skills first.
    pub skills_match: IndexMap<String, bool>,
    /// 0.0 – 1.0
    pub experience_match: f64,
    /// 0.0 – 1.0
    pub education_match: f64,
}

/// One dated line of work history, as written on the resume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatedRole {
    pub start_date: String,
    pub end_date: String,
}

/// Strict internal view of a resume. Built by `screening::intake`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingSubject {
    pub skills: Vec<String>,
    pub roles: Vec<DatedRole>,
    /// Years stated outright (e.g. a numeric `experience` field).
    pub stated_years: Option<f64>,
    /// Titles, descriptions and summaries, searched for "N years" and containment.
    pub experience_text: String,
    pub degrees: Vec<String>,
}

/// Strict internal view of a standard profile. Built by `screening::intake`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingCriteria {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    /// `None` (or ≤ 0) means no numeric requirement.
    pub minimum_years: Option<f64>,
    /// Free-text requirement such as "5+ years of backend development".
    pub experience_text: Option<String>,
    pub education_level: Option<String>,
}

/// Ranks a subject against criteria as of today.
pub fn rank(subject: &RankingSubject, criteria: &RankingCriteria) -> RankingResult {
    rank_on(subject, criteria, Utc::now().date_naive())
}

/// Ranks with an explicit "today", which open-ended roles run until.
pub fn rank_on(
    subject: &RankingSubject,
    criteria: &RankingCriteria,
    today: NaiveDate,
) -> RankingResult {
    let skills = score_skills(&subject.skills, criteria);
    let experience = evaluate_experience(subject, criteria, today);
    let education_match = evaluate_education(&subject.degrees, criteria.education_level.as_deref());

    let points = skills.score + experience.bonus;
    let max_points = skills.max_score + experience.max_bonus;
    let match_score = if max_points == 0 {
        0
    } else {
        ((points as f64 * 100.0) / max_points as f64).round() as u32
    };

    let mut ranking = Ranking::from_match_score(match_score);
    if skills.required_total > 0 && skills.required_hits == skills.required_total {
        ranking = ranking.max(Ranking::Good);
    }

    RankingResult {
        ranking,
        match_score,
        skill_score: skills.score,
        skills_match: skills.matches,
        experience_match: experience.matched,
        education_match,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

struct SkillOutcome {
    matches: IndexMap<String, bool>,
    score: u32,
    max_score: u32,
    required_hits: usize,
    required_total: usize,
}

fn score_skills(resume_skills: &[String], criteria: &RankingCriteria) -> SkillOutcome {
    let owned: HashSet<String> = resume_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut outcome = SkillOutcome {
        matches: IndexMap::new(),
        score: 0,
        max_score: 0,
        required_hits: 0,
        required_total: 0,
    };
    let mut seen = HashSet::new();

    let weighted = criteria
        .required_skills
        .iter()
        .map(|s| (s, true))
        .chain(criteria.preferred_skills.iter().map(|s| (s, false)));

    for (skill, required) in weighted {
        let name = skill.trim();
        let key = name.to_lowercase();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }

        let points = if required {
            REQUIRED_SKILL_POINTS
        } else {
            PREFERRED_SKILL_POINTS
        };
        let hit = owned.contains(&key);

        outcome.max_score += points;
        if required {
            outcome.required_total += 1;
        }
        if hit {
            outcome.score += points;
            if required {
                outcome.required_hits += 1;
            }
        }
        outcome.matches.insert(name.to_string(), hit);
    }

    outcome
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

struct ExperienceOutcome {
    matched: f64,
    bonus: u32,
    max_bonus: u32,
}

fn evaluate_experience(
    subject: &RankingSubject,
    criteria: &RankingCriteria,
    today: NaiveDate,
) -> ExperienceOutcome {
    let required_text = criteria
        .experience_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let minimum = criteria
        .minimum_years
        .filter(|m| *m > 0.0)
        .or_else(|| required_text.and_then(extract_years).filter(|m| *m > 0.0));

    if let Some(minimum) = minimum {
        let years = candidate_years(subject, today).unwrap_or(0.0);
        let met = years + YEAR_SLACK >= minimum;
        return ExperienceOutcome {
            matched: if met { 1.0 } else { (years / minimum).clamp(0.0, 1.0) },
            bonus: if met { EXPERIENCE_BONUS } else { 0 },
            max_bonus: EXPERIENCE_BONUS,
        };
    }

    match required_text {
        Some(text) => {
            let met = subject
                .experience_text
                .to_lowercase()
                .contains(&text.to_lowercase());
            ExperienceOutcome {
                matched: if met { 1.0 } else { 0.0 },
                bonus: if met { EXPERIENCE_BONUS } else { 0 },
                max_bonus: EXPERIENCE_BONUS,
            }
        }
        None => ExperienceOutcome {
            matched: 0.0,
            bonus: 0,
            max_bonus: 0,
        },
    }
}

/// Total years of work history.
///
/// Dated roles win (overlaps merged, open ends run to `today`); otherwise the
/// stated figure; otherwise the largest "N years" mention in the text.
pub fn candidate_years(subject: &RankingSubject, today: NaiveDate) -> Option<f64> {
    let mut spans: Vec<(NaiveDate, NaiveDate)> = subject
        .roles
        .iter()
        .filter_map(|role| {
            let start = parse_resume_date(&role.start_date)?;
            let end = if is_open_end(&role.end_date) {
                today
            } else {
                parse_resume_date(&role.end_date)?
            };
            (end >= start).then_some((start, end))
        })
        .collect();

    if !spans.is_empty() {
        spans.sort();
        let mut total_days = 0_i64;
        let (mut cur_start, mut cur_end) = spans[0];
        for &(start, end) in &spans[1..] {
            if start <= cur_end {
                cur_end = cur_end.max(end);
            } else {
                total_days += (cur_end - cur_start).num_days();
                cur_start = start;
                cur_end = end;
            }
        }
        total_days += (cur_end - cur_start).num_days();
        return Some(total_days as f64 / 365.25);
    }

    subject
        .stated_years
        .or_else(|| extract_years(&subject.experience_text))
}

fn is_open_end(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "present" | "current" | "now" | "ongoing"
    )
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM` and `YYYY`.
fn parse_resume_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if raw.len() == 4 {
        let year = raw.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

/// Largest "N years" / "N+ yrs" figure in the text.
pub fn extract_years(text: &str) -> Option<f64> {
    static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b").unwrap()
    });

    YEARS_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<f64>().ok())
        .reduce(f64::max)
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

const DEGREE_LEVELS: &[(u8, &[&str])] = &[
    (5, &["phd", "ph.d", "doctor", "doctorate", "doctoral"]),
    (
        4,
        &["master", "masters", "m.s.", "m.sc", "msc", "mba", "m.b.a.", "m.a.", "m.tech", "m.eng"],
    ),
    (
        3,
        &["bachelor", "bachelors", "b.s.", "b.a.", "b.sc", "bsc", "b.tech", "b.e.", "undergraduate"],
    ),
    (2, &["associate", "associates"]),
    (1, &["high school", "secondary", "ged", "g.e.d", "diploma"]),
];

/// One pattern per level. Keywords must stand alone: no letter or digit on
/// either side, and no dot before them, so "b.a." inside "m.b.a." and "mba"
/// inside "mumbai" do not count.
static DEGREE_PATTERNS: LazyLock<Vec<(u8, Regex)>> = LazyLock::new(|| {
    DEGREE_LEVELS
        .iter()
        .map(|(level, keys)| {
            let alternatives = keys
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern =
                format!(r"(?i)(?:^|[^\p{{L}}\p{{N}}.])(?:{alternatives})(?:[^\p{{L}}\p{{N}}]|$)");
            (*level, Regex::new(&pattern).unwrap())
        })
        .collect()
});

fn levels_mentioned(text: &str) -> Vec<u8> {
    DEGREE_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(level, _)| *level)
        .collect()
}

/// 1.0 when the best degree meets the lowest acceptable level named in the
/// requirement, partial credit below it, 0.0 when the requirement is unknown.
fn evaluate_education(degrees: &[String], required: Option<&str>) -> f64 {
    let Some(required) = required.and_then(|r| levels_mentioned(r).into_iter().min()) else {
        return 0.0;
    };
    let best = degrees
        .iter()
        .filter_map(|d| levels_mentioned(d).into_iter().max())
        .max()
        .unwrap_or(0);

    (best as f64 / required as f64).min(1.0)
}

/// Whole years of experience as a display string, e.g. "5 years".
pub fn summarize_years(years: Option<f64>) -> String {
    match years.map(|y| (y + YEAR_SLACK).floor() as u32) {
        Some(1) => "1 year".to_string(),
        Some(n) => format!("{n} years"),
        None => "0 years".to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn subject(skills: &[&str]) -> RankingSubject {
        RankingSubject {
            skills: strings(skills),
            ..Default::default()
        }
    }

    fn criteria(required: &[&str], preferred: &[&str]) -> RankingCriteria {
        RankingCriteria {
            required_skills: strings(required),
            preferred_skills: strings(preferred),
            ..Default::default()
        }
    }

    #[test]
    fn test_frontend_scenario() {
        let result = rank_on(
            &subject(&["JavaScript", "React", "TypeScript"]),
            &criteria(&["JavaScript", "React"], &["Next.js"]),
            today(),
        );

        let expected: IndexMap<String, bool> = [
            ("JavaScript".to_string(), true),
            ("React".to_string(), true),
            ("Next.js".to_string(), false),
        ]
        .into_iter()
        .collect();
        assert_eq!(result.skills_match, expected);
        assert_eq!(result.skill_score, 4);
        assert!(result.ranking > Ranking::Poor);
        assert_eq!(result.match_score, 80);
    }

    #[test]
    fn test_disjoint_skills_score_zero() {
        let result = rank_on(
            &subject(&["Cobol", "Fortran"]),
            &criteria(&["Rust", "Go"], &["Kubernetes"]),
            today(),
        );
        assert!(result.skills_match.values().all(|hit| !hit));
        assert_eq!(result.skill_score, 0);
        assert_eq!(result.match_score, 0);
        assert_eq!(result.ranking, Ranking::Poor);
    }

    #[test]
    fn test_matching_ignores_case() {
        let upper = rank_on(&subject(&["Python"]), &criteria(&["python"], &[]), today());
        let lower = rank_on(&subject(&["python"]), &criteria(&["Python"], &[]), today());
        assert_eq!(upper.skill_score, 2);
        assert_eq!(lower.skill_score, 2);
        assert_eq!(upper.ranking, lower.ranking);
    }

    #[test]
    fn test_full_required_coverage_is_never_poor() {
        let mut profile = criteria(&["Rust"], &["Go", "Kafka", "Kubernetes", "Terraform", "AWS"]);
        profile.minimum_years = Some(10.0);
        let result = rank_on(&subject(&["rust"]), &profile, today());
        // 2 of 2 + 0 + 0 + 0 + 0 + 0 + 0 of 2 → 2/9 ≈ 22
        assert_eq!(result.match_score, 22);
        assert_eq!(result.ranking, Ranking::Good);
    }

    #[test]
    fn test_skill_in_both_lists_counts_as_required() {
        let result = rank_on(
            &subject(&["SQL"]),
            &criteria(&["SQL"], &["sql", "dbt"]),
            today(),
        );
        assert_eq!(result.skills_match.len(), 2);
        assert_eq!(result.skill_score, 2);
    }

    #[test]
    fn test_empty_inputs_are_neutral() {
        let result = rank_on(&RankingSubject::default(), &RankingCriteria::default(), today());
        assert!(result.skills_match.is_empty());
        assert_eq!(result.skill_score, 0);
        assert_eq!(result.match_score, 0);
        assert_eq!(result.experience_match, 0.0);
        assert_eq!(result.education_match, 0.0);
        assert_eq!(result.ranking, Ranking::Poor);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let s = subject(&["Go", "Docker"]);
        let c = criteria(&["Go"], &["Docker", "gRPC"]);
        assert_eq!(rank_on(&s, &c, today()), rank_on(&s, &c, today()));
    }

    #[test]
    fn test_experience_bonus_when_minimum_met() {
        let mut s = subject(&["Go"]);
        s.roles = vec![DatedRole {
            start_date: "2018-06".to_string(),
            end_date: "Present".to_string(),
        }];
        let mut c = criteria(&["Go"], &[]);
        c.minimum_years = Some(3.0);

        let result = rank_on(&s, &c, today());
        assert_eq!(result.experience_match, 1.0);
        assert_eq!(result.match_score, 100);
        assert_eq!(result.ranking, Ranking::Best);
    }

    #[test]
    fn test_experience_bonus_at_exact_minimum() {
        let mut c = criteria(&[], &[]);
        c.minimum_years = Some(3.0);

        // 1096 and 1095 days: one span lands just over 3.0, the other just under.
        for (start, end) in [("2021-06-01", "2024-06-01"), ("2021-01-01", "2024-01-01")] {
            let mut s = subject(&[]);
            s.roles = vec![DatedRole {
                start_date: start.to_string(),
                end_date: end.to_string(),
            }];

            let result = rank_on(&s, &c, today());
            assert_eq!(result.experience_match, 1.0, "{start}..{end}");
            assert_eq!(result.match_score, 100, "{start}..{end}");
        }
    }

    #[test]
    fn test_experience_partial_when_short() {
        let mut s = subject(&[]);
        s.roles = vec![DatedRole {
            start_date: "2022-06-01".to_string(),
            end_date: "2024-06-01".to_string(),
        }];
        let mut c = criteria(&[], &[]);
        c.minimum_years = Some(4.0);

        let result = rank_on(&s, &c, today());
        assert!((result.experience_match - 0.5).abs() < 0.01);
        assert_eq!(result.match_score, 0);
    }

    #[test]
    fn test_required_experience_text_supplies_minimum() {
        let mut s = subject(&[]);
        s.experience_text = "Backend engineer with 6 years of Python".to_string();
        let mut c = criteria(&[], &[]);
        c.experience_text = Some("5+ years of backend development".to_string());

        let result = rank_on(&s, &c, today());
        assert_eq!(result.experience_match, 1.0);
        assert_eq!(result.match_score, 100);
    }

    #[test]
    fn test_required_experience_text_containment() {
        let mut s = subject(&[]);
        s.experience_text = "Led Web Development for a retail platform".to_string();
        let mut c = criteria(&[], &[]);
        c.experience_text = Some("web development".to_string());

        let result = rank_on(&s, &c, today());
        assert_eq!(result.experience_match, 1.0);

        c.experience_text = Some("embedded firmware".to_string());
        let result = rank_on(&s, &c, today());
        assert_eq!(result.experience_match, 0.0);
    }

    #[test]
    fn test_zero_minimum_is_no_requirement() {
        let mut c = criteria(&["Go"], &[]);
        c.minimum_years = Some(0.0);
        let result = rank_on(&subject(&["Go"]), &c, today());
        assert_eq!(result.experience_match, 0.0);
        assert_eq!(result.match_score, 100);
    }

    #[test]
    fn test_candidate_years_merges_overlaps() {
        let s = RankingSubject {
            roles: vec![
                DatedRole {
                    start_date: "2018".to_string(),
                    end_date: "2020".to_string(),
                },
                DatedRole {
                    start_date: "2019-01".to_string(),
                    end_date: "2021-01".to_string(),
                },
                DatedRole {
                    start_date: "garbage".to_string(),
                    end_date: "2021".to_string(),
                },
            ],
            ..Default::default()
        };
        let years = candidate_years(&s, today()).unwrap();
        assert!((years - 3.0).abs() < 0.01, "years was {years}");
    }

    #[test]
    fn test_candidate_years_falls_back_to_text() {
        let s = RankingSubject {
            experience_text: "3 yrs at a startup, then 7 years in banking".to_string(),
            ..Default::default()
        };
        assert_eq!(candidate_years(&s, today()), Some(7.0));
        assert_eq!(candidate_years(&RankingSubject::default(), today()), None);
    }

    #[test]
    fn test_stated_years_used_without_dates() {
        let s = RankingSubject {
            stated_years: Some(4.0),
            experience_text: "10 years".to_string(),
            ..Default::default()
        };
        assert_eq!(candidate_years(&s, today()), Some(4.0));
    }

    #[test]
    fn test_education_levels() {
        let degrees = strings(&["M.S. Computer Science", "B.S. Mathematics"]);
        assert_eq!(evaluate_education(&degrees, Some("Bachelor's Degree")), 1.0);
        assert_eq!(evaluate_education(&degrees, Some("Bachelor's or Master's")), 1.0);
        assert_eq!(
            evaluate_education(&strings(&["B.S. Physics"]), Some("PhD in Physics")),
            0.6
        );
        assert_eq!(evaluate_education(&degrees, None), 0.0);
        assert_eq!(evaluate_education(&[], Some("Bachelor's")), 0.0);
    }

    #[test]
    fn test_degree_keywords_match_whole_words() {
        assert_eq!(evaluate_education(&strings(&["M.B.A."]), Some("Master's degree")), 1.0);
        assert_eq!(
            evaluate_education(&strings(&["B.Tech, University of Mumbai"]), Some("Master's degree")),
            0.75
        );
        assert_eq!(levels_mentioned("Masters in Finance"), vec![4]);
        assert_eq!(levels_mentioned("Doctorate, Ph.D. track"), vec![5]);
        assert!(levels_mentioned("aged care volunteer").is_empty());
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(Ranking::from_match_score(100), Ranking::Best);
        assert_eq!(Ranking::from_match_score(80), Ranking::Best);
        assert_eq!(Ranking::from_match_score(79), Ranking::Better);
        assert_eq!(Ranking::from_match_score(60), Ranking::Better);
        assert_eq!(Ranking::from_match_score(40), Ranking::Good);
        assert_eq!(Ranking::from_match_score(39), Ranking::Poor);
        assert_eq!(Ranking::from_match_score(0), Ranking::Poor);
    }

    #[test]
    fn test_ranking_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Ranking::Better).unwrap(), "\"better\"");
        let result = rank_on(&subject(&["Go"]), &criteria(&["Go"], &[]), today());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ranking"], "best");
        assert_eq!(value["matchScore"], 100);
        assert_eq!(value["skillsMatch"]["Go"], true);
    }

    #[test]
    fn test_summarize_years() {
        assert_eq!(summarize_years(Some(5.9)), "5 years");
        assert_eq!(summarize_years(Some(1.2)), "1 year");
        assert_eq!(summarize_years(None), "0 years");
        assert_eq!(summarize_years(Some(1826.0 / 365.25)), "5 years");
    }
}
