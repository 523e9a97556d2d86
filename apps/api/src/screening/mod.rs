//! Screening domain: Resume Extractor, Standard Profile Generator, Ranking
//! Engine and Candidate Assembler.
//!
//! Pipeline:
//!   1. extractor: resume text → ResumeData (LLM or placeholder)
//!   2. profile: job title → StandardProfile (LLM with per-position cache, or placeholder)
//!   3. intake: loosely-shaped JSON / typed records → strict ranking inputs
//!   4. ranking: pure, deterministic scoring and categorisation
//!   5. assembler: ResumeData + RankingResult → stored Candidate

pub mod assembler;
pub mod extractor;
pub mod handlers;
pub mod intake;
pub mod profile;
pub mod prompts;
pub mod ranking;
