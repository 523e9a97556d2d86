pub mod candidate;
pub mod job;
pub mod profile;
pub mod resume;
