use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seniority the job asks for.
///
/// Serialized as a plain string. The four labels round-trip as-is; any other
/// text (e.g. "8 years") is kept verbatim as a stated requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
    Stated(String),
}

impl From<String> for ExperienceLevel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "entry" => ExperienceLevel::Entry,
            "mid" => ExperienceLevel::Mid,
            "senior" => ExperienceLevel::Senior,
            "executive" => ExperienceLevel::Executive,
            _ => ExperienceLevel::Stated(value),
        }
    }
}

impl From<ExperienceLevel> for String {
    fn from(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Entry => "Entry".to_string(),
            ExperienceLevel::Mid => "Mid".to_string(),
            ExperienceLevel::Senior => "Senior".to_string(),
            ExperienceLevel::Executive => "Executive".to_string(),
            ExperienceLevel::Stated(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Splits a comma-separated form field into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
