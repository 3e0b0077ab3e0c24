use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::{split_list, ExperienceLevel, Job, JobStatus};
use crate::models::new_id;

/// A list field given either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Text(String),
}

impl Default for ListInput {
    fn default() -> Self {
        ListInput::Items(Vec::new())
    }
}

impl ListInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ListInput::Items(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            ListInput::Text(raw) => split_list(&raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: ListInput,
    #[serde(default)]
    pub skills_required: ListInput,
    #[serde(default = "default_level")]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub department: String,
}

fn default_level() -> ExperienceLevel {
    ExperienceLevel::Entry
}

/// Builds an active job posting. Title and description are required.
pub fn build_job(input: NewJob) -> Result<Job, AppError> {
    let title = input.title.trim();
    let description = input.description.trim();
    if title.is_empty() || description.is_empty() {
        return Err(AppError::Validation(
            "Job title and description are required".to_string(),
        ));
    }

    Ok(Job {
        id: new_id(),
        title: title.to_string(),
        description: description.to_string(),
        requirements: input.requirements.into_vec(),
        skills_required: input.skills_required.into_vec(),
        experience_level: input.experience_level,
        department: input.department.trim().to_string(),
        status: JobStatus::Active,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_job_accepts_comma_separated_lists() {
        let input: NewJob = serde_json::from_str(
            r#"{
                "title": "Data Engineer",
                "description": "Pipelines",
                "skills_required": "Python, SQL ,Airflow",
                "requirements": ["Degree", " "],
                "experience_level": "Senior",
                "department": "Data"
            }"#,
        )
        .unwrap();
        let job = build_job(input).unwrap();
        assert_eq!(job.skills_required, vec!["Python", "SQL", "Airflow"]);
        assert_eq!(job.requirements, vec!["Degree"]);
        assert_eq!(job.experience_level, ExperienceLevel::Senior);
        assert_eq!(job.status, JobStatus::Active);
        assert!(!job.id.is_empty());
    }

    #[test]
    fn test_build_job_defaults() {
        let input: NewJob =
            serde_json::from_str(r#"{"title": "QA", "description": "Testing"}"#).unwrap();
        let job = build_job(input).unwrap();
        assert!(job.skills_required.is_empty());
        assert_eq!(job.experience_level, ExperienceLevel::Entry);
        assert_eq!(job.department, "");
    }

    #[test]
    fn test_build_job_requires_title_and_description() {
        let input: NewJob =
            serde_json::from_str(r#"{"title": "  ", "description": "Testing"}"#).unwrap();
        assert!(matches!(build_job(input), Err(AppError::Validation(_))));
    }
}
