//! Filtering: hard constraints applied over a ranked candidate pool.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::resume::experience::extract_years;
use crate::screening::scoring::{rank_candidates, CandidateScorer, Ranking};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[default]
    Any,
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Phd,
}

impl EducationLevel {
    /// Text that must appear in the candidate's education; `None` for `Any`.
    pub fn required_text(&self) -> Option<&'static str> {
        match self {
            EducationLevel::Any => None,
            EducationLevel::HighSchool => Some("high school"),
            EducationLevel::Bachelors => Some("bachelor's"),
            EducationLevel::Masters => Some("master's"),
            EducationLevel::Phd => Some("phd"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub min_experience: u32,
    pub required_skills: Vec<String>,
    pub education_level: EducationLevel,
    pub score_threshold: f64,
}

impl FilterCriteria {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=100.0).contains(&self.score_threshold) {
            return Err(AppError::Validation(format!(
                "score_threshold must be between 0 and 100, got {}",
                self.score_threshold
            )));
        }
        Ok(())
    }
}

/// A candidate that passed every constraint, with its match data attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub match_score: f64,
    pub ranking: Ranking,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
    pub filtered_candidates: Vec<FilteredCandidate>,
    pub total_candidates: usize,
    pub filtered_count: usize,
    pub filter_criteria: FilterCriteria,
}

/// Ranks `candidates` for `job`, then keeps those meeting every criterion.
/// Output stays in ranked order.
pub fn filter_candidates(
    scorer: &dyn CandidateScorer,
    candidates: &[Candidate],
    job: &Job,
    criteria: &FilterCriteria,
) -> FilterResult {
    let required_skills: Vec<String> = criteria
        .required_skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let filtered_candidates: Vec<FilteredCandidate> = rank_candidates(scorer, candidates, job)
        .into_iter()
        .filter(|ranked| {
            let candidate = &ranked.candidate_data;
            meets_experience(candidate, criteria.min_experience)
                && has_skills(candidate, &required_skills)
                && meets_education(candidate, criteria.education_level)
                && ranked.score.overall_score >= criteria.score_threshold
        })
        .map(|ranked| FilteredCandidate {
            candidate: ranked.candidate_data,
            match_score: ranked.score.overall_score,
            ranking: ranked.score.ranking,
            recommendations: ranked.score.recommendations,
        })
        .collect();

    FilterResult {
        filtered_count: filtered_candidates.len(),
        filtered_candidates,
        total_candidates: candidates.len(),
        filter_criteria: criteria.clone(),
    }
}

fn meets_experience(candidate: &Candidate, min_years: u32) -> bool {
    extract_years(candidate.experience.as_deref().unwrap_or_default()) >= min_years
}

fn has_skills(candidate: &Candidate, required_lowercase: &[String]) -> bool {
    if required_lowercase.is_empty() {
        return true;
    }
    let have: BTreeSet<String> = candidate.skills.iter().map(|s| s.to_lowercase()).collect();
    required_lowercase.iter().all(|skill| have.contains(skill))
}

fn meets_education(candidate: &Candidate, level: EducationLevel) -> bool {
    match level.required_text() {
        None => true,
        Some(text) => candidate
            .education
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(text),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::candidate::CandidateStatus;
    use crate::models::job::{ExperienceLevel, JobStatus};
    use crate::screening::scoring::WeightedScorer;

    fn candidate(id: &str, skills: &[&str], experience: Option<&str>, education: Option<&str>) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Candidate {id}"),
            email: format!("{id}@example.com"),
            phone: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: experience.map(String::from),
            education: education.map(String::from),
            resume_path: None,
            job_id: Some("j1".to_string()),
            status: CandidateStatus::New,
            review: None,
            final_decision: None,
            created_at: Utc::now(),
        }
    }

    fn job() -> Job {
        Job {
            id: "j1".to_string(),
            title: "Data Engineer".to_string(),
            description: "Pipelines".to_string(),
            requirements: vec![],
            skills_required: vec!["python".to_string(), "sql".to_string()],
            experience_level: ExperienceLevel::Mid,
            department: "Data".to_string(),
            status: JobStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn pool() -> Vec<Candidate> {
        vec![
            candidate("senior", &["python", "sql"], Some("8 years"), Some("Master's in CS")),
            candidate("junior", &["python"], Some("1 years"), Some("Bachelor's in Math")),
            candidate("unknown", &["sql"], None, None),
        ]
    }

    #[test]
    fn test_default_criteria_keep_everyone_in_rank_order() {
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &FilterCriteria::default());
        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.filtered_count, 3);
        assert_eq!(result.filtered_candidates[0].candidate.id, "senior");
        assert!(result
            .filtered_candidates
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_min_experience_excludes_fewer_years() {
        let criteria = FilterCriteria {
            min_experience: 2,
            ..Default::default()
        };
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &criteria);
        let ids: Vec<&str> = result
            .filtered_candidates
            .iter()
            .map(|c| c.candidate.id.as_str())
            .collect();
        assert_eq!(ids, vec!["senior"]);
    }

    #[test]
    fn test_zero_min_experience_keeps_unextractable() {
        let criteria = FilterCriteria::default();
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &criteria);
        assert!(result
            .filtered_candidates
            .iter()
            .any(|c| c.candidate.id == "unknown"));
    }

    #[test]
    fn test_required_skills_case_insensitive() {
        let criteria = FilterCriteria {
            required_skills: vec!["PYTHON".to_string(), "Sql".to_string()],
            ..Default::default()
        };
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &criteria);
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.filtered_candidates[0].candidate.id, "senior");
    }

    #[test]
    fn test_education_level_substring() {
        let criteria = FilterCriteria {
            education_level: EducationLevel::Bachelors,
            ..Default::default()
        };
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &criteria);
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.filtered_candidates[0].candidate.id, "junior");
    }

    #[test]
    fn test_score_threshold_is_inclusive() {
        let all = filter_candidates(&WeightedScorer, &pool(), &job(), &FilterCriteria::default());
        let top_score = all.filtered_candidates[0].match_score;
        let criteria = FilterCriteria {
            score_threshold: top_score,
            ..Default::default()
        };
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &criteria);
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.filtered_candidates[0].match_score, top_score);
    }

    #[test]
    fn test_criteria_deserialize_with_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"education_level": "Master's", "score_threshold": 55}"#).unwrap();
        assert_eq!(criteria.education_level, EducationLevel::Masters);
        assert_eq!(criteria.min_experience, 0);
        assert!(criteria.required_skills.is_empty());
        assert_eq!(criteria.score_threshold, 55.0);
    }

    #[test]
    fn test_criteria_validation() {
        let bad = FilterCriteria {
            score_threshold: 120.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(FilterCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_filtered_candidate_flattens_record() {
        let result = filter_candidates(&WeightedScorer, &pool(), &job(), &FilterCriteria::default());
        let value = serde_json::to_value(&result).unwrap();
        let first = &value["filtered_candidates"][0];
        assert_eq!(first["id"], "senior");
        assert_eq!(first["ranking"], "Excellent");
        assert_eq!(value["filter_criteria"]["education_level"], "Any");
    }
}
