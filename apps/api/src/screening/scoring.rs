//! Match scoring: weighted skill / experience / education scores for a
//! candidate against a job, plus ranking of a candidate pool.
//!
//! `AppState` holds an `Arc<dyn CandidateScorer>`; `WeightedScorer` is the default.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::candidate::Candidate;
use crate::models::job::{ExperienceLevel, Job};
use crate::resume::experience::extract_years;

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

pub const SKILL_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.3;
pub const EDUCATION_WEIGHT: f64 = 0.2;
pub const BASELINE_WEIGHT: f64 = 0.1;
/// Fixed contribution every candidate receives. Keeps the overall score in [1, 91].
pub const BASELINE_SCORE: f64 = 10.0;

/// Component score used when the job states nothing to compare against.
pub const NEUTRAL_SCORE: f64 = 50.0;

const EDUCATION_POINTS_PER_KEYWORD: f64 = 20.0;
const EDUCATION_SCORE_KEYWORDS: &[&str] =
    &["bachelor", "master", "phd", "degree", "university", "college"];

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ranking {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl Ranking {
    /// Lower bounds are inclusive: 80 is Excellent, 60 Good, 40 Average.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Ranking::Excellent
        } else if score >= 60.0 {
            Ranking::Good
        } else if score >= 40.0 {
            Ranking::Average
        } else {
            Ranking::BelowAverage
        }
    }

    pub fn recommendations(&self) -> [&'static str; 2] {
        match self {
            Ranking::Excellent => [
                "Highly recommended for interview",
                "Strong match for the position",
            ],
            Ranking::Good => [
                "Good candidate worth considering",
                "May need some additional evaluation",
            ],
            Ranking::Average => ["Average candidate", "Consider for backup positions"],
            Ranking::BelowAverage => [
                "Below requirements",
                "May not be suitable for this role",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub candidate_id: String,
    pub job_id: String,
    pub skill_match_score: f64,
    pub experience_match_score: f64,
    pub education_match_score: f64,
    /// Rounded to 2 decimals.
    pub overall_score: f64,
    pub ranking: Ranking,
    pub recommendations: Vec<String>,
}

/// A score together with the candidate it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub score: ScoreResult,
    pub candidate_data: Candidate,
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("candidate has no identifier")]
    MissingCandidateId,

    #[error("job has no identifier")]
    MissingJobId,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one candidate against one job. Implementations must be deterministic.
pub trait CandidateScorer: Send + Sync {
    fn score(&self, candidate: &Candidate, job: &Job) -> Result<ScoreResult, ScoringError>;
}

/// Fixed-weight scorer: skills 0.4, experience 0.3, education 0.2, baseline 0.1.
pub struct WeightedScorer;

impl CandidateScorer for WeightedScorer {
    fn score(&self, candidate: &Candidate, job: &Job) -> Result<ScoreResult, ScoringError> {
        score_candidate(candidate, job)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring
// ────────────────────────────────────────────────────────────────────────────

pub fn score_candidate(candidate: &Candidate, job: &Job) -> Result<ScoreResult, ScoringError> {
    if candidate.id.trim().is_empty() {
        return Err(ScoringError::MissingCandidateId);
    }
    if job.id.trim().is_empty() {
        return Err(ScoringError::MissingJobId);
    }

    let skill = skill_match_score(&candidate.skills, &job.skills_required);
    let experience = experience_match_score(
        candidate.experience.as_deref().unwrap_or_default(),
        &job.experience_level,
    );
    let education = education_match_score(
        candidate.education.as_deref().unwrap_or_default(),
        &job.requirements,
    );
    let overall = round2(overall_score(skill, experience, education));
    let ranking = Ranking::from_score(overall);

    Ok(ScoreResult {
        candidate_id: candidate.id.clone(),
        job_id: job.id.clone(),
        skill_match_score: skill,
        experience_match_score: experience,
        education_match_score: education,
        overall_score: overall,
        ranking,
        recommendations: ranking
            .recommendations()
            .iter()
            .map(|r| r.to_string())
            .collect(),
    })
}

/// Share of required skills the candidate has, case-insensitive.
pub fn skill_match_score(candidate_skills: &BTreeSet<String>, required: &[String]) -> f64 {
    if required.is_empty() {
        return NEUTRAL_SCORE;
    }
    let have: BTreeSet<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
    let matched = required
        .iter()
        .filter(|skill| have.contains(&skill.to_lowercase()))
        .count();
    matched as f64 / required.len() as f64 * 100.0
}

/// Years the job asks for, read from the level text with the same rule as
/// resumes. Labels carry no number and so ask for 0. `None` when the text is empty.
pub fn required_years(level: &ExperienceLevel) -> Option<u32> {
    let text = String::from(level.clone());
    if text.trim().is_empty() {
        None
    } else {
        Some(extract_years(&text))
    }
}

pub fn experience_match_score(candidate_experience: &str, level: &ExperienceLevel) -> f64 {
    let Some(required) = required_years(level) else {
        return NEUTRAL_SCORE;
    };
    let have = f64::from(extract_years(candidate_experience));
    let required = f64::from(required);

    if have >= required {
        100.0
    } else if have >= required * 0.8 {
        80.0
    } else if have >= required * 0.6 {
        60.0
    } else {
        30.0
    }
}

/// 20 points per education keyword in the candidate's education text, capped at 100.
pub fn education_match_score(candidate_education: &str, requirements: &[String]) -> f64 {
    if requirements.is_empty() {
        return NEUTRAL_SCORE;
    }
    let lowered = candidate_education.to_lowercase();
    let hits = EDUCATION_SCORE_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();
    (hits as f64 * EDUCATION_POINTS_PER_KEYWORD).min(100.0)
}

pub fn overall_score(skill: f64, experience: f64, education: f64) -> f64 {
    skill * SKILL_WEIGHT
        + experience * EXPERIENCE_WEIGHT
        + education * EDUCATION_WEIGHT
        + BASELINE_SCORE * BASELINE_WEIGHT
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores every candidate and sorts by overall score, highest first.
/// Ties keep input order. Candidates that fail to score are logged and dropped.
pub fn rank_candidates(
    scorer: &dyn CandidateScorer,
    candidates: &[Candidate],
    job: &Job,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .filter_map(|candidate| match scorer.score(candidate, job) {
            Ok(score) => Some(RankedCandidate {
                score,
                candidate_data: candidate.clone(),
            }),
            Err(e) => {
                warn!(
                    candidate_id = %candidate.id,
                    job_id = %job.id,
                    "Skipping candidate that could not be scored: {e}"
                );
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.overall_score.total_cmp(&a.score.overall_score));
    ranked
}
