//! HR review: presents ranked candidates to HR and records HR decisions.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::{
    Candidate, CandidateReview, CandidateStatus, Decision, FinalDecision,
};
use crate::models::job::Job;
use crate::models::notification::Notification;
use crate::notifications::decision_notification;
use crate::screening::scoring::{RankedCandidate, Ranking};
use crate::store::JsonStore;

const PRESENTED_CANDIDATES: usize = 5;
const REPORTED_CANDIDATES: usize = 3;
const TOP_SKILLS: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Presentation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: BTreeSet<String>,
    pub experience: Option<String>,
    pub overall_score: f64,
    pub ranking: Ranking,
    pub recommendations: Vec<String>,
}

impl From<&RankedCandidate> for CandidateSummary {
    fn from(ranked: &RankedCandidate) -> Self {
        let c = &ranked.candidate_data;
        CandidateSummary {
            id: c.id.clone(),
            name: c.name.clone(),
            email: c.email.clone(),
            skills: c.skills.clone(),
            experience: c.experience.clone(),
            overall_score: ranked.score.overall_score,
            ranking: ranked.score.ranking,
            recommendations: ranked.score.recommendations.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidatePresentation {
    pub job_title: String,
    pub job_id: String,
    pub total_candidates: usize,
    pub top_candidates: Vec<RankedCandidate>,
    pub candidate_summary: Vec<CandidateSummary>,
    pub recommendations: Vec<String>,
}

/// Packages a ranked pool for HR: top five, a summary row per candidate,
/// and one overall recommendation.
pub fn present_candidates(ranked: &[RankedCandidate], job: &Job) -> CandidatePresentation {
    CandidatePresentation {
        job_title: job.title.clone(),
        job_id: job.id.clone(),
        total_candidates: ranked.len(),
        top_candidates: ranked.iter().take(PRESENTED_CANDIDATES).cloned().collect(),
        candidate_summary: ranked.iter().map(CandidateSummary::from).collect(),
        recommendations: vec![pool_recommendation(ranked).to_string()],
    }
}

fn count_ranking(ranked: &[RankedCandidate], ranking: Ranking) -> usize {
    ranked.iter().filter(|r| r.score.ranking == ranking).count()
}

fn pool_recommendation(ranked: &[RankedCandidate]) -> &'static str {
    let excellent = count_ranking(ranked, Ranking::Excellent);
    let good = count_ranking(ranked, Ranking::Good);

    if excellent >= 3 {
        "Multiple excellent candidates available - proceed with interviews"
    } else if excellent >= 1 {
        "Strong candidates identified - prioritize top performers"
    } else if good >= 2 {
        "Good candidates available - consider multiple interviews"
    } else {
        "Limited qualified candidates - consider expanding search"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HR actions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrAction {
    Approve,
    Reject,
    Hold,
}

/// What the workflow should do next after an HR action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUp {
    ScheduleInterview,
    UpdateStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrFeedbackOutcome {
    pub action: FollowUp,
    pub candidate_id: String,
    pub status: CandidateStatus,
}

impl HrAction {
    pub fn outcome(&self) -> (FollowUp, CandidateStatus) {
        match self {
            HrAction::Approve => (FollowUp::ScheduleInterview, CandidateStatus::Approved),
            HrAction::Reject => (FollowUp::UpdateStatus, CandidateStatus::Rejected),
            HrAction::Hold => (FollowUp::UpdateStatus, CandidateStatus::OnHold),
        }
    }
}

/// Applies an HR action and writes the resulting status.
pub async fn process_hr_feedback(
    store: &JsonStore,
    action: HrAction,
    candidate_id: &str,
) -> Result<HrFeedbackOutcome, AppError> {
    let (follow_up, status) = action.outcome();
    store.update_candidate_status(candidate_id, status).await?;

    Ok(HrFeedbackOutcome {
        action: follow_up,
        candidate_id: candidate_id.to_string(),
        status,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
    pub decision: CandidateStatus,
}

/// Decisions a first-pass review may record.
const REVIEW_DECISIONS: &[CandidateStatus] = &[
    CandidateStatus::Pending,
    CandidateStatus::Approved,
    CandidateStatus::Rejected,
    CandidateStatus::InterviewRequired,
];

/// Stores HR's review and moves the candidate to the review decision.
pub async fn review_candidate(
    store: &JsonStore,
    candidate_id: &str,
    input: ReviewInput,
) -> Result<Candidate, AppError> {
    if !(1..=10).contains(&input.rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 1 and 10, got {}",
            input.rating
        )));
    }
    if !REVIEW_DECISIONS.contains(&input.decision) {
        return Err(AppError::Validation(format!(
            "'{}' is not a review decision",
            input.decision.as_str()
        )));
    }

    let mut candidate: Candidate = store.require(candidate_id).await?;
    candidate.status = input.decision;
    candidate.review = Some(CandidateReview {
        rating: input.rating,
        notes: input.notes,
        decision: input.decision,
        reviewed_at: Utc::now(),
    });
    store.update(&candidate).await?;

    info!(candidate_id, decision = input.decision.as_str(), "Candidate reviewed");
    Ok(candidate)
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionInput {
    pub decision: Decision,
    #[serde(default)]
    pub salary_offer: Option<u64>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutcome {
    pub candidate: Candidate,
    pub notification: Notification,
}

/// Records the final hiring decision. A salary offer is kept only for hires.
pub async fn make_final_decision(
    store: &JsonStore,
    candidate_id: &str,
    input: DecisionInput,
) -> Result<DecisionOutcome, AppError> {
    let mut candidate: Candidate = store.require(candidate_id).await?;

    let decision = FinalDecision {
        decision: input.decision,
        salary_offer: match input.decision {
            Decision::Hire => input.salary_offer,
            _ => None,
        },
        notes: input.notes,
        decided_at: Utc::now(),
    };
    candidate.status = input.decision.resulting_status();
    candidate.final_decision = Some(decision.clone());
    store.update(&candidate).await?;

    info!(
        candidate_id,
        status = candidate.status.as_str(),
        "Final decision recorded"
    );

    let notification = decision_notification(&candidate, &decision);
    Ok(DecisionOutcome {
        candidate,
        notification,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// HR report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetails {
    pub title: String,
    pub id: String,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStatistics {
    pub total_candidates: usize,
    pub excellent_candidates: usize,
    pub good_candidates: usize,
    pub average_candidates: usize,
    pub below_average_candidates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillAnalysis {
    pub total_unique_skills: usize,
    pub top_skills: Vec<SkillCount>,
    pub skill_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HrReport {
    pub job_details: JobDetails,
    pub candidate_statistics: RankingStatistics,
    pub top_candidates: Vec<RankedCandidate>,
    pub skill_analysis: SkillAnalysis,
    pub recommendations: Vec<String>,
}

pub fn generate_hr_report(ranked: &[RankedCandidate], job: &Job) -> HrReport {
    HrReport {
        job_details: JobDetails {
            title: job.title.clone(),
            id: job.id.clone(),
            requirements: job.requirements.clone(),
        },
        candidate_statistics: RankingStatistics {
            total_candidates: ranked.len(),
            excellent_candidates: count_ranking(ranked, Ranking::Excellent),
            good_candidates: count_ranking(ranked, Ranking::Good),
            average_candidates: count_ranking(ranked, Ranking::Average),
            below_average_candidates: count_ranking(ranked, Ranking::BelowAverage),
        },
        top_candidates: ranked.iter().take(REPORTED_CANDIDATES).cloned().collect(),
        skill_analysis: analyze_skills(ranked),
        recommendations: vec![hiring_recommendation(ranked.len()).to_string()],
    }
}

/// Skill frequencies across the pool. Top skills break count ties alphabetically.
pub fn analyze_skills(ranked: &[RankedCandidate]) -> SkillAnalysis {
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    for skill in ranked.iter().flat_map(|r| r.candidate_data.skills.iter()) {
        *distribution.entry(skill.clone()).or_default() += 1;
    }

    let mut top: Vec<SkillCount> = distribution
        .iter()
        .map(|(skill, count)| SkillCount {
            skill: skill.clone(),
            count: *count,
        })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count));
    top.truncate(TOP_SKILLS);

    SkillAnalysis {
        total_unique_skills: distribution.len(),
        top_skills: top,
        skill_distribution: distribution,
    }
}

fn hiring_recommendation(pool_size: usize) -> &'static str {
    match pool_size {
        0 => "No candidates found - expand search criteria",
        1 | 2 => "Limited candidate pool - consider broader recruitment",
        _ => "Sufficient candidates for selection process",
    }
}
