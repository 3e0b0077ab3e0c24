use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a candidate. Candidates are never deleted, only transitioned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    New,
    Pending,
    Approved,
    Rejected,
    InterviewRequired,
    OnHold,
    Interviewed,
    Hired,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Pending => "pending",
            CandidateStatus::Approved => "approved",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::InterviewRequired => "interview_required",
            CandidateStatus::OnHold => "on_hold",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Hired => "hired",
        }
    }
}

/// HR's first-pass review of a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReview {
    pub rating: u8,
    pub notes: String,
    pub decision: CandidateStatus,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hire,
    Reject,
    Hold,
}

impl Decision {
    /// Status a candidate moves to once the decision is recorded.
    pub fn resulting_status(&self) -> CandidateStatus {
        match self {
            Decision::Hire => CandidateStatus::Hired,
            Decision::Reject => CandidateStatus::Rejected,
            Decision::Hold => CandidateStatus::OnHold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub decision: Decision,
    pub salary_offer: Option<u64>,
    pub notes: String,
    pub decided_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub resume_path: Option<String>,
    /// Job the resume was submitted for.
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<CandidateReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_decision: Option<FinalDecision>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&CandidateStatus::InterviewRequired).unwrap();
        assert_eq!(json, r#""interview_required""#);
        let status: CandidateStatus = serde_json::from_str(r#""on_hold""#).unwrap();
        assert_eq!(status, CandidateStatus::OnHold);
        assert_eq!(status.as_str(), "on_hold");
    }

    #[test]
    fn test_decision_resulting_status() {
        assert_eq!(Decision::Hire.resulting_status(), CandidateStatus::Hired);
        assert_eq!(Decision::Reject.resulting_status(), CandidateStatus::Rejected);
        assert_eq!(Decision::Hold.resulting_status(), CandidateStatus::OnHold);
    }

    #[test]
    fn test_minimal_candidate_deserializes_with_defaults() {
        let json = r#"{
            "id": "c1",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "created_at": "2026-01-05T10:00:00Z"
        }"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.status, CandidateStatus::New);
        assert!(candidate.skills.is_empty());
        assert!(candidate.review.is_none());
    }
}
