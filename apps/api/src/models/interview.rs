use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::Rescheduled => "rescheduled",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    #[default]
    Video,
    InPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackRecommendation {
    Hire,
    NoHire,
    SecondInterview,
}

/// Interviewer feedback. Ratings are on a 1–10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    pub technical_rating: u8,
    pub communication_rating: u8,
    pub culture_fit_rating: u8,
    #[serde(default)]
    pub notes: String,
    pub recommendation: FeedbackRecommendation,
    pub feedback_at: DateTime<Utc>,
}

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_LOCATION: &str = "Virtual Meeting";

/// A scheduled conversation between a candidate and an interviewer.
///
/// `candidate_id` and `job_id` are soft references: the store does not
/// enforce them, scheduling checks them when the interview is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: String,
    pub candidate_id: String,
    pub job_id: String,
    /// Wall-clock time of the slot.
    pub scheduled_time: NaiveDateTime,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default)]
    pub interview_type: InterviewType,
    pub duration_minutes: u32,
    pub location: String,
    #[serde(default)]
    pub interviewer: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<InterviewFeedback>,
    pub created_at: DateTime<Utc>,
}

impl Interview {
    /// Whether this interview still occupies its slot.
    pub fn holds_slot(&self) -> bool {
        self.status != InterviewStatus::Cancelled
    }
}
