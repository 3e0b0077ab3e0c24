//! Interview lifecycle: schedule, reschedule, cancel, status, feedback, reminders.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::candidate::Candidate;
use crate::models::interview::{
    FeedbackRecommendation, Interview, InterviewFeedback, InterviewStatus, InterviewType,
    DEFAULT_DURATION_MINUTES, DEFAULT_LOCATION,
};
use crate::models::job::Job;
use crate::models::notification::Notification;
use crate::models::prefixed_id;
use crate::notifications::{interview_confirmation, interview_reminder};
use crate::scheduling::slots::{find_available_slots, is_booked, is_business_slot};
use crate::store::{JsonStore, StoreError};

const DEFAULT_CANCELLATION_REASON: &str = "No reason provided";

#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Cannot schedule interview in the past")]
    InPast,

    #[error("Selected time slot {0} is not available")]
    SlotUnavailable(NaiveDateTime),

    #[error("No available slots found")]
    NoSlots,

    #[error("Candidate {0} not found")]
    UnknownCandidate(String),

    #[error("Job {0} not found")]
    UnknownJob(String),

    #[error("Interview {0} not found")]
    UnknownInterview(String),

    #[error("Candidate {0} has no job; a job_id is required")]
    MissingJob(String),

    #[error("Feedback can only be recorded for completed interviews ({0} is {1})")]
    NotCompleted(String, &'static str),

    #[error("{field} must be between 1 and 10, got {value}")]
    RatingOutOfRange { field: &'static str, value: u8 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    pub candidate_id: String,
    /// Defaults to the job the candidate applied for.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Exact time to book. When absent, the first free slot is taken.
    #[serde(default)]
    pub scheduled_time: Option<NaiveDateTime>,
    /// Earliest time to search from when no exact time is given.
    #[serde(default)]
    pub preferred_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub interview_type: InterviewType,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interviewer: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackInput {
    pub technical_rating: u8,
    pub communication_rating: u8,
    pub culture_fit_rating: u8,
    #[serde(default)]
    pub notes: String,
    pub recommendation: FeedbackRecommendation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledInterview {
    pub interview: Interview,
    pub notification: Notification,
}

pub async fn schedule_interview(
    store: &JsonStore,
    request: ScheduleRequest,
    now: NaiveDateTime,
) -> Result<ScheduledInterview, SchedulingError> {
    let candidate: Candidate = store
        .get(&request.candidate_id)
        .await?
        .ok_or_else(|| SchedulingError::UnknownCandidate(request.candidate_id.clone()))?;

    let job_id = request
        .job_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .or_else(|| candidate.job_id.clone())
        .ok_or_else(|| SchedulingError::MissingJob(candidate.id.clone()))?;
    if store.get::<Job>(&job_id).await?.is_none() {
        return Err(SchedulingError::UnknownJob(job_id));
    }

    let booked: Vec<Interview> = store.list().await?;
    let scheduled_time = match request.scheduled_time {
        Some(at) => {
            if at < now {
                return Err(SchedulingError::InPast);
            }
            if is_booked(&booked, at, None) {
                return Err(SchedulingError::SlotUnavailable(at));
            }
            at
        }
        None => {
            let from = request.preferred_time.map_or(now, |p| p.max(now));
            find_available_slots(&booked, from)
                .first()
                .copied()
                .ok_or(SchedulingError::NoSlots)?
        }
    };

    let interview = Interview {
        id: prefixed_id("INT"),
        candidate_id: candidate.id.clone(),
        job_id,
        scheduled_time,
        status: InterviewStatus::Scheduled,
        interview_type: request.interview_type,
        duration_minutes: request.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
        location: request
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        interviewer: request.interviewer,
        notes: request.notes,
        cancellation_reason: None,
        feedback: None,
        created_at: Utc::now(),
    };
    // Another request may have taken the slot since `booked` was read.
    let written = store
        .append_unless(&interview, |current: &[Interview]| {
            is_booked(current, scheduled_time, None)
        })
        .await?;
    if !written {
        return Err(SchedulingError::SlotUnavailable(scheduled_time));
    }

    info!(
        interview_id = %interview.id,
        candidate_id = %interview.candidate_id,
        "Interview scheduled for {}",
        interview.scheduled_time
    );

    let notification = interview_confirmation(&candidate, &interview);
    Ok(ScheduledInterview {
        interview,
        notification,
    })
}

/// Moves an interview to a new free business-hour slot.
pub async fn reschedule_interview(
    store: &JsonStore,
    interview_id: &str,
    new_time: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<Interview, SchedulingError> {
    let mut interview = load_interview(store, interview_id).await?;

    if new_time < now {
        return Err(SchedulingError::InPast);
    }
    if !is_business_slot(new_time) {
        return Err(SchedulingError::SlotUnavailable(new_time));
    }

    interview.scheduled_time = new_time;
    interview.status = InterviewStatus::Rescheduled;
    let written = store
        .update_unless(&interview, |current: &[Interview]| {
            is_booked(current, new_time, Some(interview_id))
        })
        .await?;
    if !written {
        return Err(SchedulingError::SlotUnavailable(new_time));
    }

    info!(interview_id, "Interview rescheduled to {new_time}");
    Ok(interview)
}

pub async fn cancel_interview(
    store: &JsonStore,
    interview_id: &str,
    reason: Option<String>,
) -> Result<Interview, SchedulingError> {
    let mut interview = load_interview(store, interview_id).await?;
    interview.status = InterviewStatus::Cancelled;
    interview.cancellation_reason = Some(
        reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string()),
    );
    store.update(&interview).await?;

    info!(interview_id, "Interview cancelled");
    Ok(interview)
}

pub async fn update_interview_status(
    store: &JsonStore,
    interview_id: &str,
    status: InterviewStatus,
) -> Result<Interview, SchedulingError> {
    let mut interview = load_interview(store, interview_id).await?;
    interview.status = status;
    store.update(&interview).await?;

    info!(interview_id, status = status.as_str(), "Interview status updated");
    Ok(interview)
}

pub async fn submit_feedback(
    store: &JsonStore,
    interview_id: &str,
    input: FeedbackInput,
) -> Result<Interview, SchedulingError> {
    for (field, value) in [
        ("technical_rating", input.technical_rating),
        ("communication_rating", input.communication_rating),
        ("culture_fit_rating", input.culture_fit_rating),
    ] {
        if !(1..=10).contains(&value) {
            return Err(SchedulingError::RatingOutOfRange { field, value });
        }
    }

    let mut interview = load_interview(store, interview_id).await?;
    if interview.status != InterviewStatus::Completed {
        return Err(SchedulingError::NotCompleted(
            interview.id,
            interview.status.as_str(),
        ));
    }

    interview.feedback = Some(InterviewFeedback {
        technical_rating: input.technical_rating,
        communication_rating: input.communication_rating,
        culture_fit_rating: input.culture_fit_rating,
        notes: input.notes,
        recommendation: input.recommendation,
        feedback_at: Utc::now(),
    });
    store.update(&interview).await?;

    info!(interview_id, "Interview feedback recorded");
    Ok(interview)
}

pub async fn send_reminder(
    store: &JsonStore,
    interview_id: &str,
) -> Result<Notification, SchedulingError> {
    let interview = load_interview(store, interview_id).await?;
    let candidate: Candidate = store
        .get(&interview.candidate_id)
        .await?
        .ok_or_else(|| SchedulingError::UnknownCandidate(interview.candidate_id.clone()))?;
    Ok(interview_reminder(&candidate, &interview))
}

async fn load_interview(store: &JsonStore, interview_id: &str) -> Result<Interview, SchedulingError> {
    store
        .get(interview_id)
        .await?
        .ok_or_else(|| SchedulingError::UnknownInterview(interview_id.to_string()))
}
