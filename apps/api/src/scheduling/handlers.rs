use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::notification::Notification;
use crate::scheduling::interviews::{
    cancel_interview, reschedule_interview, schedule_interview, send_reminder, submit_feedback,
    update_interview_status, FeedbackInput, ScheduleRequest, ScheduledInterview,
};
use crate::scheduling::slots::{slot_overview, SlotView, DEFAULT_SEARCH_DAYS};
use crate::state::AppState;

/// Longest window the slot overview will render.
const MAX_OVERVIEW_DAYS: u32 = 31;

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub days: Option<u32>,
}

#[derive(Deserialize)]
pub struct RescheduleRequest {
    pub new_time: NaiveDateTime,
}

#[derive(Deserialize, Default)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: InterviewStatus,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let mut interviews: Vec<Interview> = state.store.list().await?;
    interviews.sort_by_key(|i| i.scheduled_time);
    Ok(Json(interviews))
}

/// POST /api/v1/interviews
pub async fn handle_schedule(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduledInterview>), AppError> {
    let scheduled = schedule_interview(&state.store, req, now()).await?;
    Ok((StatusCode::CREATED, Json(scheduled)))
}

/// GET /api/v1/interviews/slots?days=7
pub async fn handle_slots(
    State(state): State<AppState>,
    Query(params): Query<SlotsQuery>,
) -> Result<Json<Vec<SlotView>>, AppError> {
    let days = params.days.unwrap_or(DEFAULT_SEARCH_DAYS);
    if days == 0 || days > MAX_OVERVIEW_DAYS {
        return Err(AppError::Validation(format!(
            "days must be between 1 and {MAX_OVERVIEW_DAYS}"
        )));
    }
    let booked: Vec<Interview> = state.store.list().await?;
    Ok(Json(slot_overview(&booked, now(), days)))
}

/// POST /api/v1/interviews/:id/reschedule
pub async fn handle_reschedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RescheduleRequest>,
) -> Result<Json<Interview>, AppError> {
    let interview = reschedule_interview(&state.store, &id, req.new_time, now()).await?;
    Ok(Json(interview))
}

/// POST /api/v1/interviews/:id/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<CancelRequest>>,
) -> Result<Json<Interview>, AppError> {
    let Json(req) = body.unwrap_or_default();
    Ok(Json(cancel_interview(&state.store, &id, req.reason).await?))
}

/// PATCH /api/v1/interviews/:id/status
pub async fn handle_interview_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Interview>, AppError> {
    Ok(Json(
        update_interview_status(&state.store, &id, req.status).await?,
    ))
}

/// POST /api/v1/interviews/:id/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<FeedbackInput>,
) -> Result<Json<Interview>, AppError> {
    Ok(Json(submit_feedback(&state.store, &id, req).await?))
}

/// POST /api/v1/interviews/:id/reminder
pub async fn handle_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(send_reminder(&state.store, &id).await?))
}
