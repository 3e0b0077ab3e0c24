use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::hr::review::{
    generate_hr_report, make_final_decision, present_candidates, process_hr_feedback,
    review_candidate, CandidatePresentation, DecisionInput, DecisionOutcome, HrAction,
    HrFeedbackOutcome, HrReport, ReviewInput,
};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::notification::Notification;
use crate::notifications::{custom_message, status_update};
use crate::screening::handlers::load_job_pool;
use crate::screening::scoring::rank_candidates;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CandidateQuery {
    pub job_id: Option<String>,
    pub status: Option<CandidateStatus>,
}

#[derive(Deserialize)]
pub struct HrFeedbackRequest {
    pub action: HrAction,
    pub candidate_id: String,
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: CandidateStatus,
    /// Replaces the templated status letter.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct StatusUpdateResponse {
    pub candidate: Candidate,
    pub notification: Notification,
}

#[derive(Deserialize)]
pub struct NotifyRequest {
    pub subject: String,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateQuery>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let candidates: Vec<Candidate> = state.store.list().await?;
    Ok(Json(
        candidates
            .into_iter()
            .filter(|c| {
                params
                    .job_id
                    .as_deref()
                    .map_or(true, |job_id| c.job_id.as_deref() == Some(job_id))
            })
            .filter(|c| params.status.map_or(true, |status| c.status == status))
            .collect(),
    ))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    Ok(Json(state.store.require(&id).await?))
}

/// PATCH /api/v1/candidates/:id/status
pub async fn handle_candidate_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let candidate = state.store.update_candidate_status(&id, req.status).await?;
    let notification = status_update(&candidate, req.status, req.message.as_deref());
    Ok(Json(StatusUpdateResponse {
        candidate,
        notification,
    }))
}

/// POST /api/v1/candidates/:id/review
pub async fn handle_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewInput>,
) -> Result<Json<Candidate>, AppError> {
    Ok(Json(review_candidate(&state.store, &id, req).await?))
}

/// POST /api/v1/candidates/:id/decision
pub async fn handle_decision(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DecisionInput>,
) -> Result<Json<DecisionOutcome>, AppError> {
    Ok(Json(make_final_decision(&state.store, &id, req).await?))
}

/// POST /api/v1/candidates/:id/notify
pub async fn handle_notify(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NotifyRequest>,
) -> Result<Json<Notification>, AppError> {
    if req.subject.trim().is_empty() || req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "subject and message are required".to_string(),
        ));
    }
    let candidate: Candidate = state.store.require(&id).await?;
    Ok(Json(custom_message(&candidate, &req.subject, &req.message)))
}

// ────────────────────────────────────────────────────────────────────────────
// HR review
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/hr/feedback
pub async fn handle_hr_feedback(
    State(state): State<AppState>,
    Json(req): Json<HrFeedbackRequest>,
) -> Result<Json<HrFeedbackOutcome>, AppError> {
    Ok(Json(
        process_hr_feedback(&state.store, req.action, &req.candidate_id).await?,
    ))
}

/// GET /api/v1/jobs/:id/presentation
pub async fn handle_presentation(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<CandidatePresentation>, AppError> {
    let (job, candidates) = load_job_pool(&state.store, &job_id).await?;
    let ranked = rank_candidates(state.scorer.as_ref(), &candidates, &job);
    Ok(Json(present_candidates(&ranked, &job)))
}

/// GET /api/v1/jobs/:id/report
pub async fn handle_hr_report(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<HrReport>, AppError> {
    let (job, candidates) = load_job_pool(&state.store, &job_id).await?;
    let ranked = rank_candidates(state.scorer.as_ref(), &candidates, &job);
    Ok(Json(generate_hr_report(&ranked, &job)))
}
