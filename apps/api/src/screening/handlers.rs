//! Axum route handlers for scoring, ranking and filtering.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::screening::filter::{filter_candidates, FilterCriteria, FilterResult};
use crate::screening::scoring::{rank_candidates, RankedCandidate, ScoreResult};
use crate::state::AppState;
use crate::store::JsonStore;

#[derive(Debug, Serialize)]
pub struct RankingsResponse {
    pub job_id: String,
    pub job_title: String,
    pub total_candidates: usize,
    pub rankings: Vec<RankedCandidate>,
}

/// Loads a job and every candidate that applied to it.
pub async fn load_job_pool(store: &JsonStore, job_id: &str) -> Result<(Job, Vec<Candidate>), AppError> {
    let job: Job = store.require(job_id).await?;
    let candidates: Vec<Candidate> = store
        .list::<Candidate>()
        .await?
        .into_iter()
        .filter(|c| c.job_id.as_deref() == Some(job_id))
        .collect();
    Ok((job, candidates))
}

/// GET /api/v1/jobs/:id/rankings
///
/// Every applicant of the job, scored and sorted best first.
pub async fn handle_rankings(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<RankingsResponse>, AppError> {
    let (job, candidates) = load_job_pool(&state.store, &job_id).await?;
    let rankings = rank_candidates(state.scorer.as_ref(), &candidates, &job);

    Ok(Json(RankingsResponse {
        job_id: job.id,
        job_title: job.title,
        total_candidates: candidates.len(),
        rankings,
    }))
}

/// POST /api/v1/jobs/:id/filter
///
/// Applies hard constraints over the ranked applicants.
pub async fn handle_filter(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<FilterResult>, AppError> {
    criteria.validate()?;
    let (job, candidates) = load_job_pool(&state.store, &job_id).await?;
    Ok(Json(filter_candidates(
        state.scorer.as_ref(),
        &candidates,
        &job,
        &criteria,
    )))
}

/// GET /api/v1/jobs/:id/candidates/:candidate_id/score
///
/// Scores any stored candidate against the job, applicant or not.
pub async fn handle_score(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(String, String)>,
) -> Result<Json<ScoreResult>, AppError> {
    let job: Job = state.store.require(&job_id).await?;
    let candidate: Candidate = state.store.require(&candidate_id).await?;
    Ok(Json(state.scorer.score(&candidate, &job)?))
}
