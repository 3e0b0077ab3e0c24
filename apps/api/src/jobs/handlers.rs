use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::postings::{build_job, NewJob};
use crate::models::job::{Job, JobStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct JobQuery {
    pub status: Option<JobStatus>,
}

#[derive(Deserialize)]
pub struct JobStatusRequest {
    pub status: JobStatus,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = build_job(req)?;
    state.store.append(&job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs: Vec<Job> = state.store.list().await?;
    Ok(Json(
        jobs.into_iter()
            .filter(|j| params.status.map_or(true, |status| j.status == status))
            .collect(),
    ))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.store.require(&id).await?))
}

/// PATCH /api/v1/jobs/:id/status
pub async fn handle_job_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<JobStatusRequest>,
) -> Result<Json<Job>, AppError> {
    let mut job: Job = state.store.require(&id).await?;
    job.status = req.status;
    state.store.update(&job).await?;
    Ok(Json(job))
}
