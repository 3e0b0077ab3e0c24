use axum::{extract::State, http::header, response::IntoResponse, Json};
use chrono::Local;

use crate::analytics::summary::{
    dashboard_stats, recruitment_report, summarize, AnalyticsSummary, DashboardStats,
};
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::job::Job;
use crate::state::AppState;
use crate::store::{JsonStore, StoreError};

async fn load_all(store: &JsonStore) -> Result<(Vec<Candidate>, Vec<Job>, Vec<Interview>), StoreError> {
    Ok((store.list().await?, store.list().await?, store.list().await?))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let (candidates, jobs, interviews) = load_all(&state.store).await?;
    Ok(Json(dashboard_stats(&candidates, &jobs, &interviews)))
}

/// GET /api/v1/analytics
pub async fn handle_analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let (candidates, jobs, interviews) = load_all(&state.store).await?;
    Ok(Json(summarize(&candidates, &jobs, &interviews)))
}

/// GET /api/v1/analytics/report
/// Plain-text recruitment report.
pub async fn handle_report(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (candidates, jobs, interviews) = load_all(&state.store).await?;
    let summary = summarize(&candidates, &jobs, &interviews);
    let report = recruitment_report(&summary, Local::now().naive_local());
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], report))
}
