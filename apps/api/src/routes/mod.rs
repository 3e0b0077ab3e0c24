pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::hr::handlers as hr;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::scheduling::handlers as interviews;
use crate::screening::handlers as screening;
use crate::state::AppState;

/// Multipart framing on top of the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = resume::MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analytics
        .route("/api/v1/dashboard", get(analytics::handle_dashboard))
        .route("/api/v1/analytics", get(analytics::handle_analytics))
        .route("/api/v1/analytics/report", get(analytics::handle_report))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route("/api/v1/jobs/:id/status", patch(jobs::handle_job_status))
        // Screening
        .route("/api/v1/jobs/:id/rankings", get(screening::handle_rankings))
        .route("/api/v1/jobs/:id/filter", post(screening::handle_filter))
        .route(
            "/api/v1/jobs/:id/candidates/:candidate_id/score",
            get(screening::handle_score),
        )
        .route("/api/v1/jobs/:id/presentation", get(hr::handle_presentation))
        .route("/api/v1/jobs/:id/report", get(hr::handle_hr_report))
        // Resume intake
        .route("/api/v1/resumes/extract", post(resume::handle_extract))
        .route("/api/v1/resumes/text", post(resume::handle_submit_text))
        .route(
            "/api/v1/resumes/upload",
            post(resume::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/resumes/chat", post(resume::handle_chat))
        // Candidates and HR review
        .route("/api/v1/candidates", get(hr::handle_list_candidates))
        .route("/api/v1/candidates/:id", get(hr::handle_get_candidate))
        .route(
            "/api/v1/candidates/:id/status",
            patch(hr::handle_candidate_status),
        )
        .route("/api/v1/candidates/:id/review", post(hr::handle_review))
        .route("/api/v1/candidates/:id/decision", post(hr::handle_decision))
        .route("/api/v1/candidates/:id/notify", post(hr::handle_notify))
        .route("/api/v1/hr/feedback", post(hr::handle_hr_feedback))
        // Interviews
        .route(
            "/api/v1/interviews",
            get(interviews::handle_list_interviews).post(interviews::handle_schedule),
        )
        .route("/api/v1/interviews/slots", get(interviews::handle_slots))
        .route(
            "/api/v1/interviews/:id/reschedule",
            post(interviews::handle_reschedule),
        )
        .route("/api/v1/interviews/:id/cancel", post(interviews::handle_cancel))
        .route(
            "/api/v1/interviews/:id/status",
            patch(interviews::handle_interview_status),
        )
        .route(
            "/api/v1/interviews/:id/feedback",
            post(interviews::handle_feedback),
        )
        .route(
            "/api/v1/interviews/:id/reminder",
            post(interviews::handle_reminder),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::screening::scoring::WeightedScorer;
    use crate::store::JsonStore;

    fn test_state(dir: &std::path::Path) -> AppState {
        let config = Config::with_data_dir(dir);
        AppState {
            store: JsonStore::new(&config.data_dir),
            config,
            scorer: Arc::new(WeightedScorer),
            chat: None,
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com\n\
        Senior engineer with 6 years of experience in Python, SQL and Docker.\n\
        Bachelor of Science in Computer Science.";

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "recruit-api");
    }

    #[tokio::test]
    async fn test_job_and_resume_flow_ranks_applicant() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));

        let response = send(
            &app,
            "POST",
            "/api/v1/jobs",
            Some(json!({
                "title": "Backend Engineer",
                "description": "Build APIs",
                "skills_required": "Python, SQL",
                "experience_level": "Mid",
                "department": "Engineering"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let job_id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            "POST",
            "/api/v1/resumes/text",
            Some(json!({ "text": RESUME, "job_id": job_id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let submitted = json_body(response).await;
        assert_eq!(submitted["candidate"]["email"], "jane.doe@example.com");
        assert_eq!(submitted["candidate"]["status"], "new");

        let response = send(&app, "GET", &format!("/api/v1/jobs/{job_id}/rankings"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let rankings = json_body(response).await;
        assert_eq!(rankings["total_candidates"], 1);
        assert_eq!(rankings["rankings"][0]["skill_match_score"], 100.0);

        let response = send(&app, "GET", "/api/v1/dashboard", None).await;
        let dashboard = json_body(response).await;
        assert_eq!(dashboard["total_candidates"], 1);
        assert_eq!(dashboard["active_jobs"], 1);
        assert_eq!(dashboard["pending_reviews"], 1);
    }

    #[tokio::test]
    async fn test_resume_for_unknown_job_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(
            &app,
            "POST",
            "/api/v1/resumes/text",
            Some(json!({ "text": RESUME, "job_id": "nope" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_empty_resume_text_is_unprocessable() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(
            &app,
            "POST",
            "/api/v1/resumes/extract",
            Some(json!({ "text": "   " })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_upload_is_unprocessable() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let boundary = "recruit-upload-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"resume.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 truncated garbage\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_chat_without_key_is_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(
            &app,
            "POST",
            "/api/v1/resumes/chat",
            Some(json!({ "message": "Summarize", "context": {} })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_filter_rejects_threshold_out_of_range() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(
            &app,
            "POST",
            "/api/v1/jobs/any/filter",
            Some(json!({ "score_threshold": 150.0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_slots_rejects_zero_days() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(&app, "GET", "/api/v1/interviews/slots?days=0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_interview_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(&app, "POST", "/api/v1/interviews/INT_missing/reminder", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_is_plain_text() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(test_state(tmp.path()));
        let response = send(&app, "GET", "/api/v1/analytics/report", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("RECRUITMENT REPORT"));
    }
}
