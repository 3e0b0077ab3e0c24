//! Axum route handlers for resume intake.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::resume::fields::{extract_fields, ExtractedFields};
use crate::resume::intake::{
    chat_with_candidate, extract_upload_text, save_resume_file, submit_resume, validate_candidate,
    CandidateValidation, UploadedResume,
};
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub parsed_data: ExtractedFields,
}

#[derive(Debug, Deserialize)]
pub struct SubmitTextRequest {
    pub text: String,
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub candidate: Candidate,
    pub parsed_data: ExtractedFields,
    pub validation: CandidateValidation,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Value,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/extract
///
/// Runs field extraction without storing anything.
pub async fn handle_extract(
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let parsed_data = extract_fields(&request.text)?;
    Ok(Json(ExtractResponse { parsed_data }))
}

/// POST /api/v1/resumes/text
///
/// Creates a candidate from pasted resume text.
pub async fn handle_submit_text(
    State(state): State<AppState>,
    Json(request): Json<SubmitTextRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let processed = submit_resume(&state.store, &request.text, request.job_id, None).await?;
    let validation = validate_candidate(&processed.candidate);
    Ok(Json(SubmitResponse {
        candidate: processed.candidate,
        parsed_data: processed.parsed_data,
        validation,
    }))
}

/// POST /api/v1/resumes/upload
///
/// Multipart form: `file` (PDF, TXT or MD) and optional `job_id`.
/// The file is kept under the resumes directory and referenced from the candidate.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmitResponse>, AppError> {
    let mut upload: Option<UploadedResume> = None;
    let mut job_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::Validation(
                        "File too large. Maximum size is 10MB".to_string(),
                    ));
                }
                upload = Some(UploadedResume { file_name, data });
            }
            "job_id" => {
                job_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid job_id: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let text = extract_upload_text(&upload).await?;
    let path = save_resume_file(&state.config.resumes_dir, &upload).await?;

    let processed = submit_resume(
        &state.store,
        &text,
        job_id,
        Some(path.to_string_lossy().into_owned()),
    )
    .await?;
    let validation = validate_candidate(&processed.candidate);

    Ok(Json(SubmitResponse {
        candidate: processed.candidate,
        parsed_data: processed.parsed_data,
        validation,
    }))
}

/// POST /api/v1/resumes/chat
///
/// One turn with the resume assistant. Requires a configured LLM key.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let chat = state.chat.as_deref().ok_or(AppError::LlmUnavailable)?;

    let reply = chat_with_candidate(chat, &request.message, &request.context).await?;
    Ok(Json(ChatResponse { reply }))
}
