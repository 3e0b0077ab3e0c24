//! Intake: turns resume text into a stored `Candidate`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{ChatModel, LlmError};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::job::Job;
use crate::models::new_id;
use crate::resume::fields::{extract_fields, ExtractedFields};
use crate::resume::prompts::resume_assistant_system;
use crate::resume::text::{extract_document_text, ExtractionError};
use crate::store::JsonStore;

const UNKNOWN_NAME: &str = "Unknown";

/// A resume file received over HTTP.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedResume {
    pub candidate: Candidate,
    pub parsed_data: ExtractedFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateValidation {
    pub is_valid: bool,
    pub missing_fields: Vec<&'static str>,
}

/// Builds a fresh candidate from extracted fields. Nothing is stored.
pub fn candidate_from_fields(
    fields: &ExtractedFields,
    job_id: Option<String>,
    resume_path: Option<String>,
) -> Candidate {
    Candidate {
        id: new_id(),
        name: fields
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        email: fields.email.clone().unwrap_or_default(),
        phone: fields.phone.clone(),
        skills: fields.skills.clone(),
        experience: fields.experience.clone(),
        education: fields.education.clone(),
        resume_path,
        job_id,
        status: CandidateStatus::New,
        review: None,
        final_decision: None,
        created_at: Utc::now(),
    }
}

/// Runs field extraction over `text` and wraps the result in a new candidate.
pub fn process_resume(
    text: &str,
    job_id: Option<String>,
    resume_path: Option<String>,
) -> Result<ProcessedResume, AppError> {
    let parsed_data = extract_fields(text)?;
    let candidate = candidate_from_fields(&parsed_data, job_id, resume_path);
    Ok(ProcessedResume {
        candidate,
        parsed_data,
    })
}

/// Name and email are required. "Unknown" counts as a missing name.
pub fn validate_candidate(candidate: &Candidate) -> CandidateValidation {
    let mut missing_fields = Vec::new();
    if candidate.name.trim().is_empty() || candidate.name == UNKNOWN_NAME {
        missing_fields.push("name");
    }
    if candidate.email.trim().is_empty() {
        missing_fields.push("email");
    }
    CandidateValidation {
        is_valid: missing_fields.is_empty(),
        missing_fields,
    }
}

/// Extracts, builds and stores a candidate. A `job_id`, when given, must exist.
pub async fn submit_resume(
    store: &JsonStore,
    text: &str,
    job_id: Option<String>,
    resume_path: Option<String>,
) -> Result<ProcessedResume, AppError> {
    let job_id = job_id.filter(|id| !id.trim().is_empty());
    if let Some(id) = &job_id {
        if store.get::<Job>(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
    }

    let processed = process_resume(text, job_id, resume_path)?;
    store.append(&processed.candidate).await?;

    info!(
        "Stored candidate {} ({} skills extracted)",
        processed.candidate.id,
        processed.candidate.skills.len()
    );
    Ok(processed)
}

/// Text of an uploaded document. Extraction is CPU-bound, so it runs on the
/// blocking pool; a panic inside the PDF parser is reported as an unreadable file.
pub async fn extract_upload_text(upload: &UploadedResume) -> Result<String, AppError> {
    let file_name = upload.file_name.clone();
    let data = upload.data.clone();
    match tokio::task::spawn_blocking(move || extract_document_text(&file_name, &data)).await {
        Ok(result) => Ok(result?),
        Err(e) if e.is_panic() => Err(ExtractionError::Pdf(format!(
            "{} could not be parsed",
            upload.file_name
        ))
        .into()),
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "spawn_blocking failed in text extraction: {e}"
        ))),
    }
}

/// Writes an uploaded file under `dir` as `<uuid>_<sanitized name>`.
pub async fn save_resume_file(dir: &Path, upload: &UploadedResume) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!("{}_{}", new_id(), sanitize_file_name(&upload.file_name)));
    tokio::fs::write(&path, &upload.data)
        .await
        .with_context(|| format!("Failed to save resume to {}", path.display()))?;
    info!("Saved resume upload to {}", path.display());
    Ok(path)
}

/// Keeps only the final path component, replacing anything outside `[A-Za-z0-9._-]`.
fn sanitize_file_name(raw: &str) -> String {
    let base = Path::new(raw)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(|c| c == '.' || c == '_').is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

/// One conversational turn with the resume assistant. `context` is embedded
/// in the system prompt verbatim.
pub async fn chat_with_candidate(
    chat: &dyn ChatModel,
    message: &str,
    context: &Value,
) -> Result<String, LlmError> {
    let system = resume_assistant_system(&context.to_string());
    chat.complete(message, &system).await
}
