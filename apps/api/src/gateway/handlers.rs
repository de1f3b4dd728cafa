//! Axum route handlers for the resume actions that go through the AI gateway.
//!
//! Request text is checked before the workspace is claimed, so a rejected
//! request never holds it. The live resume is read only after claiming, so an
//! action always works on the record the previous action left behind. State is
//! replaced only once the gateway call has fully succeeded.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{AtsReport, StoredResume};
use crate::state::AppState;
use crate::workspace::Action;

const PASTE_RESUME_FIRST: &str = "Please paste your resume text first.";
const PARSE_RESUME_FIRST: &str = "Please parse your resume first.";
const ENTER_INSTRUCTION: &str = "Please enter a modification prompt.";
const PASTE_JOB_DESCRIPTION: &str = "Please paste the job description first.";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

// Missing fields default to blank so they hit the precondition message
// instead of a deserialization rejection.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[serde(default)]
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ModifyRequest {
    #[serde(default)]
    pub instruction: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/extract
///
/// Parses pasted resume text into a structured record and makes it the live resume.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<StoredResume>, AppError> {
    require(&request.raw_text, PASTE_RESUME_FIRST)?;

    let _guard = state.workspace.begin(Action::Extract)?;
    let resume = state.gateway.extract(&request.raw_text).await?;
    let stored = state.workspace.replace_resume(resume).await;

    Ok(Json(stored.as_ref().clone()))
}

/// POST /api/v1/resume/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
) -> Result<Json<StoredResume>, AppError> {
    let _guard = state.workspace.begin(Action::Enhance)?;
    let current = live_resume(&state).await?;
    let resume = state.gateway.enhance(&current.resume).await?;
    let stored = state.workspace.replace_resume(resume).await;

    Ok(Json(stored.as_ref().clone()))
}

/// POST /api/v1/resume/modify
///
/// Applies a free-text instruction. A blank instruction never reaches the AI service.
pub async fn handle_modify(
    State(state): State<AppState>,
    Json(request): Json<ModifyRequest>,
) -> Result<Json<StoredResume>, AppError> {
    require(&request.instruction, ENTER_INSTRUCTION)?;

    let _guard = state.workspace.begin(Action::Modify)?;
    let current = live_resume(&state).await?;
    let resume = state
        .gateway
        .modify(&current.resume, &request.instruction)
        .await?;
    let stored = state.workspace.replace_resume(resume).await;

    Ok(Json(stored.as_ref().clone()))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<StoredResume>, AppError> {
    let stored = state
        .workspace
        .resume()
        .await
        .ok_or_else(|| AppError::NotFound("No resume has been parsed yet".to_string()))?;
    Ok(Json(stored.as_ref().clone()))
}

/// POST /api/v1/resume/score
///
/// Scores the live resume against a job description. The previous report is
/// kept if the check fails.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<AtsReport>, AppError> {
    require(&request.job_description, PASTE_JOB_DESCRIPTION)?;

    let _guard = state.workspace.begin(Action::Score)?;
    let current = live_resume(&state).await?;
    let result = state
        .gateway
        .score(&current.resume, &request.job_description)
        .await?;
    let report = state.workspace.replace_ats(result).await;

    Ok(Json(report))
}

/// GET /api/v1/resume/score
pub async fn handle_get_score(State(state): State<AppState>) -> Result<Json<AtsReport>, AppError> {
    state
        .workspace
        .ats_report()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No ATS report available".to_string()))
}

/// DELETE /api/v1/resume/score
///
/// Dismisses the current report. Idempotent.
pub async fn handle_dismiss_score(State(state): State<AppState>) -> StatusCode {
    if state.workspace.dismiss_ats().await {
        tracing::info!("ATS report dismissed");
    }
    StatusCode::NO_CONTENT
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn require(text: &str, message: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

async fn live_resume(state: &AppState) -> Result<Arc<StoredResume>, AppError> {
    state
        .workspace
        .resume()
        .await
        .ok_or_else(|| AppError::Validation(PARSE_RESUME_FIRST.to_string()))
}

