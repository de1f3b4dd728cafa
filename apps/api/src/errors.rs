use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::gateway::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the triggering action only; the live resume
/// and ATS report are left as they were.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Another action is in progress (rejected: {0})")]
    Busy(String),

    #[error("AI service error: {0}")]
    Extraction(ExtractionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::EmptyInput(what) => {
                AppError::Validation(format!("{what} cannot be empty"))
            }
            other => AppError::Extraction(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Busy(action) => (
                StatusCode::CONFLICT,
                "ACTION_IN_PROGRESS",
                format!("Another action is still running; {action} was not started"),
            ),
            AppError::Extraction(e) => {
                tracing::error!("AI service error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_SERVICE_ERROR",
                    format!("Failed to process request. Please try again. Error: {e}"),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    format!("Failed to generate PDF. Error: {e}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
