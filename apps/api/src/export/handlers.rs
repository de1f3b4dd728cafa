//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::export::{export_pdf, preview_layout, LayoutPreview};
use crate::state::AppState;
use crate::workspace::Action;

const NOTHING_TO_EXPORT: &str = "No resume data available to export.";
const PAGE_COUNT_HEADER: &str = "x-page-count";

/// GET /api/v1/resume/export
///
/// Renders the live resume to PDF and returns it as a download.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let _guard = state.workspace.begin(Action::Export)?;
    let stored = state
        .workspace
        .resume()
        .await
        .ok_or_else(|| AppError::Validation(NOTHING_TO_EXPORT.to_string()))?;

    // printpdf's document handle is not Send; build and serialize it on a blocking thread.
    let document = tokio::task::spawn_blocking(move || export_pdf(&stored.resume))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF export task failed: {e}")))??;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        document.file_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::HeaderName::from_static(PAGE_COUNT_HEADER),
                document.pages.to_string(),
            ),
        ],
        Bytes::from(document.bytes),
    )
        .into_response())
}

/// GET /api/v1/resume/layout
///
/// Where every block of the live resume would land on the page, without
/// producing a document.
pub async fn handle_layout_preview(
    State(state): State<AppState>,
) -> Result<Json<LayoutPreview>, AppError> {
    let stored = state
        .workspace
        .resume()
        .await
        .ok_or_else(|| AppError::Validation(NOTHING_TO_EXPORT.to_string()))?;

    Ok(Json(preview_layout(&stored.resume)?))
}
