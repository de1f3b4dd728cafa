// Document exporter: paginates the live resume onto A4 pages.
// The sweep is CPU-bound and printpdf's document handle is not Send, so the
// whole export runs inside tokio::task::spawn_blocking (see handlers.rs).

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;
pub mod surface;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::Resume;

pub use layout::{layout_resume, LayoutReport};
pub use surface::{DrawOp, PageSize, RecordingSurface};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF backend error: {0}")]
    Pdf(String),

    #[error("Resume has no contact name to title the document")]
    MissingName,
}

/// Finished PDF plus the metadata the HTTP layer needs.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub pages: u32,
}

/// `"<Name>_Resume.pdf"` with every whitespace character in the name
/// replaced by an underscore.
pub fn export_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{stem}_Resume.pdf")
}

/// Renders `resume` to PDF bytes.
pub fn export_pdf(resume: &Resume) -> Result<ExportedDocument, ExportError> {
    let name = resume.contact_info.name.trim();
    if name.is_empty() {
        return Err(ExportError::MissingName);
    }

    let mut surface = pdf::PdfSurface::new(&format!("{name} Resume"), PageSize::A4)?;
    let report = layout_resume(resume, &mut surface)?;
    let bytes = surface.finish()?;

    info!(
        pages = report.pages,
        bytes = bytes.len(),
        "Exported resume to PDF"
    );

    Ok(ExportedDocument {
        file_name: export_file_name(name),
        bytes,
        pages: report.pages,
    })
}

/// Block placements plus every draw call the PDF backend would receive.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutPreview {
    #[serde(flatten)]
    pub report: LayoutReport,
    pub ops: Vec<DrawOp>,
}

/// Runs the same sweep against a recording surface, so callers can see where
/// every block would land without producing a document.
pub fn preview_layout(resume: &Resume) -> Result<LayoutPreview, ExportError> {
    let mut surface = RecordingSurface::new(PageSize::A4);
    let report = layout_resume(resume, &mut surface)?;
    debug_assert_eq!(surface.page_count(), report.pages);

    Ok(LayoutPreview {
        report,
        ops: surface.into_ops(),
    })
}
