use std::sync::Arc;

use crate::config::Config;
use crate::gateway::ResumeGateway;
use crate::workspace::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub gateway: ResumeGateway,
    /// The single live resume and ATS report, plus the single-flight gate.
    pub workspace: Arc<Workspace>,
    pub config: Config,
}
