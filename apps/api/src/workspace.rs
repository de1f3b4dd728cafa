//! Process-local home of the live resume and the latest ATS report.
//!
//! Records are only ever replaced, never edited in place. At most one action
//! (extract, enhance, modify, score, export) may be outstanding at a time:
//! `begin` hands out a guard, and a second caller is turned away with
//! `AppError::Busy` rather than queued.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{AtsReport, AtsResult, Resume, StoredResume};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Extract,
    Enhance,
    Modify,
    Score,
    Export,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Extract => "extract",
            Action::Enhance => "enhance",
            Action::Modify => "modify",
            Action::Score => "score",
            Action::Export => "export",
        };
        f.write_str(name)
    }
}

#[derive(Default)]
struct Slots {
    resume: Option<Arc<StoredResume>>,
    ats: Option<AtsReport>,
}

#[derive(Default)]
pub struct Workspace {
    busy: AtomicBool,
    slots: RwLock<Slots>,
}

/// Releases the single-flight flag when dropped, whether the action succeeded or not.
#[must_use = "the action is released as soon as the guard is dropped"]
pub struct FlightGuard<'a> {
    busy: &'a AtomicBool,
    action: Action,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        info!(action = %self.action, "Action finished");
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the workspace for `action`, or fails if another action is running.
    pub fn begin(&self, action: Action) -> Result<FlightGuard<'_>, AppError> {
        match self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                info!(%action, "Action started");
                Ok(FlightGuard {
                    busy: &self.busy,
                    action,
                })
            }
            Err(_) => {
                warn!(%action, "Rejected action: another action is in progress");
                Err(AppError::Busy(action.to_string()))
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn resume(&self) -> Option<Arc<StoredResume>> {
        self.slots.read().await.resume.clone()
    }

    /// Installs `resume` as the sole live record and returns it.
    pub async fn replace_resume(&self, resume: Resume) -> Arc<StoredResume> {
        let mut slots = self.slots.write().await;
        let revision = slots.resume.as_ref().map_or(1, |r| r.revision + 1);
        let stored = Arc::new(StoredResume {
            revision,
            updated_at: Utc::now(),
            resume,
        });
        slots.resume = Some(stored.clone());
        stored
    }

    pub async fn ats_report(&self) -> Option<AtsReport> {
        self.slots.read().await.ats.clone()
    }

    pub async fn replace_ats(&self, result: AtsResult) -> AtsReport {
        let report = AtsReport::new(result);
        self.slots.write().await.ats = Some(report.clone());
        report
    }

    /// Drops the current ATS report. Returns whether there was one.
    pub async fn dismiss_ats(&self) -> bool {
        self.slots.write().await.ats.take().is_some()
    }
}
