//! The structured resume record exchanged with the AI service and the exporter.
//!
//! Field names serialize in camelCase so the same types round-trip through the
//! declared output shape sent to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub portfolio: String,
}

impl ContactInfo {
    /// Phone, email, LinkedIn and portfolio joined with `" | "`, blank fields dropped.
    pub fn contact_line(&self) -> String {
        [&self.phone, &self.email, &self.linkedin, &self.portfolio]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceEntry {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub dates: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    pub graduation_date: String,
}

/// A complete resume. Every AI round-trip produces a brand-new value; nothing
/// edits one in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub contact_info: ContactInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

/// The live resume as held by the workspace.
///
/// `revision` starts at 1 on the first extraction and increments on every
/// replacement. Earlier revisions are not kept.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub revision: u32,
    pub updated_at: DateTime<Utc>,
    pub resume: Resume,
}
