pub mod ats;
pub mod resume;

pub use ats::{AtsReport, AtsResult};
pub use resume::{ContactInfo, EducationEntry, Resume, StoredResume, WorkExperienceEntry};
