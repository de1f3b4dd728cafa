//! AI Gateway: turns the four resume intents into structured generation calls.
//!
//! Each operation builds a prompt, declares the expected output shape, makes
//! exactly one call through the `TextGenerator`, and deserializes the result
//! into a brand-new typed record. Inputs are never mutated.
//!
//! Preconditions (non-blank text inputs) are checked here before any call is
//! issued. Responses are rejected when they fail to deserialize, when the
//! contact name or email is blank, or when an ATS score falls outside 0..=100.

pub mod handlers;
pub mod prompts;
pub mod schema;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::gateway::prompts::{
    ENHANCE_PROMPT_TEMPLATE, EXTRACT_PROMPT_TEMPLATE, MODIFY_PROMPT_TEMPLATE,
    SCORE_PROMPT_TEMPLATE,
};
use crate::gateway::schema::{ats_schema, resume_schema};
use crate::llm_client::{generate_json, GenerationRequest, LlmError, TextGenerator};
use crate::models::{AtsResult, Resume};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("AI service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("Could not serialize resume for the AI service: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("AI response is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("AI response score {0} is outside 0..=100")]
    ScoreOutOfRange(i64),
}

/// Stateless relay between the application and the text-generation service.
#[derive(Clone)]
pub struct ResumeGateway {
    generator: Arc<dyn TextGenerator>,
}

impl ResumeGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Converts raw pasted resume text into a structured `Resume`.
    pub async fn extract(&self, raw_text: &str) -> Result<Resume, ExtractionError> {
        require_text(raw_text, "resume text")?;

        let prompt = fill_template(EXTRACT_PROMPT_TEMPLATE, &[("resume_text", raw_text)]);
        let resume = self.request_resume(prompt, true).await?;

        info!(
            work_entries = resume.work_experience.len(),
            education_entries = resume.education.len(),
            skills = resume.skills.len(),
            "Resume extracted"
        );
        Ok(resume)
    }

    /// Rewrites the resume for stronger wording without adding new facts.
    pub async fn enhance(&self, resume: &Resume) -> Result<Resume, ExtractionError> {
        let resume_json = to_pretty_json(resume)?;
        let prompt = fill_template(ENHANCE_PROMPT_TEMPLATE, &[("resume_json", &resume_json)]);
        self.request_resume(prompt, false).await
    }

    /// Applies a free-text user instruction to the resume.
    pub async fn modify(
        &self,
        resume: &Resume,
        instruction: &str,
    ) -> Result<Resume, ExtractionError> {
        require_text(instruction, "modification instruction")?;

        let resume_json = to_pretty_json(resume)?;
        let prompt = fill_template(
            MODIFY_PROMPT_TEMPLATE,
            &[("instruction", instruction), ("resume_json", &resume_json)],
        );
        self.request_resume(prompt, false).await
    }

    /// Scores the resume against a job description.
    pub async fn score(
        &self,
        resume: &Resume,
        job_description: &str,
    ) -> Result<AtsResult, ExtractionError> {
        require_text(job_description, "job description")?;

        let resume_json = to_pretty_json(resume)?;
        let prompt = fill_template(
            SCORE_PROMPT_TEMPLATE,
            &[
                ("job_description", job_description),
                ("resume_json", &resume_json),
            ],
        );
        let request = GenerationRequest {
            prompt,
            schema: ats_schema(),
            low_latency: false,
        };

        let result: AtsResult = generate_json(self.generator.as_ref(), &request).await?;
        validate_ats(&result)?;

        info!(score = result.score, "ATS score computed");
        Ok(result)
    }

    async fn request_resume(
        &self,
        prompt: String,
        low_latency: bool,
    ) -> Result<Resume, ExtractionError> {
        let request = GenerationRequest {
            prompt,
            schema: resume_schema(),
            low_latency,
        };
        let resume: Resume = generate_json(self.generator.as_ref(), &request).await?;
        validate_resume(&resume)?;
        Ok(resume)
    }
}

fn require_text(value: &str, what: &'static str) -> Result<(), ExtractionError> {
    if value.trim().is_empty() {
        Err(ExtractionError::EmptyInput(what))
    } else {
        Ok(())
    }
}

fn to_pretty_json(resume: &Resume) -> Result<String, ExtractionError> {
    serde_json::to_string_pretty(resume).map_err(ExtractionError::Serialize)
}

fn validate_resume(resume: &Resume) -> Result<(), ExtractionError> {
    if resume.contact_info.name.trim().is_empty() {
        return Err(ExtractionError::MissingField("contactInfo.name"));
    }
    if resume.contact_info.email.trim().is_empty() {
        return Err(ExtractionError::MissingField("contactInfo.email"));
    }
    Ok(())
}

fn validate_ats(result: &AtsResult) -> Result<(), ExtractionError> {
    if (0..=100).contains(&result.score) {
        Ok(())
    } else {
        Err(ExtractionError::ScoreOutOfRange(result.score))
    }
}

/// Substitutes `{key}` placeholders in a single left-to-right pass, so text
/// pasted by the user is never itself scanned for placeholders.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let substituted = tail.find('}').and_then(|close| {
            let key = &tail[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
