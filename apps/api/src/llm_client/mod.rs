//! LLM client: the single point of entry for all text-generation calls.
//!
//! No other module calls the Gemini API directly. Everything goes through
//! the `TextGenerator` trait so the gateway can be exercised against a
//! scripted generator in tests.
//!
//! One request produces one complete response. There is no retry, no streaming,
//! and no local timeout beyond what the transport provides.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Default model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Generation stopped early (finish reason: {0})")]
    Incomplete(String),
}

/// A single structured-output generation request.
///
/// `schema` is the declared output shape, passed to the service verbatim.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
    /// Skip the model's thinking phase. Used for plain extraction.
    pub low_latency: bool,
}

/// Anything that can turn a `GenerationRequest` into raw response text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Text of the first candidate. A candidate that stopped for any reason
    /// other than `STOP` (token limit, safety filter) is an error even when it
    /// carries partial text.
    pub fn candidate_text(&self) -> Result<String, LlmError> {
        let reason = self
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());
        if let Some(reason) = reason.filter(|r| *r != "STOP") {
            return Err(LlmError::Incomplete(reason.to_string()));
        }
        self.text().ok_or(LlmError::EmptyContent)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String, api_base: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = build_request_body(request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_token_count.unwrap_or_default(),
                output_tokens = usage.candidates_token_count.unwrap_or_default(),
                "LLM call succeeded"
            );
        }

        parsed.candidate_text()
    }
}

fn build_request_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: &request.schema,
            thinking_config: request
                .low_latency
                .then_some(ThinkingConfig { thinking_budget: 0 }),
        },
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Calls the generator and deserializes the response text as JSON.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
) -> Result<T, LlmError> {
    let text = generator.generate(request).await?;
    let text = strip_json_fences(&text);
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
