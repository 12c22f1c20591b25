//! Gemini REST client shared by every generation service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors from text generation services.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Missing API key: set llm.api_key or GOOGLE_API_KEY")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Model {model} returned no candidates")]
    EmptyResponse { model: String },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

/// Configuration for the generation services.
///
/// Loaded from the `[llm]` section of `graphqa.toml` or
/// `GRAPHQA__LLM__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Falls back to the `GOOGLE_API_KEY` environment variable.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub query_model: String,
    #[serde(default = "default_model")]
    pub answer_model: String,
    #[serde(default = "default_model")]
    pub judge_model: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_key() -> String {
    std::env::var("GOOGLE_API_KEY").unwrap_or_default()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            query_model: default_model(),
            answer_model: default_model(),
            judge_model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Requested shape of the model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        Some(parts.into_iter().filter_map(|p| p.text).collect())
    }
}

/// Gemini client. Clone is cheap (the HTTP client is reference counted).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    pub(crate) query_model: String,
    pub(crate) answer_model: String,
    pub(crate) judge_model: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query_model: config.query_model.clone(),
            answer_model: config.answer_model.clone(),
            judge_model: config.judge_model.clone(),
        })
    }

    /// Issue one temperature-zero generation request and return its text.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, LlmError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let body = build_request(prompt, format);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.into_text().ok_or_else(|| LlmError::EmptyResponse {
            model: model.to_string(),
        })?;

        tracing::debug!(model, chars = text.len(), "Model response received");
        Ok(text)
    }
}

fn build_request(prompt: &str, format: ResponseFormat) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.0,
            response_mime_type: match format {
                ResponseFormat::Json => Some("application/json"),
                ResponseFormat::Text => None,
            },
        },
    }
}

/// Remove a surrounding Markdown code fence, if any.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (```json, ```cypher) on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().trim_end_matches("```").trim()
}
