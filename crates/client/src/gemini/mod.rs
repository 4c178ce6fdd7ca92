//! Gemini API client.
//!
//! Generates answers through the Generative Language API.
//!
//! ### Specification
//!
//! - **Endpoint**: `{base_url}/models/{model}:generateContent`
//! - **Authentication**: Uses `x-goog-api-key` header.
//! - **Extraction**: First candidate, first content part, `text`.
//! - **Failures**: Surfaced immediately, never retried.

pub mod error;
pub mod request;
pub mod response;

pub use error::GeminiError;
pub use request::GenerateContentRequest;
pub use response::GenerateContentResponse;

use async_trait::async_trait;
use intelliask_core::{AnswerGenerator, AppConfig, Error};
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "intelliask/0.1";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; checked on each call so cached answers work without one.
    pub api_key: Option<String>,
    /// Base URL (default: https://generativelanguage.googleapis.com/v1beta).
    pub base_url: String,
    /// Model name (default: gemini-1.5-flash-latest).
    pub model: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: Arc<GeminiConfig>,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| GeminiError::Network(Arc::new(e)))?;

        Ok(Self::with_http(http, config))
    }

    pub(crate) fn with_http(http: reqwest::Client, config: GeminiConfig) -> Self {
        Self { http, config: Arc::new(config) }
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url.trim_end_matches('/'), self.config.model)
    }

    /// Send `prompt` and return the first candidate's text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        let start = Instant::now();
        tracing::debug!(model = %self.config.model, prompt_chars = prompt.chars().count(), "calling Gemini API");

        let http_response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header(header::ACCEPT, "application/json")
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            let body = http_response.text().await.unwrap_or_default();
            let message = response::api_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

            return Err(match status.as_u16() {
                401 | 403 => GeminiError::AuthError(message),
                429 => GeminiError::RateLimited,
                code => GeminiError::HttpError { status: code, message },
            });
        }

        let bytes = http_response.bytes().await?;
        let api_response: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| GeminiError::MalformedResponse(format!("invalid JSON: {e}")))?;

        let text = api_response
            .first_text()
            .ok_or_else(|| GeminiError::MalformedResponse(api_response.missing_text_reason()))?
            .to_string();

        tracing::debug!("generation completed in {:?}, {} chars", start.elapsed(), text.len());
        Ok(text)
    }
}

#[async_trait]
impl AnswerGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.generate_content(prompt).await.map_err(Error::from)
    }
}
