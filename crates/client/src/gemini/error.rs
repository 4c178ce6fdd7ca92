//! Gemini API client error types.

use std::sync::Arc;

use intelliask_core::{ConfigError, Error};

/// Errors from the Gemini API client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// No API key configured.
    #[error("missing API key: INTELLIASK_GEMINI_API_KEY or GEMINI_API_KEY not set")]
    MissingApiKey,

    /// Authentication failed (invalid or unauthorised API key).
    #[error("authentication failed: {0}")]
    AuthError(String),

    /// Rate limited by the Gemini API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// Non-success HTTP status, with the API's error message when it sent one.
    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Successful status, but no candidate text in the body.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GeminiError::Timeout } else { GeminiError::Network(Arc::new(err)) }
    }
}

impl From<GeminiError> for Error {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => Error::Config(ConfigError::Missing {
                field: "gemini_api_key".into(),
                hint: "Set INTELLIASK_GEMINI_API_KEY or GEMINI_API_KEY environment variable".into(),
            }),
            GeminiError::MalformedResponse(detail) => Error::MalformedResponse(detail),
            other => Error::GatewayFailure(other.to_string()),
        }
    }
}
