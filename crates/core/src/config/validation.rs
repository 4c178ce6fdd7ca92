//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_question_chars` is 0 or exceeds 10000
    /// - `user_agent` or `gemini_model` is empty
    /// - `site_url` or `gemini_base_url` is not an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_question_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "max_question_chars".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_question_chars > 10_000 {
            return Err(ConfigError::Invalid {
                field: "max_question_chars".into(),
                reason: "must not exceed 10000".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.gemini_model.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "gemini_model".into(), reason: "must not be empty".into() });
        }

        validate_http_url("site_url", &self.site_url)?;
        validate_http_url("gemini_base_url", &self.gemini_base_url)?;

        if self.gemini_api_key.is_none() {
            tracing::warn!("gemini_api_key is not set; only cached answers can be served");
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Invalid { field: field.into(), reason: format!("not a valid URL: {e}") })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {other}") }),
    }
}
