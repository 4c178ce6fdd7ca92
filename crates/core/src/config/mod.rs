//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (INTELLIASK_*)
//! 2. GEMINI_API_KEY, for the API key only
//! 3. TOML config file (if INTELLIASK_CONFIG_FILE set)
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Durable medium backing the answer cache and the question registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per key under `data_dir`.
    #[default]
    Fs,
    /// Key/value table in the SQLite database at `db_path`.
    Sqlite,
    /// Process memory; nothing survives a restart.
    Memory,
}

/// What to do when the generation endpoint answers without candidate text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedResponsePolicy {
    /// Surface a gateway failure; nothing is cached.
    #[default]
    Fail,
    /// Cache and return the fixed fallback answer.
    CacheFallback,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (INTELLIASK_*)
/// 2. TOML config file (if INTELLIASK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key used for answer generation.
    ///
    /// Set via INTELLIASK_GEMINI_API_KEY, or the bare GEMINI_API_KEY.
    /// Required only when an answer is not cached yet.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Generation model name.
    ///
    /// Set via INTELLIASK_GEMINI_MODEL environment variable.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Base URL of the Generative Language API.
    ///
    /// Set via INTELLIASK_GEMINI_BASE_URL environment variable.
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Storage backend: fs, sqlite or memory.
    ///
    /// Set via INTELLIASK_STORAGE_BACKEND environment variable.
    #[serde(default)]
    pub storage_backend: StorageBackend,

    /// Root directory for the fs backend.
    ///
    /// Set via INTELLIASK_DATA_DIR environment variable.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Path to the SQLite database for the sqlite backend.
    ///
    /// Set via INTELLIASK_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via INTELLIASK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via INTELLIASK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Submitted questions are cut to this many characters.
    ///
    /// Set via INTELLIASK_MAX_QUESTION_CHARS environment variable.
    #[serde(default = "default_max_question_chars")]
    pub max_question_chars: usize,

    /// Handling of generation responses without candidate text.
    ///
    /// Set via INTELLIASK_MALFORMED_RESPONSE environment variable (fail | cache_fallback).
    #[serde(default)]
    pub malformed_response: MalformedResponsePolicy,

    /// Public site URL used for sitemap entries.
    ///
    /// Set via INTELLIASK_SITE_URL environment variable.
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-latest".into()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./intelliask.sqlite")
}

fn default_user_agent() -> String {
    "intelliask/0.1".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_question_chars() -> usize {
    500
}

fn default_site_url() -> String {
    "https://intelliask.netlify.app".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            storage_backend: StorageBackend::Fs,
            data_dir: default_data_dir(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_question_chars: default_max_question_chars(),
            malformed_response: MalformedResponsePolicy::Fail,
            site_url: default_site_url(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `INTELLIASK_`
    /// 2. `GEMINI_API_KEY`, for the API key only
    /// 3. TOML file from `INTELLIASK_CONFIG_FILE` (if set)
    /// 4. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("INTELLIASK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::raw().only(&["GEMINI_API_KEY"]).map(|key| key.as_str().to_lowercase().into()));

        figment = figment.merge(
            Env::prefixed("INTELLIASK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
