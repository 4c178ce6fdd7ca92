//! Unified error types for intelliask.
//!
//! Every failure the question service can surface is one of these variants;
//! the prefix in each message doubles as a stable error code for callers.

use crate::config::ConfigError;
use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the intelliask core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty or whitespace-only question text.
    #[error("MISSING_INPUT: {0}")]
    MissingInput(String),

    /// Slug that cannot address a cached answer (path separators, dot segments).
    #[error("INVALID_SLUG: {0}")]
    InvalidSlug(String),

    /// Required configuration absent or invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// The generation endpoint failed or answered with a non-success status.
    #[error("GATEWAY_FAILURE: {0}")]
    GatewayFailure(String),

    /// The generation endpoint answered, but without candidate text.
    #[error("MALFORMED_RESPONSE: {0}")]
    MalformedResponse(String),

    /// Storage key that would escape the storage root.
    #[error("STORAGE_ERROR: invalid key {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed.
    #[error("STORAGE_ERROR: {0}")]
    Storage(#[from] std::io::Error),

    /// Database operation failed.
    #[error("STORAGE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Persisted registry could not be encoded or decoded.
    #[error("SERIALIZATION_ERROR: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::MissingInput(_) | Error::InvalidSlug(_) => -32602,
            Error::Config(_) => -32001,
            Error::GatewayFailure(_) | Error::MalformedResponse(_) => -32002,
            Error::InvalidKey(_) | Error::Storage(_) | Error::Database(_) | Error::Serialization(_) => -32003,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
