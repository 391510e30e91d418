//! Error types for the roster record table.
//!
//! Store operations themselves never fail: missing ids are no-ops and
//! persistence write failures are logged and swallowed. These types cover the
//! boundaries where failure is real (opening storage, configuration, user
//! input in the interactive shell).

use thiserror::Error;

/// Storage backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Storage quota exceeded writing {key}: {size} bytes over quota of {quota}")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Errors surfaced by the CLI and session layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to get user input: {0}")]
    Interaction(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ApiError {
    fn from(err: dialoguer::Error) -> Self {
        ApiError::Interaction(err.to_string())
    }
}
