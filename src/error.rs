// src/error.rs

//! Unified error handling for the pricing pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Pricing catalog request failed or returned malformed pagination
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A catalog record is missing a required field or has an unparsable value
    #[error("Malformed record {record}: {message}")]
    MalformedRecord { record: String, message: String },

    /// SQLite schema or insert failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an upstream (catalog) error.
    pub fn upstream(message: impl fmt::Display) -> Self {
        Self::Upstream(message.to_string())
    }

    /// Create a malformed record error for the given record identifier.
    pub fn malformed(record: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::MalformedRecord {
            record: record.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
