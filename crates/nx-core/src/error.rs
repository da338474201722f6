//! Error types for NuXsec

use thiserror::Error;

/// NuXsec error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Named object missing from a histogram bundle
    #[error("object not found: {0}")]
    NotFound(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
