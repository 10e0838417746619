//! Error types for the tubesum client.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Fallback message when the processing endpoint gives no usable detail.
pub const PROCESS_FAILED_MESSAGE: &str = "Failed to process video";

/// Message for a failing health check.
pub const HEALTH_FAILED_MESSAGE: &str = "API health check failed";

/// Error type for requests against the summarizer backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// Displays as the bare message so it can be shown to the user verbatim.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport failure or an undecodable success body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot be joined with an endpoint path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Returns the HTTP status for backend failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidUrl(_) => None,
        }
    }
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Error type for clipboard writes.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Writing the escape sequence to the terminal failed
    #[error("Failed to write to clipboard: {0}")]
    WriteError(#[from] std::io::Error),

    /// Clipboard access is not available in this environment
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}
