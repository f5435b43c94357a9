//! Diagnosis boundary error types

use thiserror::Error;

/// Errors talking to the diagnosis agent or resolving its inputs
#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Agent answered with a non-success status
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Project identifier could not be determined
    #[error("Project lookup failed: {0}")]
    ProjectLookup(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for diagnosis operations
pub type DiagnosisResult<T> = Result<T, DiagnosisError>;
