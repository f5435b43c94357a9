//! Traffic generator error types

use thiserror::Error;

/// Failure to obtain a bearer credential
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token command could not be started
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The token command exited unsuccessfully
    #[error("`{program}` exited with {status}: {stderr}")]
    Command {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The provider produced no token
    #[error("authentication provider returned an empty token")]
    Empty,
}

/// Traffic generator errors
#[derive(Debug, Error)]
pub enum TrafficError {
    /// Authentication failed; the session never started
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// HTTP client construction error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Target URL is unusable
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Generator configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for traffic operations
pub type TrafficResult<T> = Result<T, TrafficError>;
