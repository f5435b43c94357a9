//! Error types for faultbench-service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Service-level errors (startup, configuration, serving)
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server runtime error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

/// Closed taxonomy of synthetic fault classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// Client supplied unusable data
    InvalidInput,
    /// A dependency is down or refusing connections
    ServiceUnavailable,
    /// An operation exceeded its deadline
    Timeout,
    /// The caller lacks the required privileges
    PermissionDenied,
    /// A fault escaped its handler and was caught at the service boundary
    UnhandledFault,
}

impl FaultKind {
    /// HTTP status a fault of this kind is surfaced as
    pub fn status(self) -> StatusCode {
        match self {
            FaultKind::InvalidInput => StatusCode::BAD_REQUEST,
            FaultKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            FaultKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            FaultKind::PermissionDenied => StatusCode::FORBIDDEN,
            FaultKind::UnhandledFault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FaultKind::InvalidInput => "InvalidInput",
            FaultKind::ServiceUnavailable => "ServiceUnavailable",
            FaultKind::Timeout => "Timeout",
            FaultKind::PermissionDenied => "PermissionDenied",
            FaultKind::UnhandledFault => "UnhandledFault",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified synthetic failure returned by an endpoint
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct InjectedFault {
    pub kind: FaultKind,
    pub message: String,
}

impl InjectedFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntoResponse for InjectedFault {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            message: None,
        };

        (self.kind.status(), Json(body)).into_response()
    }
}

/// Result type alias for endpoint handlers
pub type FaultResult<T> = Result<T, InjectedFault>;

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
