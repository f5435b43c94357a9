//! Root and health handlers

use crate::api::state::AppState;
use crate::error::ErrorResponse;
use axum::{extract::State, http::StatusCode, http::Uri, Json};
use serde::{Deserialize, Serialize};

/// Root endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub status: String,
    pub service: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Always-healthy landing endpoint
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        status: "healthy".to_string(),
        service: state.service_name.clone(),
        timestamp: chrono::Utc::now(),
    })
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub uptime: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        uptime: state.uptime(),
        timestamp: chrono::Utc::now(),
    })
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    state.events.warning(format!("No route for {}", uri.path()));
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Not found: {}", uri.path()),
            message: None,
        }),
    )
}
