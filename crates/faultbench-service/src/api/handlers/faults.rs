//! Classified failure handlers
//!
//! Every failure here is local to its handler: selected, logged as a
//! classification + detail pair, and returned as an [`InjectedFault`].
//! `/api/crash` is the exception and deliberately panics so the fault reaches
//! the boundary layer instead.

use crate::api::state::AppState;
use crate::error::{FaultKind, FaultResult, InjectedFault};
use axum::{extract::State, response::Response, Json};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Message carried by the `/api/crash` panic
pub const CRASH_MESSAGE: &str = "Simulated application crash!";

/// Classifications `/api/process` chooses between when it fails
pub const PROCESS_FAULTS: [FaultKind; 4] = [
    FaultKind::InvalidInput,
    FaultKind::ServiceUnavailable,
    FaultKind::Timeout,
    FaultKind::PermissionDenied,
];

/// Detail log line and public error message for a `/api/process` failure
fn process_failure(kind: FaultKind) -> (&'static str, &'static str) {
    match kind {
        FaultKind::InvalidInput => ("InvalidInput: Invalid input data received", "Invalid data"),
        FaultKind::ServiceUnavailable => (
            "ConnectionError: Database connection refused",
            "Database unavailable",
        ),
        FaultKind::Timeout => ("TimeoutError: Request timed out after 30s", "Request timeout"),
        FaultKind::PermissionDenied => (
            "PermissionError: Access denied to resource",
            "Permission denied",
        ),
        FaultKind::UnhandledFault => ("Unclassified failure", "Internal server error"),
    }
}

/// `/api/process` success response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub status: String,
    pub request_id: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Counted request that fails with one of four classifications
pub async fn process(State(state): State<AppState>) -> FaultResult<Json<ProcessResponse>> {
    let request_id = state.process.record_request();
    state
        .events
        .info(format!("Processing request #{}", request_id));

    let rate = state.profile.process_error_rate;
    let injected = state.sample(|rng| {
        if rng.gen_bool(rate) {
            PROCESS_FAULTS.choose(rng).copied()
        } else {
            None
        }
    });

    if let Some(kind) = injected {
        let (detail, message) = process_failure(kind);
        state.events.fault_pair(
            kind,
            format!("Request failed with {}: Unable to process request", kind),
            detail,
        );
        return Err(InjectedFault::new(kind, message));
    }

    state
        .events
        .info(format!("Request #{} completed successfully", request_id));

    Ok(Json(ProcessResponse {
        status: "success".to_string(),
        request_id,
        timestamp: chrono::Utc::now(),
    }))
}

/// `/api/database` success response
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseResponse {
    pub status: String,
    pub data: Vec<serde_json::Value>,
}

/// Query that fails with pool exhaustion at the configured rate
pub async fn database(State(state): State<AppState>) -> FaultResult<Json<DatabaseResponse>> {
    let rate = state.profile.database_failure_rate;
    if state.sample(|rng| rng.gen_bool(rate)) {
        state.events.fault_pair(
            FaultKind::ServiceUnavailable,
            "Database connection failed: Connection refused on port 5432",
            "PostgreSQL connection pool exhausted",
        );
        return Err(InjectedFault::new(
            FaultKind::ServiceUnavailable,
            "Database unavailable",
        ));
    }

    state.events.info("Database query successful");
    Ok(Json(DatabaseResponse {
        status: "ok".to_string(),
        data: Vec::new(),
    }))
}

/// Always denied
pub async fn permission(State(state): State<AppState>) -> InjectedFault {
    state.events.fault_pair(
        FaultKind::PermissionDenied,
        "Permission denied: Insufficient privileges to access resource",
        "IAM check failed for service account",
    );
    InjectedFault::new(FaultKind::PermissionDenied, "Access denied")
}

/// Always unreachable
pub async fn network(State(state): State<AppState>) -> InjectedFault {
    state.events.fault_pair(
        FaultKind::ServiceUnavailable,
        "Network error: Connection to external service timed out",
        "DNS resolution failed for api.external-service.com",
    );
    InjectedFault::new(FaultKind::ServiceUnavailable, "Network unreachable")
}

/// `/api/stress` response
#[derive(Debug, Serialize, Deserialize)]
pub struct StressResponse {
    pub status: String,
    pub logs_generated: usize,
}

/// Emit a fixed number of lines, each independently an error or info
pub async fn stress(State(state): State<AppState>) -> Json<StressResponse> {
    let lines = state.profile.stress_lines;
    let rate = state.profile.stress_error_rate;
    let outcomes: Vec<bool> = state.sample(|rng| (0..lines).map(|_| rng.gen_bool(rate)).collect());

    for (i, failed) in outcomes.into_iter().enumerate() {
        if failed {
            state
                .events
                .error(format!("Stress test error #{}: Random failure", i));
        } else {
            state.events.info(format!("Stress test log #{}", i));
        }
    }

    Json(StressResponse {
        status: "completed".to_string(),
        logs_generated: lines,
    })
}

/// Log a crash signature, then fault without returning
pub async fn crash(State(state): State<AppState>) -> Response {
    state.events.critical_pair(
        FaultKind::UnhandledFault,
        "Application crash triggered!",
        "NullPointerException: Attempted to access null object",
    );

    panic!("{}", CRASH_MESSAGE);
}
