//! API Router configuration

use super::boundary::FaultBoundary;
use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the fault-injection router
pub fn build_router(state: AppState) -> Router {
    let boundary = FaultBoundary::layer(state.events.clone());

    let api_routes = Router::new()
        // Classified failures
        .route("/process", get(handlers::process))
        .route("/database", get(handlers::database))
        .route("/permission", get(handlers::permission))
        .route("/network", get(handlers::network))
        .route("/stress", get(handlers::stress))
        .route("/crash", get(handlers::crash))
        // Latency and resource exhaustion
        .route("/slow", get(handlers::slow))
        .route("/memory-leak", get(handlers::memory_leak))
        .route("/cpu-spike", get(handlers::cpu_spike));

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(boundary)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
