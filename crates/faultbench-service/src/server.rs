//! Server setup and lifecycle management

use crate::api::{build_router, AppState};
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::events::EventLog;
use tokio::net::TcpListener;

/// Fault-injection HTTP server
pub struct Server {
    config: ServiceConfig,
    state: AppState,
}

impl Server {
    /// Create a new server emitting events through `events`
    pub fn new(config: ServiceConfig, events: EventLog) -> ServiceResult<Self> {
        config.faults.validate()?;

        let state = AppState::new(
            config.faults.clone(),
            events,
            config.server.service_name.clone(),
            config.seed,
        );

        Ok(Self { config, state })
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    pub async fn run(self) -> ServiceResult<()> {
        let listener = TcpListener::bind(self.config.server.listen_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> ServiceResult<()> {
        let addr = listener.local_addr()?;
        let app = build_router(self.state.clone());

        tracing::info!("faultbench-service listening on {}", addr);
        tracing::info!("Fault profile: {:?}", self.config.faults);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServiceError::Server(e.to_string()))?;

        tracing::info!(
            requests = self.state.process.request_count(),
            leaked_blocks = self.state.process.leaked_blocks(),
            "faultbench-service shutting down"
        );

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
