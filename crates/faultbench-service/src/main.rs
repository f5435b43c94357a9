//! faultbenchd - fault-injection service
//!
//! Serves the synthetic failure endpoints until interrupted. The listening
//! port comes from `--port` or `PORT` (default 8080).

use clap::Parser;
use faultbench_service::{logging, EventLog, Server, ServiceConfig, ServiceResult};

/// faultbenchd CLI
#[derive(Parser)]
#[command(name = "faultbenchd")]
#[command(about = "Fault-injection service for diagnosis agent testing", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FAULTBENCH_CONFIG")]
    config: Option<String>,

    /// Listening port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(long, env = "FAULTBENCH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "FAULTBENCH_LOG_JSON")]
    json: bool,

    /// Seed the fault RNG for a reproducible sequence
    #[arg(long, env = "FAULTBENCH_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> ServiceResult<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load(cli.config.as_deref())?;

    // Override with CLI args
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    logging::init(&config.logging.level, config.logging.json);

    let server = Server::new(config, EventLog::tracing())?;
    server.run().await
}
