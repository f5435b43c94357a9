//! faultbench-traffic - authenticated traffic generator
//!
//! Usage: `faultbench-traffic <SERVICE_URL> [DURATION_MINUTES]`

use clap::Parser;
use faultbench_traffic::output::{print_error, print_info, print_rule};
use faultbench_traffic::{
    print_report, AuthProvider, EndpointTable, GcloudAuthProvider, GeneratorConfig,
    StaticTokenProvider, TrafficError, TrafficGenerator,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Traffic generator CLI
#[derive(Parser)]
#[command(name = "faultbench-traffic")]
#[command(about = "Authenticated traffic generator for faultbench-service", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the deployed service
    service_url: String,

    /// How long to generate traffic, in minutes
    #[arg(default_value_t = 5)]
    duration_minutes: u64,

    /// Bearer token to use instead of asking gcloud
    #[arg(long, env = "FAULTBENCH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Maximum requests in flight
    #[arg(long, default_value_t = 3)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,

    /// Seed the endpoint selection RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let service_url = cli.service_url.trim_end_matches('/').to_string();

    println!();
    print_rule('=');
    println!("faultbench - Authenticated Traffic Generator");
    print_rule('=');
    println!();
    println!(
        "Starting authenticated traffic generation for {} minutes...",
        cli.duration_minutes
    );
    println!("Target: {}", service_url);
    print_rule('-');

    let auth: Arc<dyn AuthProvider> = match cli.token {
        Some(token) => Arc::new(StaticTokenProvider::new(token)?),
        None => Arc::new(GcloudAuthProvider::new()),
    };

    let config = GeneratorConfig {
        duration: Duration::from_secs(cli.duration_minutes * 60),
        concurrency: cli.concurrency,
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
        seed: cli.seed,
        ..Default::default()
    };

    print_pattern(&config.endpoints);
    print_info(&format!("Getting authentication token via {}...", auth.name()));

    let generator = TrafficGenerator::new(service_url, auth, config);
    match generator.run().await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(TrafficError::Auth(e)) => {
            print_error(&format!("Failed to get auth token: {}", e));
            eprintln!("\nMake sure you're authenticated:");
            eprintln!("  gcloud auth login");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn print_pattern(table: &EndpointTable) {
    println!("\nTraffic Pattern:");
    for endpoint in table.endpoints() {
        println!(
            "  - {} (weight {}): {}",
            endpoint.path, endpoint.weight, endpoint.description
        );
    }
    println!();
    print_rule('-');
    println!();
}
