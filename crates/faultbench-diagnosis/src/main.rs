//! faultbench-e2e - end-to-end diagnosis agent test
//!
//! Usage: `faultbench-e2e [SERVICE_NAME] --agent-url <url>`

use clap::Parser;
use colored::*;
use faultbench_diagnosis::render::{print_result, print_summary, rule};
use faultbench_diagnosis::{resolve_project_id, run_suite, HttpDiagnosisAgent};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// End-to-end harness CLI
#[derive(Parser)]
#[command(name = "faultbench-e2e")]
#[command(about = "Run canned investigations against a diagnosis agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Service the agent should investigate
    #[arg(default_value = "aiops-demo-service")]
    service_name: String,

    /// Diagnosis agent base URL
    #[arg(long, env = "FAULTBENCH_AGENT_URL", default_value = "http://localhost:8000")]
    agent_url: String,

    /// Cloud project id (falls back to the gcloud configuration)
    #[arg(long, env = "GCP_PROJECT_ID")]
    project_id: Option<String>,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let project_id = match resolve_project_id(cli.project_id, "gcloud").await {
        Ok(id) => Some(id),
        Err(e) => {
            eprintln!("{} {}", "⚠".yellow(), e);
            None
        }
    };

    println!("\n{}", rule('='));
    println!("{:>20}faultbench - End-to-End Agent Test", "");
    println!("{}", rule('='));
    println!("\nProject ID: {}", project_id.as_deref().unwrap_or("<unset>"));
    println!("Service Name: {}", cli.service_name);
    println!("Agent: {}", cli.agent_url);
    println!("\n{}", rule('='));

    let agent = HttpDiagnosisAgent::new(
        &cli.agent_url,
        project_id,
        Duration::from_secs(cli.timeout_secs),
    )?;

    let outcomes = run_suite(&agent, &cli.service_name, |index, outcome| {
        println!("\n{}", rule('='));
        println!("TEST {}: {}", index, outcome.query.title);
        println!("{}", rule('='));
        print_result(&outcome.result, outcome.query.label);
    })
    .await;

    print_summary(&outcomes);

    println!("\n{}", rule('='));
    println!("{} End-to-End Testing Complete!", "✓".green());
    println!("{}\n", rule('='));

    Ok(())
}
