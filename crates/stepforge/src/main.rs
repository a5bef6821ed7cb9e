//! Stepforge CLI binary.
//!
//! - Generate raw UI test descriptions per case
//! - Decompose them into subtasks and executable steps
//! - Export task, step and summary tables as JSON

use clap::Parser;
use std::process::ExitCode;
use stepforge::{ObservabilityConfig, init_observability};
use tracing::error;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, execute};

    // Credentials may come from a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let observability = ObservabilityConfig::new()
        .with_verbose(cli.verbose)
        .with_json_logs(cli.json_logs);
    if let Err(e) = init_observability(&observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match execute(cli.command, cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            error!(error = %e, "Every credential is exhausted, stopping");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
