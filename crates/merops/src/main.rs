mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use merops_api::{DashboardClient, TransportConfig};
use merops_core::TaskContext;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let resolved = config::resolve(&cli.global)?;

    let transport = TransportConfig {
        timeout: resolved.timeout,
    };
    let client = DashboardClient::from_api_key(&resolved.base_url, &resolved.api_key, &transport)
        .map_err(|e| CliError::Validation {
            field: "base-url".into(),
            reason: e.to_string(),
        })?;
    let ctx = TaskContext::new(client).with_concurrency(resolved.concurrency);

    tracing::debug!(org = %resolved.org, command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &ctx, &resolved.org, &cli.global).await
}
