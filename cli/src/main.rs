//! runwatch - wait for a distributed application to report running

use std::process::ExitCode;

use clap::Parser;
use runwatch_cli::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            report_error(&e, json);
            ExitCode::FAILURE
        }
    }
}

fn report_error(e: &anyhow::Error, json: bool) {
    if json {
        if let Ok(out) = runwatch_cli::output::json::format_error(&format!("{e:#}"), error_code(e)) {
            println!("{out}");
            return;
        }
    }
    eprintln!("Error: {e:#}");
}

fn error_code(e: &anyhow::Error) -> &'static str {
    use runwatch_cli::domain::{ConfigError, TrackError};
    if e.downcast_ref::<TrackError>().is_some() {
        "REMOTE_FAILURE"
    } else if e.downcast_ref::<ConfigError>().is_some() {
        "INVALID_CONFIG"
    } else {
        "ERROR"
    }
}
