mod cli;
mod commands;
mod error;
mod output;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

const LOG_ENV: &str = "TRENDCAST_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Failed symbols are part of the report, so a completed run always exits 0.
async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let report = commands::run(&cli).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render(&mut out, &report, &output::RenderOptions::from_cli(&cli))
}
