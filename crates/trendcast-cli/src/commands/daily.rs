use std::io;

use trendcast_core::run_daily;

use super::{build_source, resolve_date, watchlist, Report};
use crate::cli::{Cli, DailyArgs};
use crate::error::CliError;

const DATE_PROMPT: &str = "Enter today's date (YYYY-MM-DD): ";

pub async fn run(args: &DailyArgs, cli: &Cli) -> Result<Report, CliError> {
    let date = {
        let stdin = io::stdin();
        resolve_date(args.date.as_deref(), DATE_PROMPT, &mut stdin.lock(), &mut io::stderr())?
    };

    let watchlist = watchlist(cli)?;
    let source = build_source(cli)?;
    tracing::info!(%date, symbols = watchlist.len(), provider = %source.id(), "daily run");

    let outcomes = run_daily(source.as_ref(), &watchlist, date, cli.lookback).await;
    Ok(Report::Daily(outcomes))
}
