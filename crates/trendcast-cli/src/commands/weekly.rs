use std::io;

use trendcast_core::run_weekly;

use super::{build_source, resolve_date, watchlist, Report};
use crate::cli::{Cli, WeeklyArgs};
use crate::error::CliError;

const START_PROMPT: &str = "Enter start date (YYYY-MM-DD): ";
const END_PROMPT: &str = "Enter end of week date (YYYY-MM-DD): ";

pub async fn run(args: &WeeklyArgs, cli: &Cli) -> Result<Report, CliError> {
    let (start, end) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt = io::stderr();
        let start = resolve_date(args.start.as_deref(), START_PROMPT, &mut input, &mut prompt)?;
        let end = resolve_date(args.end.as_deref(), END_PROMPT, &mut input, &mut prompt)?;
        (start, end)
    };

    let watchlist = watchlist(cli)?;
    let source = build_source(cli)?;
    tracing::info!(%start, %end, symbols = watchlist.len(), provider = %source.id(), "weekly run");

    let outcomes = run_weekly(source.as_ref(), &watchlist, start, end, cli.lookback).await;
    Ok(Report::Weekly(outcomes))
}
