mod daily;
mod weekly;

use std::io::{BufRead, Write};
use std::sync::Arc;

use trendcast_core::{
    DataSource, DayResult, FixtureSource, ReqwestHttpClient, SourceError, Symbol, SymbolOutcome,
    TradingDate, Watchlist, WeekResult, YahooAdapter,
};

use crate::cli::{Cli, Command, SourceSelector};
use crate::error::CliError;

/// Per-symbol outcomes of one run, in watchlist order.
#[derive(Debug)]
pub enum Report {
    Daily(Vec<SymbolOutcome<DayResult>>),
    Weekly(Vec<SymbolOutcome<WeekResult>>),
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    match &cli.command {
        Command::Daily(args) => daily::run(args, cli).await,
        Command::Weekly(args) => weekly::run(args, cli).await,
    }
}

fn build_source(cli: &Cli) -> Result<Box<dyn DataSource>, CliError> {
    match cli.source {
        SourceSelector::Yahoo if cli.mock => {
            Ok(Box::new(YahooAdapter::default().with_timeout_ms(cli.timeout_ms)))
        }
        SourceSelector::Yahoo => Ok(Box::new(
            YahooAdapter::with_http_client(Arc::new(ReqwestHttpClient::new()))
                .with_timeout_ms(cli.timeout_ms),
        )),
        SourceSelector::Fixture => {
            let path = cli.fixtures.as_ref().ok_or_else(|| {
                SourceError::invalid_request("--source fixture requires --fixtures <path>")
            })?;
            let source = FixtureSource::from_json_file(path)?;
            tracing::debug!(path = %path.display(), "loaded fixture file");
            Ok(Box::new(source))
        }
    }
}

fn watchlist(cli: &Cli) -> Result<Watchlist, CliError> {
    let defaults = Watchlist::default();
    if cli.symbols.is_empty() {
        return Ok(defaults);
    }

    let symbols = cli
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(defaults.select(&symbols))
}

/// Use `arg` when given, otherwise prompt on `prompt_out` and read one line.
fn resolve_date<R, W>(
    arg: Option<&str>,
    prompt: &str,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<TradingDate, CliError>
where
    R: BufRead,
    W: Write,
{
    let raw = match arg {
        Some(value) => value.to_owned(),
        None => {
            write!(prompt_out, "{prompt}")?;
            prompt_out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            line
        }
    };

    let value = raw.trim();
    TradingDate::parse(value).map_err(|_| CliError::InvalidDateFormat {
        value: value.to_owned(),
    })
}
