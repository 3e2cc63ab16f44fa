//! CLI argument definitions for trendcast.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `daily` | Predict the next day's close and peak for each symbol |
//! | `weekly` | Predict a date range's closing price and peak |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--source` | `yahoo` | Series loader (yahoo, fixture) |
//! | `--fixtures` | | JSON fixture file for `--source fixture` |
//! | `--mock` | `false` | Offline synthetic Yahoo data |
//! | `--lookback` | `6mo` | Trailing history window |
//! | `--symbols` | watchlist | Comma-separated tickers to predict |
//! | `--currency` | per exchange | Currency glyph for prices |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! trendcast daily 2024-01-10
//! trendcast weekly 2024-01-08 2024-01-12 --symbols NMDC.NS,IOB.NS
//! trendcast daily 2024-01-10 --source fixture --fixtures bars.json --format json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use trendcast_core::Lookback;

/// Linear-trend next-day and weekly price predictions.
#[derive(Debug, Parser)]
#[command(
    name = "trendcast",
    author,
    version,
    about = "Linear-trend price predictions for a stock watchlist",
    long_about = "trendcast fits a straight line to recent daily closes and highs for each \
symbol on a watchlist and extrapolates it to the next day or to the end of a week.\n\
\n\
Dates left off the command line are prompted for on stdin. Logging is written \
to stderr and controlled by the TRENDCAST_LOG environment variable."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Series loader.
    #[arg(long, global = true, value_enum, default_value_t = SourceSelector::Yahoo)]
    pub source: SourceSelector,

    /// JSON file mapping tickers to daily bars (required for `--source fixture`).
    #[arg(long, global = true)]
    pub fixtures: Option<PathBuf>,

    /// Use deterministic synthetic Yahoo data instead of the network.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Trailing history window: <n>d, <n>wk, <n>mo or <n>y.
    #[arg(long, global = true, default_value = "6mo")]
    pub lookback: Lookback,

    /// Comma-separated tickers; replaces the default watchlist.
    #[arg(long, global = true, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Currency glyph printed before prices.
    ///
    /// Defaults to the glyph of each symbol's exchange (₹ for .NS/.BO).
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks, one per symbol.
    Table,
    /// Single JSON array.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelector {
    /// Yahoo Finance chart API.
    Yahoo,
    /// Local JSON fixture file.
    Fixture,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📈 Predict the next day's close and peak.
    ///
    /// # Examples
    ///
    ///   trendcast daily 2024-01-10
    ///   trendcast daily --symbols NMDC.NS
    Daily(DailyArgs),

    /// 📊 Predict the close at the end of a range and the peak within it.
    ///
    /// Every calendar day after START through END is projected.
    ///
    /// # Examples
    ///
    ///   trendcast weekly 2024-01-08 2024-01-12
    Weekly(WeeklyArgs),
}

#[derive(Debug, Args)]
pub struct DailyArgs {
    /// Reference date (YYYY-MM-DD); prompted for when omitted.
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct WeeklyArgs {
    /// Start date (YYYY-MM-DD); prompted for when omitted.
    pub start: Option<String>,

    /// End-of-week date (YYYY-MM-DD); prompted for when omitted.
    pub end: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "trendcast",
            "weekly",
            "2024-01-08",
            "2024-01-12",
            "--symbols",
            "NMDC.NS,IOB.NS",
            "--lookback",
            "3mo",
            "--format",
            "json",
        ])
        .expect("valid arguments");

        assert_eq!(cli.symbols, ["NMDC.NS", "IOB.NS"]);
        assert_eq!(cli.lookback.to_string(), "3mo");
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Weekly(args) => {
                assert_eq!(args.start.as_deref(), Some("2024-01-08"));
                assert_eq!(args.end.as_deref(), Some("2024-01-12"));
            }
            Command::Daily(_) => panic!("expected weekly"),
        }
    }

    #[test]
    fn dates_are_optional() {
        let cli = Cli::try_parse_from(["trendcast", "daily"]).expect("valid arguments");
        assert!(matches!(cli.command, Command::Daily(DailyArgs { date: None })));
        assert_eq!(cli.lookback, Lookback::default());
    }

    #[test]
    fn rejects_bad_lookback() {
        assert!(Cli::try_parse_from(["trendcast", "daily", "--lookback", "0mo"]).is_err());
    }
}
