use std::io::Write;

use serde::Serialize;
use trendcast_core::{DayResult, ForecastError, Symbol, SymbolOutcome, WeekResult};

use crate::cli::{Cli, OutputFormat};
use crate::commands::Report;
use crate::error::CliError;

const DAILY_RULE_WIDTH: usize = 45;
const WEEKLY_RULE_WIDTH: usize = 60;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Overrides the per-exchange glyph when set.
    pub currency: Option<String>,
}

impl RenderOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            pretty: cli.pretty,
            currency: cli.currency.clone(),
        }
    }

    fn currency_for<'a>(&'a self, symbol: &Symbol) -> &'a str {
        self.currency
            .as_deref()
            .unwrap_or_else(|| symbol.currency_glyph())
    }
}

pub fn render<W: Write>(
    out: &mut W,
    report: &Report,
    options: &RenderOptions,
) -> Result<(), CliError> {
    match options.format {
        OutputFormat::Json => {
            let rows = match report {
                Report::Daily(outcomes) => outcomes
                    .iter()
                    .map(JsonRow::from_outcome)
                    .collect::<Result<Vec<_>, _>>()?,
                Report::Weekly(outcomes) => outcomes
                    .iter()
                    .map(JsonRow::from_outcome)
                    .collect::<Result<Vec<_>, _>>()?,
            };
            write_json(out, &rows, options.pretty)
        }
        OutputFormat::Table => match report {
            Report::Daily(outcomes) => write_daily_table(out, outcomes, options),
            Report::Weekly(outcomes) => write_weekly_table(out, outcomes, options),
        },
    }
}

#[derive(Debug, Serialize)]
struct JsonError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    symbol: &'a Symbol,
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

impl<'a> JsonRow<'a> {
    fn from_outcome<T: Serialize>(outcome: &'a SymbolOutcome<T>) -> Result<Self, serde_json::Error> {
        let (status, result, error) = match &outcome.result {
            Ok(value) => ("ok", Some(serde_json::to_value(value)?), None),
            Err(error) => (
                "error",
                None,
                Some(JsonError {
                    code: error.code(),
                    message: error.to_string(),
                }),
            ),
        };
        Ok(Self {
            symbol: &outcome.symbol,
            name: &outcome.name,
            status,
            result,
            error,
        })
    }
}

fn write_json<W: Write>(out: &mut W, rows: &[JsonRow<'_>], pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(rows)?
    } else {
        serde_json::to_string(rows)?
    };
    writeln!(out, "{payload}")?;
    Ok(())
}

fn write_daily_table<W: Write>(
    out: &mut W,
    outcomes: &[SymbolOutcome<DayResult>],
    options: &RenderOptions,
) -> Result<(), CliError> {
    writeln!(out, "\n📈 Next-day Predictions\n")?;
    for outcome in outcomes {
        let cur = options.currency_for(&outcome.symbol);
        match &outcome.result {
            Ok(day) => write!(out, "{}", daily_block(&outcome.name, &outcome.symbol, day, cur))?,
            Err(error) => writeln!(out, "{}", error_line(&outcome.name, &outcome.symbol, error))?,
        }
    }
    Ok(())
}

fn write_weekly_table<W: Write>(
    out: &mut W,
    outcomes: &[SymbolOutcome<WeekResult>],
    options: &RenderOptions,
) -> Result<(), CliError> {
    for outcome in outcomes {
        let cur = options.currency_for(&outcome.symbol);
        match &outcome.result {
            Ok(week) => write!(out, "{}", weekly_block(&outcome.name, &outcome.symbol, week, cur))?,
            Err(error) => {
                let line = error_line(&outcome.name, &outcome.symbol, error);
                writeln!(out, "\n📊 Predicting for: {line}")?;
                writeln!(out, "{}", "-".repeat(WEEKLY_RULE_WIDTH))?;
            }
        }
    }
    Ok(())
}

fn daily_block(name: &str, symbol: &Symbol, day: &DayResult, cur: &str) -> String {
    format!(
        "{name} ({symbol})\n\
         Last Close ({}): {cur}{:.2}\n\
         Predicted Next Close ({}): {cur}{:.2} {} {} ({:+.2})\n\
         Predicted Next Peak ({}): {cur}{:.2}\n\
         {}\n",
        day.reference_date,
        day.reference_close,
        day.target_date,
        day.predicted_close,
        day.trend.glyph(),
        day.trend.label(),
        day.change,
        day.target_date,
        day.predicted_high,
        "-".repeat(DAILY_RULE_WIDTH),
    )
}

fn weekly_block(name: &str, symbol: &Symbol, week: &WeekResult, cur: &str) -> String {
    format!(
        "\n📊 Predicting for: {name} ({symbol})\n\
         Last Close ({}): {cur}{:.2}\n\
         Predicted Close on {}: {cur}{:.2} {} {} ({:+.2}%)\n\
         Predicted Weekly Peak: {cur}{:.2} on {}\n\
         {}\n",
        week.start_date,
        week.reference_close,
        week.end_date,
        week.end_close,
        week.trend.glyph(),
        week.trend.label(),
        week.change_pct,
        week.peak_high,
        week.peak_date,
        "-".repeat(WEEKLY_RULE_WIDTH),
    )
}

fn error_line(name: &str, symbol: &Symbol, error: &ForecastError) -> String {
    format!("{name} ({symbol}) - ❌ Error: {error}")
}
