//! Watchlist-wide runs with per-symbol failure isolation.

use super::daily::{predict_next_day, DayResult};
use super::weekly::{predict_range, WeekResult};
use crate::data_source::DataSource;
use crate::watchlist::Watchlist;
use crate::{ForecastError, Lookback, Symbol, TradingDate};

/// Result for one watchlist entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOutcome<T> {
    pub symbol: Symbol,
    pub name: String,
    pub result: Result<T, ForecastError>,
}

impl<T> SymbolOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn record<T>(symbol: &Symbol, result: &Result<T, ForecastError>) {
    match result {
        Ok(_) => tracing::info!(%symbol, "prediction complete"),
        Err(error) => tracing::warn!(%symbol, code = error.code(), %error, "prediction failed"),
    }
}

/// Next-day prediction for every entry, sequentially in watchlist order.
pub async fn run_daily(
    source: &dyn DataSource,
    watchlist: &Watchlist,
    reference_date: TradingDate,
    lookback: Lookback,
) -> Vec<SymbolOutcome<DayResult>> {
    let mut outcomes = Vec::with_capacity(watchlist.len());
    for entry in watchlist.iter() {
        let result = predict_next_day(source, &entry.symbol, reference_date, lookback).await;
        record(&entry.symbol, &result);
        outcomes.push(SymbolOutcome {
            symbol: entry.symbol.clone(),
            name: entry.name.clone(),
            result,
        });
    }
    outcomes
}

/// Range prediction for every entry, sequentially in watchlist order.
pub async fn run_weekly(
    source: &dyn DataSource,
    watchlist: &Watchlist,
    start: TradingDate,
    end: TradingDate,
    lookback: Lookback,
) -> Vec<SymbolOutcome<WeekResult>> {
    let mut outcomes = Vec::with_capacity(watchlist.len());
    for entry in watchlist.iter() {
        let result = predict_range(source, &entry.symbol, start, end, lookback).await;
        record(&entry.symbol, &result);
        outcomes.push(SymbolOutcome {
            symbol: entry.symbol.clone(),
            name: entry.name.clone(),
            result,
        });
    }
    outcomes
}
