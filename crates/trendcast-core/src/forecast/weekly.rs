use serde::{Deserialize, Serialize};

use super::projector::{project, Projection};
use super::trend::FittedModel;
use super::{load_series, reference_close, Trend};
use crate::data_source::DataSource;
use crate::{BarSeries, ForecastError, Lookback, Symbol, TradingDate};

/// Range prediction: every calendar day after `start_date` through `end_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    pub start_date: TradingDate,
    pub end_date: TradingDate,
    pub reference_close: f64,
    /// Predicted close on `end_date`.
    pub end_close: f64,
    pub peak_high: f64,
    pub peak_date: TradingDate,
    pub change_pct: f64,
    pub trend: Trend,
    pub projections: Vec<Projection>,
}

/// Calendar days strictly after `start` up to and including `end`.
fn days_after(start: TradingDate, end: TradingDate) -> Vec<TradingDate> {
    std::iter::successors(start.next_day(), |date| date.next_day())
        .take_while(|date| *date <= end)
        .collect()
}

/// Highest projected high; ties keep the earliest date.
fn peak(projections: &[Projection]) -> Option<&Projection> {
    projections.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.high <= current.high => Some(current),
        _ => Some(candidate),
    })
}

/// Predict the range `(start, end]` from a loaded series.
pub fn range_from_series(
    series: &BarSeries,
    start: TradingDate,
    end: TradingDate,
) -> Result<WeekResult, ForecastError> {
    let symbol = series.symbol();
    let Some(reference) = reference_close(series, start) else {
        return Err(ForecastError::NoData {
            symbol: symbol.clone(),
        });
    };

    let model = FittedModel::fit(series)?;

    let dates = days_after(start, end);
    if dates.is_empty() {
        return Err(ForecastError::EmptyRange { start, end });
    }

    let projections = project(&model, &dates);
    let (Some(last), Some(top)) = (projections.last(), peak(&projections)) else {
        return Err(ForecastError::EmptyRange { start, end });
    };
    let (end_close, peak_high, peak_date) = (last.close, top.high, top.date);

    if reference == 0.0 {
        return Err(ForecastError::DivisionByZero {
            symbol: symbol.clone(),
        });
    }
    let change_pct = (end_close - reference) / reference * 100.0;

    tracing::debug!(
        %symbol,
        days = projections.len(),
        end_close,
        peak_high,
        %peak_date,
        "projected range"
    );

    Ok(WeekResult {
        start_date: start,
        end_date: end,
        reference_close: reference,
        end_close,
        peak_high,
        peak_date,
        change_pct,
        trend: Trend::from_change(end_close - reference),
        projections,
    })
}

/// Load `symbol` from `source` and predict the range `(start, end]`.
pub async fn predict_range(
    source: &dyn DataSource,
    symbol: &Symbol,
    start: TradingDate,
    end: TradingDate,
    lookback: Lookback,
) -> Result<WeekResult, ForecastError> {
    let series = load_series(source, symbol, lookback).await?;
    range_from_series(&series, start, end)
}
