use serde::{Deserialize, Serialize};

use super::projector::project;
use super::trend::FittedModel;
use super::{load_series, reference_close, Trend};
use crate::data_source::DataSource;
use crate::{BarSeries, ForecastError, Lookback, Symbol, TradingDate, ValidationError};

/// One-day-ahead prediction for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    pub reference_date: TradingDate,
    pub reference_close: f64,
    pub target_date: TradingDate,
    pub predicted_close: f64,
    pub predicted_high: f64,
    pub trend: Trend,
    /// `predicted_close - reference_close`.
    pub change: f64,
}

/// Predict the calendar day after `reference_date` from a loaded series.
pub fn next_day_from_series(
    series: &BarSeries,
    reference_date: TradingDate,
) -> Result<DayResult, ForecastError> {
    let Some(reference) = reference_close(series, reference_date) else {
        return Err(ForecastError::NoData {
            symbol: series.symbol().clone(),
        });
    };

    let model = FittedModel::fit(series)?;
    let target_date = reference_date
        .next_day()
        .ok_or(ValidationError::DateOutOfRange {
            date: reference_date,
        })?;

    let projection = project(&model, &[target_date])
        .pop()
        .ok_or(ForecastError::EmptyRange {
            start: reference_date,
            end: target_date,
        })?;

    let change = projection.close - reference;
    Ok(DayResult {
        reference_date,
        reference_close: reference,
        target_date,
        predicted_close: projection.close,
        predicted_high: projection.high,
        trend: Trend::from_change(change),
        change,
    })
}

/// Load `symbol` from `source` and predict the day after `reference_date`.
pub async fn predict_next_day(
    source: &dyn DataSource,
    symbol: &Symbol,
    reference_date: TradingDate,
    lookback: Lookback,
) -> Result<DayResult, ForecastError> {
    let series = load_series(source, symbol, lookback).await?;
    next_day_from_series(&series, reference_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bar;

    fn flat_then_falling() -> BarSeries {
        let closes = [50.0, 49.0, 48.0];
        let bars = closes
            .iter()
            .zip(1u8..)
            .map(|(&close, day)| {
                let date = TradingDate::from_calendar(2024, 3, day).expect("valid");
                Bar::new(date, close, close + 1.0, close - 1.0, close, None).expect("valid")
            })
            .collect();
        BarSeries::new(Symbol::parse("IOB.NS").expect("valid"), bars).expect("ordered")
    }

    #[test]
    fn falling_series_predicts_down() {
        let result = next_day_from_series(
            &flat_then_falling(),
            TradingDate::parse("2024-03-03").expect("valid"),
        )
        .expect("prediction");

        assert_eq!(result.target_date.to_string(), "2024-03-04");
        assert!((result.predicted_close - 47.0).abs() < 1e-9);
        assert!((result.change + 1.0).abs() < 1e-9);
        assert_eq!(result.trend, Trend::Down);
    }

    #[test]
    fn empty_series_is_no_data() {
        let symbol = Symbol::parse("NMDC.NS").expect("valid");
        let err = next_day_from_series(
            &BarSeries::empty(symbol.clone()),
            TradingDate::parse("2024-03-03").expect("valid"),
        )
        .expect_err("must fail");

        assert_eq!(err, ForecastError::NoData { symbol });
    }
}
