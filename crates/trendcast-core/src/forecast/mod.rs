//! Linear-trend forecasting.
//!
//! A series is fitted once per call ([`trend`]), evaluated at future dates
//! ([`projector`]) and summarized for a single next day ([`daily`]) or a
//! date range ([`weekly`]). [`batch`] runs either over a watchlist.

pub mod batch;
pub mod daily;
pub mod projector;
pub mod trend;
pub mod weekly;

use serde::{Deserialize, Serialize};

use crate::data_source::{BarsRequest, DataSource};
use crate::{BarSeries, ForecastError, Lookback, Symbol, TradingDate};

pub use batch::{run_daily, run_weekly, SymbolOutcome};
pub use daily::{next_day_from_series, predict_next_day, DayResult};
pub use projector::{project, Projection};
pub use trend::{FittedModel, LinearFit, MIN_OBSERVATIONS};
pub use weekly::{predict_range, range_from_series, WeekResult};

/// Direction of a prediction relative to its reference close. A zero
/// change counts as `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Up => "📈",
            Self::Down => "📉",
        }
    }
}

/// Close on `date`, or the latest close when the series has no bar that day.
pub(crate) fn reference_close(series: &BarSeries, date: TradingDate) -> Option<f64> {
    series
        .bar_on(date)
        .or_else(|| series.last())
        .map(|bar| bar.close)
}

/// Load a series and turn an empty one into `NoData`.
pub(crate) async fn load_series(
    source: &dyn DataSource,
    symbol: &Symbol,
    lookback: Lookback,
) -> Result<BarSeries, ForecastError> {
    let series = source
        .bars(BarsRequest::new(symbol.clone(), lookback))
        .await?;

    tracing::debug!(
        %symbol,
        provider = %source.id(),
        bars = series.len(),
        "loaded series"
    );

    if series.is_empty() {
        return Err(ForecastError::NoData {
            symbol: symbol.clone(),
        });
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bar;

    #[test]
    fn zero_change_is_down() {
        assert_eq!(Trend::from_change(0.0), Trend::Down);
        assert_eq!(Trend::from_change(-0.01), Trend::Down);
        assert_eq!(Trend::from_change(1e-9), Trend::Up);
    }

    #[test]
    fn reference_close_falls_back_to_latest_bar() {
        let symbol = Symbol::parse("NHPC.NS").expect("valid");
        let bars = vec![
            Bar::new(TradingDate::parse("2024-01-04").expect("valid"), 80.0, 81.0, 79.0, 80.5, None)
                .expect("valid"),
            Bar::new(TradingDate::parse("2024-01-05").expect("valid"), 81.0, 82.0, 80.0, 81.5, None)
                .expect("valid"),
        ];
        let series = BarSeries::new(symbol, bars).expect("ordered");

        let exact = reference_close(&series, TradingDate::parse("2024-01-04").expect("valid"));
        let weekend = reference_close(&series, TradingDate::parse("2024-01-06").expect("valid"));

        assert_eq!(exact, Some(80.5));
        assert_eq!(weekend, Some(81.5));
    }
}
