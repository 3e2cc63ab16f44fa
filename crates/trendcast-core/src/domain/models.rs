use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// One trading day's OHLC record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_price("open", open)?;
        validate_price("high", high)?;
        validate_price("low", low)?;
        validate_price("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Re-run constructor validation on a bar that was deserialized directly.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Self::new(
            self.date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}

/// Daily bars for one symbol, ascending by date with no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    symbol: Symbol,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series, rejecting bars that are not strictly increasing by date.
    pub fn new(symbol: Symbol, bars: Vec<Bar>) -> Result<Self, ValidationError> {
        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(ValidationError::UnorderedSeries {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }

        Ok(Self { symbol, bars })
    }

    /// Build a series from bars in arbitrary order.
    ///
    /// Bars are sorted by date; when two bars share a date the later one in
    /// the input wins.
    pub fn from_unordered(symbol: Symbol, mut bars: Vec<Bar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);
        Self { symbol, bars }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Bar recorded on exactly `date`, if that day traded.
    pub fn bar_on(&self, date: TradingDate) -> Option<&Bar> {
        self.bars
            .binary_search_by_key(&date, |bar| bar.date)
            .ok()
            .map(|index| &self.bars[index])
    }

    /// Keep only bars dated on or after `start`.
    pub fn since(self, start: TradingDate) -> Self {
        let cut = self.bars.partition_point(|bar| bar.date < start);
        let Self { symbol, mut bars } = self;
        bars.drain(..cut);
        Self { symbol, bars }
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> TradingDate {
        TradingDate::parse(raw).expect("valid date")
    }

    fn bar(raw: &str, close: f64) -> Bar {
        Bar::new(date(raw), close, close + 1.0, close - 1.0, close, None).expect("valid bar")
    }

    fn symbol() -> Symbol {
        Symbol::parse("NHPC.NS").expect("valid symbol")
    }

    #[test]
    fn rejects_invalid_bar_bounds() {
        let err = Bar::new(date("2024-01-01"), 10.0, 12.0, 9.0, 12.5, Some(10))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_inverted_and_non_finite_bars() {
        let err = Bar::new(date("2024-01-01"), 10.0, 9.0, 11.0, 10.0, None).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));

        let err = Bar::new(date("2024-01-01"), 10.0, f64::NAN, 9.0, 10.0, None)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { field: "high" }));
    }

    #[test]
    fn series_rejects_duplicate_or_descending_dates() {
        let err = BarSeries::new(
            symbol(),
            vec![bar("2024-01-02", 10.0), bar("2024-01-02", 11.0)],
        )
        .expect_err("duplicate dates must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { .. }));

        let err = BarSeries::new(
            symbol(),
            vec![bar("2024-01-03", 10.0), bar("2024-01-02", 11.0)],
        )
        .expect_err("descending dates must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { .. }));
    }

    #[test]
    fn from_unordered_sorts_and_keeps_latest_duplicate() {
        let series = BarSeries::from_unordered(
            symbol(),
            vec![
                bar("2024-01-03", 30.0),
                bar("2024-01-01", 10.0),
                bar("2024-01-03", 33.0),
            ],
        );

        let closes: Vec<f64> = series.bars().iter().map(|bar| bar.close).collect();
        assert_eq!(closes, vec![10.0, 33.0]);
    }

    #[test]
    fn looks_up_bar_by_date_and_trims_window() {
        let series = BarSeries::new(
            symbol(),
            vec![bar("2024-01-01", 10.0), bar("2024-01-02", 11.0), bar("2024-01-04", 12.0)],
        )
        .expect("ordered");

        assert_eq!(series.bar_on(date("2024-01-02")).map(|b| b.close), Some(11.0));
        assert!(series.bar_on(date("2024-01-03")).is_none());

        let trimmed = series.since(date("2024-01-02"));
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.first().map(|b| b.date), Some(date("2024-01-02")));
    }
}
