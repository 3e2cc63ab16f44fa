use thiserror::Error;

use crate::data_source::SourceError;
use crate::{Symbol, TradingDate};

/// Validation and contract errors exposed by `trendcast-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("date {date} has no representable successor")]
    DateOutOfRange { date: TradingDate },
    #[error("invalid lookback '{value}', expected <n>d, <n>wk, <n>mo or <n>y")]
    InvalidLookback { value: String },
    #[error("invalid source '{value}', expected one of yahoo, fixture")]
    InvalidSource { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,
    #[error("series dates must be strictly increasing: {previous} is followed by {next}")]
    UnorderedSeries {
        previous: TradingDate,
        next: TradingDate,
    },
}

/// Per-symbol prediction failures.
///
/// Every variant is recoverable at the symbol boundary: the batch runner
/// records it and moves on to the next watchlist entry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("no data for {symbol}")]
    NoData { symbol: Symbol },

    #[error("insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("empty range: no calendar days after {start} through {end}")]
    EmptyRange { start: TradingDate, end: TradingDate },

    #[error("reference close for {symbol} is zero; percent change is undefined")]
    DivisionByZero { symbol: Symbol },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ForecastError {
    /// Stable machine-readable code used by JSON output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoData { .. } => "forecast.no_data",
            Self::InsufficientData { .. } => "forecast.insufficient_data",
            Self::EmptyRange { .. } => "forecast.empty_range",
            Self::DivisionByZero { .. } => "forecast.division_by_zero",
            Self::Source(error) => error.code(),
            Self::Validation(_) => "forecast.validation",
        }
    }
}
