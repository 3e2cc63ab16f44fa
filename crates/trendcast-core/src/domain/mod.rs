//! # Domain Models
//!
//! Canonical domain types for daily trend projection.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bar`] | One trading day's OHLC record |
//! | [`BarSeries`] | Date-ordered bars for one symbol |
//! | [`Symbol`] | Validated exchange ticker |
//! | [`TradingDate`] | `YYYY-MM-DD` calendar date and regression axis |
//! | [`Lookback`] | Trailing history window (`6mo`, `90d`, ...) |
//!
//! All types enforce their invariants at construction time.

mod date;
mod lookback;
mod models;
mod symbol;

pub use date::TradingDate;
pub use lookback::{Lookback, LookbackUnit};
pub use models::{Bar, BarSeries};
pub use symbol::Symbol;
