//! # Trendcast Core
//!
//! Domain types, series loaders and the linear-trend forecaster behind the
//! `trendcast` CLI.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Series loaders (Yahoo chart API, JSON fixtures) |
//! | [`data_source`] | Loader trait and request/error types |
//! | [`domain`] | Symbol, trading date, lookback, bars |
//! | [`error`] | Validation and forecast errors |
//! | [`forecast`] | Trend fitting, projection, daily/weekly predictors, batch runs |
//! | [`http_client`] | HTTP client abstraction |
//! | [`source`] | Provider identifiers |
//! | [`watchlist`] | Ordered symbols with display names |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trendcast_core::{run_daily, Lookback, TradingDate, Watchlist, YahooAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = YahooAdapter::default();
//!     let date = TradingDate::parse("2024-01-10")?;
//!
//!     for outcome in run_daily(&source, &Watchlist::default(), date, Lookback::default()).await {
//!         match outcome.result {
//!             Ok(day) => println!("{}: {:.2} {}", outcome.name, day.predicted_close, day.trend.label()),
//!             Err(error) => println!("{} - Error: {error}", outcome.name),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / batch    │
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Day / Week      │────▶│ Trend fitter     │
//! │ predictor       │     │ + projector      │
//! └────────┬────────┘     └──────────────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest/none)   │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod http_client;
pub mod source;
pub mod watchlist;

// Adapter implementations
pub use adapters::{FixtureSource, YahooAdapter};

// Data source trait and types
pub use data_source::{BarsRequest, DataSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{Bar, BarSeries, Lookback, LookbackUnit, Symbol, TradingDate};

// Error types
pub use error::{ForecastError, ValidationError};

// Forecasting
pub use forecast::{
    next_day_from_series, predict_next_day, predict_range, range_from_series, run_daily,
    run_weekly, DayResult, FittedModel, LinearFit, Projection, SymbolOutcome, Trend, WeekResult,
};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Source identifiers
pub use source::ProviderId;

pub use watchlist::{Watchlist, WatchlistEntry};
