//! Series loader implementations.
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`YahooAdapter`] | Yahoo Finance v8 chart endpoint, with an offline mock mode |
//! | [`FixtureSource`] | In-memory or JSON-file series, for offline runs and tests |

mod fixture;
mod yahoo;

pub use fixture::FixtureSource;
pub use yahoo::YahooAdapter;
