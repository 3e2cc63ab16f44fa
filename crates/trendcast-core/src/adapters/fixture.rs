use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::data_source::{BarsRequest, DataSource, SourceError};
use crate::{Bar, BarSeries, ProviderId, Symbol};

/// In-memory series loader, optionally read from a JSON file.
///
/// The lookback window is anchored at each series' latest bar, so results do
/// not drift with the wall clock. Unknown symbols load as empty series.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    series: HashMap<Symbol, BarSeries>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: BarSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: BarSeries) {
        self.series.insert(series.symbol().clone(), series);
    }

    /// Parse `{ "SYMBOL": [ {"date": "YYYY-MM-DD", "open": .., ...}, ... ] }`.
    pub fn from_json_str(payload: &str) -> Result<Self, SourceError> {
        let raw: BTreeMap<String, Vec<Bar>> = serde_json::from_str(payload)
            .map_err(|e| SourceError::malformed(format!("invalid fixture document: {e}")))?;

        let mut source = Self::new();
        for (ticker, bars) in raw {
            let symbol = Symbol::parse(&ticker).map_err(|e| {
                SourceError::malformed(format!("invalid fixture symbol '{ticker}': {e}"))
            })?;
            let bars = bars
                .into_iter()
                .map(Bar::validated)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SourceError::malformed(format!("invalid bar for {symbol}: {e}")))?;
            source.insert(BarSeries::from_unordered(symbol, bars));
        }

        Ok(source)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|e| {
            SourceError::invalid_request(format!(
                "cannot read fixture file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&payload)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.series.keys()
    }
}

impl DataSource for FixtureSource {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn bars<'a>(
        &'a self,
        req: BarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BarSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let Some(series) = self.series.get(&req.symbol) else {
                return Ok(BarSeries::empty(req.symbol));
            };

            let Some(latest) = series.last().map(|bar| bar.date) else {
                return Ok(series.clone());
            };

            Ok(series.clone().since(req.lookback.window_start(latest)))
        })
    }
}
