use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{OffsetDateTime, Weekday};

use crate::data_source::{BarsRequest, DataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{Bar, BarSeries, Lookback, ProviderId, Symbol, TradingDate};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const NOT_FOUND_CODE: &str = "Not Found";

/// Yahoo Finance daily chart loader.
///
/// With a real HTTP client it calls the v8 chart endpoint. With the no-op
/// client it fabricates a deterministic weekday series per symbol so the CLI
/// and tests can run offline.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
    timeout_ms: u64,
    anchor: Option<TradingDate>,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
            timeout_ms: 10_000,
            anchor: None,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let is_real = !http_client.is_mock();
        Self {
            http_client,
            use_real_api: is_real,
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Pin the end of the lookback window instead of using today's UTC date.
    pub fn anchored_at(mut self, anchor: TradingDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    fn window_end(&self) -> OffsetDateTime {
        match self.anchor {
            Some(anchor) => anchor.into_inner().midnight().assume_utc() + time::Duration::DAY,
            None => OffsetDateTime::now_utc(),
        }
    }

    async fn fetch_real_bars(&self, req: &BarsRequest) -> Result<BarSeries, SourceError> {
        let endpoint = chart_endpoint(&req.symbol, req.lookback, self.window_end());
        tracing::debug!(symbol = %req.symbol, %endpoint, "requesting yahoo chart");

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        // Unknown tickers come back as 404 with a structured "Not Found" body.
        if !response.is_success() && response.status != 404 {
            tracing::warn!(symbol = %req.symbol, status = response.status, "yahoo chart request failed");
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_response(&req.symbol, &response.body)
    }

    fn fake_bars(&self, req: &BarsRequest) -> Result<BarSeries, SourceError> {
        let anchor = self
            .anchor
            .unwrap_or_else(|| TradingDate::from_date(OffsetDateTime::now_utc().date()));
        let seed = symbol_seed(&req.symbol);
        let base = 80.0 + (seed % 400) as f64 / 10.0;
        let drift = ((seed % 7) as f64 - 3.0) * 0.05;

        let mut bars = Vec::new();
        let mut date = req.lookback.window_start(anchor);
        let mut index = 0_u64;
        while date <= anchor {
            let weekday = date.into_inner().weekday();
            if weekday != Weekday::Saturday && weekday != Weekday::Sunday {
                let wiggle = ((seed + index) % 11) as f64 / 10.0 - 0.5;
                let close = (base + drift * index as f64 + wiggle).max(1.0);
                let open = (close - 0.2).max(0.5);
                let high = close.max(open) + 1.1;
                let low = (close.min(open) - 0.9).max(0.0);
                let volume = Some(20_000 + index * 25);

                bars.push(
                    Bar::new(date, open, high, low, close, volume)
                        .map_err(|e| SourceError::internal(e.to_string()))?,
                );
                index += 1;
            }

            date = match date.next_day() {
                Some(next) => next,
                None => break,
            };
        }

        BarSeries::new(req.symbol.clone(), bars).map_err(|e| SourceError::internal(e.to_string()))
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn bars<'a>(
        &'a self,
        req: BarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BarSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_bars(&req).await
            } else {
                self.fake_bars(&req)
            }
        })
    }
}

fn chart_endpoint(symbol: &Symbol, lookback: Lookback, window_end: OffsetDateTime) -> String {
    let end_date = TradingDate::from_date(window_end.date());
    let start = lookback.window_start(end_date).into_inner().midnight().assume_utc();

    format!(
        "{CHART_BASE_URL}/{}?period1={}&period2={}&interval=1d&events=history",
        urlencoding::encode(symbol.as_str()),
        start.unix_timestamp(),
        window_end.unix_timestamp(),
    )
}

/// Decode a v8 chart payload into a daily series.
///
/// Rows with any missing OHLC value or failing bar validation are skipped.
/// Timestamps are shifted by the exchange `gmtoffset` before taking the
/// calendar date, so an NSE session opening at 09:15 IST lands on its local
/// trading day.
fn parse_chart_response(symbol: &Symbol, body: &str) -> Result<BarSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        if error.code == NOT_FOUND_CODE {
            tracing::debug!(%symbol, description = %error.description, "yahoo has no chart");
            return Ok(BarSeries::empty(symbol.clone()));
        }
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}: {}",
            error.code, error.description
        )));
    }

    let Some(result) = chart_response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(BarSeries::empty(symbol.clone()));
    };

    let (Some(timestamps), Some(quote)) = (result.timestamp, result.indicators.quote.first())
    else {
        return Ok(BarSeries::empty(symbol.clone()));
    };

    let gmt_offset = result.meta.gmtoffset.unwrap_or(0);
    let mut bars = Vec::with_capacity(timestamps.len());
    let mut skipped = 0_usize;

    for (i, &ts_value) in timestamps.iter().enumerate() {
        let local = OffsetDateTime::from_unix_timestamp(ts_value + gmt_offset)
            .map_err(|e| SourceError::malformed(format!("invalid timestamp: {e}")))?;

        let row = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = row else {
            skipped += 1;
            continue;
        };
        let volume = quote.volume.get(i).copied().flatten();

        match Bar::new(TradingDate::from_date(local.date()), open, high, low, close, volume) {
            Ok(bar) => bars.push(bar),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(%symbol, skipped, "dropped incomplete yahoo rows");
    }

    Ok(BarSeries::from_unordered(symbol.clone(), bars))
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: YahooChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn responding(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_owned(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(HttpError::new("upstream timeout")),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    // Two NSE sessions (2024-01-09 and 2024-01-10, 09:15 IST), one row with a
    // missing close, and a duplicate of the second session.
    const NSE_CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "currency": "INR", "gmtoffset": 19800 },
                "timestamp": [1704772500, 1704858900, 1704945300, 1704858900],
                "indicators": { "quote": [{
                    "open":   [120.0, 121.0, 122.0, 121.5],
                    "high":   [123.0, 124.0, 125.0, 124.5],
                    "low":    [119.0, 120.0, 121.0, 120.5],
                    "close":  [122.0, 123.0, null,  124.0],
                    "volume": [1000,  1100,  1200,  1300]
                }]}
            }],
            "error": null
        }
    }"#;

    fn request(symbol: &str) -> BarsRequest {
        BarsRequest::new(Symbol::parse(symbol).expect("valid symbol"), Lookback::default())
    }

    #[tokio::test]
    async fn parses_chart_rows_into_local_trading_dates() {
        let client = Arc::new(RecordingHttpClient::responding(200, NSE_CHART));
        let adapter = YahooAdapter::with_http_client(client.clone());

        let series = adapter.bars(request("NMDC.NS")).await.expect("bars should load");

        let dates: Vec<String> = series.bars().iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-09", "2024-01-10"]);
        assert_eq!(series.last().map(|b| b.close), Some(124.0));
        assert_eq!(series.last().and_then(|b| b.volume), Some(1300));

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.contains("/v8/finance/chart/NMDC.NS?"));
        assert!(requests[0].url.contains("interval=1d"));
        assert_eq!(
            requests[0].headers.get("referer").map(String::as_str),
            Some("https://finance.yahoo.com/")
        );
    }

    #[tokio::test]
    async fn unknown_symbol_yields_empty_series() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let adapter =
            YahooAdapter::with_http_client(Arc::new(RecordingHttpClient::responding(404, body)));

        let series = adapter.bars(request("GONE.NS")).await.expect("empty, not an error");
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn upstream_failures_surface_as_source_errors() {
        let adapter =
            YahooAdapter::with_http_client(Arc::new(RecordingHttpClient::responding(503, "")));
        let error = adapter.bars(request("IOB.NS")).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);

        let adapter = YahooAdapter::with_http_client(Arc::new(RecordingHttpClient::failing()));
        let error = adapter.bars(request("IOB.NS")).await.expect_err("must fail");
        assert!(error.message().contains("upstream timeout"));

        let adapter =
            YahooAdapter::with_http_client(Arc::new(RecordingHttpClient::responding(200, "<html>")));
        let error = adapter.bars(request("IOB.NS")).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Malformed);
    }

    #[test]
    fn endpoint_spans_the_lookback_window() {
        let symbol = Symbol::parse("ASHOKLEY.NS").expect("valid");
        let end = TradingDate::parse("2024-01-10")
            .expect("valid")
            .into_inner()
            .midnight()
            .assume_utc();

        let url = chart_endpoint(&symbol, Lookback::days(10), end);

        // 2023-12-31T00:00Z .. 2024-01-10T00:00Z
        assert!(url.contains("period1=1703980800"), "{url}");
        assert!(url.contains("period2=1704844800"), "{url}");
    }

    #[tokio::test]
    async fn mock_mode_is_deterministic_and_skips_weekends() {
        let anchor = TradingDate::parse("2024-01-14").expect("valid");
        let adapter = YahooAdapter::default().anchored_at(anchor);
        let req = BarsRequest::new(Symbol::parse("NHPC.NS").expect("valid"), Lookback::days(13));

        let first = adapter.bars(req.clone()).await.expect("mock bars");
        let second = adapter.bars(req).await.expect("mock bars");

        assert_eq!(first, second);
        // 2024-01-01 (Mon) .. 2024-01-14 (Sun): ten weekdays
        assert_eq!(first.len(), 10);
        assert!(first
            .bars()
            .iter()
            .all(|bar| !matches!(bar.date.into_inner().weekday(), Weekday::Saturday | Weekday::Sunday)));
    }
}
