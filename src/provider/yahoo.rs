// =============================================================================
// Yahoo Finance Chart API Client
// =============================================================================
//
// GET {base_url}/v8/finance/chart/{ticker}?range={period}&interval={interval}
//
// The response carries parallel arrays (timestamp, open, high, low, close,
// volume) in which any entry may be null. Rows with a null field, a bar that
// violates the OHLC range invariants, or a timestamp that does not advance are
// skipped with a warning rather than failing the whole fetch.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::ProviderError;
use crate::market_data::{Bar, Series};
use crate::provider::{Lookback, SeriesProvider};
use crate::runtime_config::ProviderConfig;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Series provider backed by the Yahoo Finance chart endpoint.
#[derive(Clone)]
pub struct YahooChartClient {
    base_url: String,
    interval: String,
    client: reqwest::Client,
}

impl YahooChartClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("ta-snapshot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %config.base_url, interval = %config.interval, "YahooChartClient initialised");

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interval: config.interval.clone(),
            client,
        })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }
}

#[async_trait]
impl SeriesProvider for YahooChartClient {
    #[instrument(skip(self), name = "yahoo::fetch")]
    async fn fetch(&self, ticker: &str, period: Lookback) -> Result<Series, ProviderError> {
        validate_ticker(ticker)?;

        let resp = self
            .client
            .get(self.chart_url(ticker))
            .query(&[("range", period.as_str()), ("interval", self.interval.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        let series = parse_chart(ticker, status.as_u16(), &body)?;
        if series.is_empty() {
            warn!(ticker, %period, "chart returned no usable bars");
        }
        debug!(ticker, count = series.len(), "chart fetched");
        Ok(series)
    }
}

/// Tickers go straight into the URL path; allow only the characters Yahoo
/// symbols use (e.g. `AAPL`, `BRK-B`, `^GSPC`, `EURUSD=X`, `PETR4.SA`).
/// All-dot tickers are path segments (`.`, `..`), not symbols.
fn validate_ticker(ticker: &str) -> Result<(), ProviderError> {
    let ok = !ticker.is_empty()
        && ticker.len() <= 32
        && !ticker.chars().all(|c| c == '.')
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_'));
    if ok {
        Ok(())
    } else {
        Err(ProviderError::InvalidRequest(format!("invalid ticker '{ticker}'")))
    }
}

/// Turn a chart response body into a series.
fn parse_chart(ticker: &str, status: u16, body: &str) -> Result<Series, ProviderError> {
    let envelope: ChartEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => {
            return Err(ProviderError::Malformed(format!("chart body: {e}")));
        }
        Err(_) => {
            return Err(ProviderError::Api {
                status,
                message: body.chars().take(200).collect(),
            });
        }
    };

    if let Some(err) = envelope.chart.error {
        if err.code.eq_ignore_ascii_case("Not Found") {
            return Err(ProviderError::UnknownSymbol(ticker.to_string()));
        }
        return Err(ProviderError::Api {
            status,
            message: format!("{}: {}", err.code, err.description),
        });
    }
    if !(200..300).contains(&status) {
        return Err(ProviderError::Api {
            status,
            message: "chart request failed without error detail".to_string(),
        });
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ProviderError::Malformed("chart result is empty".to_string()))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars: Vec<Bar> = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;

    for (i, &ts) in result.timestamp.iter().enumerate() {
        let field = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let row = (
            DateTime::from_timestamp(ts, 0),
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
        );
        let (Some(timestamp), Some(open), Some(high), Some(low), Some(close)) = row else {
            skipped += 1;
            continue;
        };
        let volume = field(&quote.volume).unwrap_or(0.0);

        if bars.last().is_some_and(|prev| prev.timestamp() >= timestamp) {
            warn!(ticker, %timestamp, "skipping bar that does not advance in time");
            skipped += 1;
            continue;
        }

        match Bar::new(timestamp, open, high, low, close, volume) {
            Ok(bar) => bars.push(bar),
            Err(e) => {
                warn!(ticker, error = %e, "skipping invalid bar");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(ticker, skipped, kept = bars.len(), "chart rows skipped");
    }

    Ok(Series::new(ticker, bars)?)
}
