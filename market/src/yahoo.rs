//! Yahoo Finance HTTP client.
//!
//! Two endpoints cover everything the engine needs:
//!   - `/v7/finance/quote`          one snapshot row per symbol
//!   - `/v8/finance/chart/{symbol}` daily closes for fallback computations

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::source::{QuoteSource, SourceError};
use crate::types::Quote;

const BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Clone)]
pub struct YahooClient {
    http: Client,
}

impl YahooClient {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tickerbeat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<QuotePayload>,
}

/// Snapshot row as Yahoo returns it. Only the fields the engine reads
/// are modeled; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
struct QuotePayload {
    symbol: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "preMarketPrice")]
    pre_market_price: Option<f64>,
    #[serde(rename = "regularMarketPreviousClose")]
    regular_market_previous_close: Option<f64>,
    #[serde(rename = "regularMarketVolume")]
    regular_market_volume: Option<u64>,
    #[serde(rename = "averageDailyVolume10Day")]
    average_daily_volume_10_day: Option<u64>,
}

impl From<QuotePayload> for Quote {
    fn from(p: QuotePayload) -> Self {
        Quote {
            symbol: p.symbol,
            // During pre-market the regular price is yesterday's print;
            // prefer the pre-market quote when the exchange publishes one.
            last_price: p.pre_market_price.or(p.regular_market_price),
            previous_close: p.regular_market_previous_close,
            last_volume: p.regular_market_volume,
            average_volume: p.average_daily_volume_10_day,
            short_name: p.short_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartResponse,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    close: Option<Vec<Option<f64>>>,
}

/// Flatten the chart envelope into the non-null closes, oldest first.
fn closes_from(envelope: ChartEnvelope) -> Vec<f64> {
    envelope
        .chart
        .result
        .into_iter()
        .flatten()
        .flat_map(|r| r.indicators.quote)
        .filter_map(|q| q.close)
        .flatten()
        .flatten()
        .collect()
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, SourceError> {
        let url = format!("{BASE_URL}/v7/finance/quote");

        let resp = self
            .http
            .get(&url)
            .query(&[("symbols", symbol)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: QuoteEnvelope = resp.json().await?;

        debug!(symbol = %symbol, "quote fetched");

        envelope
            .quote_response
            .result
            .into_iter()
            .next()
            .map(Quote::from)
            .ok_or_else(|| SourceError::NoData(symbol.to_string()))
    }

    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<f64>, SourceError> {
        let url = format!("{BASE_URL}/v8/finance/chart/{symbol}");
        let range = format!("{days}d");

        let resp = self
            .http
            .get(&url)
            .query(&[("range", range.as_str()), ("interval", "1d")])
            .send()
            .await?
            .error_for_status()?;

        let envelope: ChartEnvelope = resp.json().await?;
        let closes = closes_from(envelope);

        debug!(symbol = %symbol, days = days, closes = closes.len(), "history fetched");

        if closes.is_empty() {
            return Err(SourceError::NoData(symbol.to_string()));
        }

        Ok(closes)
    }
}
