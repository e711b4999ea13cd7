//! CoinGecko market data client
//!
//! Fetches historical prices for a crypto symbol and computes the four
//! summary indicators the pipeline injects into every prompt. Unlike the
//! news and background-doc providers, failures here are domain errors and
//! fatal to the request: without a price series there is nothing to narrate.

use crate::config::DataConfig;
use crate::error::{DataError, Result};
use brief_core::{ChartPoint, Indicators};
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Symbols supported for crypto data, mapped to provider coin ids.
/// Extend this list to support more assets.
const SYMBOL_TO_ID: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("DOGE", "dogecoin"),
];

/// Price history plus the indicators computed from it
#[derive(Debug, Clone)]
pub struct MarketHistory {
    /// Daily chart points in ascending date order
    pub chart: Vec<ChartPoint>,
    /// Summary statistics over the chart
    pub indicators: Indicators,
}

/// CoinGecko market data client
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    client: Client,
    api_key: String,
}

impl MarketDataClient {
    /// Create a new client from configuration
    ///
    /// Requires `coingecko_api_key` to be set.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let api_key = config
            .coingecko_api_key
            .clone()
            .ok_or(DataError::MissingKey("COINGECKO_API_KEY"))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Fetch historical prices for a symbol between two ISO dates (inclusive)
    ///
    /// Returns the chart plus indicators. Fails with a domain error when the
    /// symbol is unsupported or the provider has no data in the range.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<MarketHistory> {
        let symbol = symbol.to_uppercase();
        let coin_id = coin_id(&symbol).ok_or_else(|| DataError::UnsupportedSymbol {
            symbol: symbol.clone(),
            supported: supported_symbols(),
        })?;

        let from = iso_date_to_unix(start_date)?;
        let to = iso_date_to_unix(end_date)?;

        debug!("Fetching {symbol} history from CoinGecko ({from}..{to})");

        let url = format!("{COINGECKO_BASE_URL}/coins/{coin_id}/market_chart/range");
        let from = from.to_string();
        let to = to.to_string();
        let response = self
            .client
            .get(&url)
            .header("x-cg-demo-api-key", self.api_key.as_str())
            .query(&[
                ("vs_currency", "usd"),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::ApiError {
                provider: "CoinGecko",
                status,
                body: truncate(&body, 200),
            });
        }

        let data: MarketChartResponse = response.json().await?;

        if data.prices.is_empty() {
            return Err(DataError::NoData {
                symbol,
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            });
        }

        let chart: Vec<ChartPoint> = data
            .prices
            .iter()
            .map(|&(ts_ms, price)| ChartPoint::new(millis_to_iso_date(ts_ms), price))
            .collect();

        let indicators = compute_indicators(&chart);

        Ok(MarketHistory { chart, indicators })
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[[timestamp_ms, price], ...]`
    prices: Vec<(f64, f64)>,
}

fn coin_id(symbol: &str) -> Option<&'static str> {
    SYMBOL_TO_ID
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, id)| *id)
}

fn supported_symbols() -> String {
    SYMBOL_TO_ID
        .iter()
        .map(|(s, _)| *s)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert YYYY-MM-DD to a unix timestamp (seconds, midnight UTC)
fn iso_date_to_unix(date: &str) -> Result<i64> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DataError::InvalidDate(date.to_string()))?;
    let midnight = parsed
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DataError::InvalidDate(date.to_string()))?;
    Ok(midnight.and_utc().timestamp())
}

/// Collapse a millisecond timestamp to its ISO date
fn millis_to_iso_date(ts_ms: f64) -> String {
    DateTime::from_timestamp((ts_ms / 1000.0) as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Compute the four summary indicators over a non-empty chart
fn compute_indicators(chart: &[ChartPoint]) -> Indicators {
    let start_price = chart.first().map_or(0.0, |p| p.price);
    let end_price = chart.last().map_or(0.0, |p| p.price);
    let return_pct = if start_price == 0.0 {
        0.0
    } else {
        (end_price - start_price) / start_price * 100.0
    };

    // Max drawdown: worst drop from a previous peak (negative if below peak)
    let mut peak = start_price;
    let mut max_drawdown_pct: f64 = 0.0;
    for point in chart {
        if point.price > peak {
            peak = point.price;
        }
        if peak > 0.0 {
            let drawdown = (point.price - peak) / peak * 100.0;
            if drawdown < max_drawdown_pct {
                max_drawdown_pct = drawdown;
            }
        }
    }

    Indicators {
        start_price: round(start_price, 4),
        end_price: round(end_price, 4),
        return_pct: round(return_pct, 2),
        max_drawdown_pct: round(max_drawdown_pct, 2),
    }
}

fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
