use crate::types::{Candle, MarketSnapshot, OhlcvSeries, PriceSample};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";

/// Characters of an error body kept in the log line.
const ERROR_BODY_PREVIEW: usize = 200;

/// Pause between kline requests to stay under the exchange rate limit.
const KLINE_REQUEST_DELAY_MS: u64 = 100;

/// Leveraged token suffixes excluded from the screening universe.
const LEVERAGED_SUFFIXES: &[&str] = &["UPUSDT", "DOWNUSDT", "BULLUSDT", "BEARUSDT"];

/// Binance 24hr ticker response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTicker {
    symbol: String,
    last_price: String,
    price_change_percent: String,
    quote_volume: String,
}

impl BinanceTicker {
    /// Convert to a sample; tickers with an unparseable or zero price are dropped.
    fn into_sample(self) -> Option<PriceSample> {
        let price: f64 = self.last_price.parse().ok()?;
        if price <= 0.0 {
            return None;
        }

        Some(PriceSample {
            symbol: self.symbol,
            price,
            volume_24h: self.quote_volume.parse().unwrap_or(0.0),
            price_change_24h: self.price_change_percent.parse().ok(),
            rsi: None,
        })
    }
}

/// Parse one kline row: `[openTime, open, high, low, close, volume, ...]`
/// with prices and volume as strings.
fn parse_kline(row: &[serde_json::Value]) -> Option<Candle> {
    let num = |i: usize| -> Option<f64> { row.get(i)?.as_str()?.parse().ok() };

    Some(Candle {
        open_time: row.first()?.as_i64()?,
        open: num(1)?,
        high: num(2)?,
        low: num(3)?,
        close: num(4)?,
        volume: num(5)?,
    })
}

fn is_screenable(symbol: &str) -> bool {
    symbol.ends_with("USDT") && !LEVERAGED_SUFFIXES.iter().any(|s| symbol.ends_with(s))
}

/// USDT pairs sorted by quote volume, highest first.
fn top_by_volume(mut samples: Vec<PriceSample>, limit: usize) -> Vec<PriceSample> {
    samples.retain(|s| is_screenable(&s.symbol));
    samples.sort_by(|a, b| b.volume_24h.total_cmp(&a.volume_24h));
    samples.truncate(limit);
    samples
}

/// First `max` characters of `text`, cut on a char boundary.
fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Binance REST market feed.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent("coin-screener/0.1")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).query(query);
        if let Some(ref key) = self.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "Binance API returned {}: {}",
                status,
                preview(&text, ERROR_BODY_PREVIEW)
            );
            return Err(anyhow::anyhow!("Binance API error: {}", status));
        }

        Ok(response.json().await?)
    }

    /// Fetch 24h tickers for every pair.
    pub async fn fetch_tickers(&self) -> anyhow::Result<Vec<PriceSample>> {
        let tickers: Vec<BinanceTicker> = self.get_json("/ticker/24hr", &[]).await?;
        let samples: Vec<PriceSample> = tickers
            .into_iter()
            .filter_map(BinanceTicker::into_sample)
            .collect();
        debug!("Fetched {} Binance tickers", samples.len());
        Ok(samples)
    }

    /// Fetch a candle window for one symbol, oldest first.
    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> anyhow::Result<OhlcvSeries> {
        let rows: Vec<Vec<serde_json::Value>> = self
            .get_json(
                "/klines",
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let candles = rows.iter().filter_map(|row| parse_kline(row)).collect();
        Ok(OhlcvSeries::new(symbol, candles))
    }

    /// Fetch a full screening batch: the top `limit` USDT pairs by volume,
    /// the benchmark ticker, and a candle window per pair.
    ///
    /// A failed kline request only drops that pair's window.
    pub async fn fetch_snapshot(
        &self,
        limit: usize,
        benchmark_symbol: &str,
        interval: &str,
        kline_limit: usize,
    ) -> anyhow::Result<MarketSnapshot> {
        let tickers = self.fetch_tickers().await?;
        let benchmark = tickers
            .iter()
            .find(|t| t.symbol == benchmark_symbol)
            .cloned();
        if benchmark.is_none() {
            warn!("Benchmark {} missing from Binance tickers", benchmark_symbol);
        }

        let universe = top_by_volume(tickers, limit);
        let mut series = HashMap::with_capacity(universe.len());

        for sample in &universe {
            match self.fetch_ohlcv(&sample.symbol, interval, kline_limit).await {
                Ok(window) => {
                    series.insert(sample.symbol.clone(), window);
                }
                Err(e) => warn!("Failed to fetch klines for {}: {}", sample.symbol, e),
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(KLINE_REQUEST_DELAY_MS)).await;
        }

        info!(
            "Fetched Binance snapshot: {} pairs, {} candle windows",
            universe.len(),
            series.len()
        );

        Ok(MarketSnapshot {
            universe,
            benchmark,
            series,
            fetched_at: chrono::Utc::now(),
        })
    }
}
