use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One coin's 24h market snapshot for a screening cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSample {
    /// Exchange pair id, e.g. "BTCUSDT".
    pub symbol: String,
    pub price: f64,
    /// Quote-currency volume over the last 24h.
    pub volume_24h: f64,
    /// Signed 24h percentage change (+3.5 means +3.5%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<f64>,
    /// RSI computed from the symbol's close series, when one was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
}

impl PriceSample {
    pub fn new(symbol: impl Into<String>, price: f64, volume_24h: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            volume_24h,
            price_change_24h: None,
            rsi: None,
        }
    }

    pub fn with_change(mut self, price_change_24h: f64) -> Self {
        self.price_change_24h = Some(price_change_24h);
        self
    }

    pub fn with_rsi(mut self, rsi: Option<f64>) -> Self {
        self.rsi = rsi;
        self
    }

    /// Base asset of a USDT pair ("ETHUSDT" -> "ETH").
    pub fn base(&self) -> &str {
        self.symbol.strip_suffix("USDT").unwrap_or(&self.symbol)
    }
}

/// A single OHLCV candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Candle open time in unix milliseconds.
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Fixed-size candle window for one symbol, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OhlcvSeries {
    pub symbol: String,
    pub candles: Vec<Candle>,
}

impl OhlcvSeries {
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Inbound batch for one screening cycle, as delivered by a market feed.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub universe: Vec<PriceSample>,
    pub benchmark: Option<PriceSample>,
    /// Candle windows keyed by symbol, used for RSI analysis.
    pub series: HashMap<String, OhlcvSeries>,
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(universe: Vec<PriceSample>, benchmark: Option<PriceSample>) -> Self {
        Self {
            universe,
            benchmark,
            series: HashMap::new(),
            fetched_at: Utc::now(),
        }
    }

    pub fn with_series(mut self, series: OhlcvSeries) -> Self {
        self.series.insert(series.symbol.clone(), series);
        self
    }

    /// Attach a close-only window (flat candles, zero volume).
    pub fn with_closes(self, symbol: impl Into<String>, closes: Vec<f64>) -> Self {
        let candles = closes
            .into_iter()
            .enumerate()
            .map(|(i, close)| Candle {
                open_time: i as i64,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        self.with_series(OhlcvSeries::new(symbol, candles))
    }

    pub fn series_for(&self, symbol: &str) -> Option<&OhlcvSeries> {
        self.series.get(symbol)
    }
}
