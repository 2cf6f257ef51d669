use super::indicator::{IndicatorKind, IndicatorSet, IndicatorValue};
use super::market::PriceSample;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default ranking percentile (top 5%).
pub const DEFAULT_PERCENTILE: f64 = 95.0;

/// A price sample with every indicator that could be computed for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinWithIndicators {
    #[serde(flatten)]
    pub sample: PriceSample,
    pub indicators: IndicatorSet,
}

/// A coin placed in a ranking by one selected indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCoin {
    /// 1-based position.
    pub rank: usize,
    #[serde(flatten)]
    pub sample: PriceSample,
    pub indicator: IndicatorValue,
    pub indicators: IndicatorSet,
}

impl RankedCoin {
    pub fn symbol(&self) -> &str {
        &self.sample.symbol
    }

    pub fn value(&self) -> f64 {
        self.indicator.value
    }
}

/// Parameters for one screening cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningRequest {
    /// Indicator id; unknown ids rank nothing.
    pub indicator: String,
    pub percentile: f64,
}

impl ScreeningRequest {
    pub fn new(indicator: impl Into<String>, percentile: f64) -> Self {
        Self {
            indicator: indicator.into(),
            percentile,
        }
    }

    pub fn for_kind(kind: IndicatorKind, percentile: f64) -> Self {
        Self::new(kind.id(), percentile)
    }
}

impl Default for ScreeningRequest {
    fn default() -> Self {
        Self::for_kind(IndicatorKind::Rsi, DEFAULT_PERCENTILE)
    }
}

/// Output of one screening cycle.
///
/// `top_percentile_count == coins.len() <= total_coins_analyzed`, and `coins`
/// follows the selected indicator's ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub selected_indicator: String,
    pub indicator_description: &'static str,
    pub percentile: f64,
    pub total_coins_analyzed: usize,
    pub top_percentile_count: usize,
    pub timestamp: DateTime<Utc>,
    pub coins: Vec<RankedCoin>,
    pub available_indicators: Vec<IndicatorKind>,
}

/// Coin ranked by the composite RSI/volume/momentum performance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub rank: usize,
    pub symbol: String,
    pub base: String,
    /// Last close of the candle window, or the ticker price without one.
    pub price: f64,
    pub rsi: f64,
    pub signal: &'static str,
    pub price_change_24h: f64,
    pub volume_24h: f64,
    /// Percent change over the candle window.
    pub price_change_period: Option<f64>,
    pub data_points: usize,
    pub performance_score: f64,
    pub binance_link: String,
    pub last_updated: DateTime<Utc>,
}

/// Leader of the latest performance ranking, as reported by the stats view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformer {
    pub symbol: String,
    pub rsi: f64,
    pub signal: &'static str,
}

impl From<&PerformanceEntry> for TopPerformer {
    fn from(entry: &PerformanceEntry) -> Self {
        Self {
            symbol: entry.symbol.clone(),
            rsi: entry.rsi,
            signal: entry.signal,
        }
    }
}
