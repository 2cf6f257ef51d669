//! Indicator library: per-coin indicator values and their signal labels.

pub mod relative;
pub mod rsi;

pub use relative::{mansfield_rs, returns_vs_btc};
pub use rsi::{compute_rsi, rsi_signal, Rsi, RsiAnalysis, DEFAULT_RSI_PERIOD};

use crate::types::{IndicatorKind, IndicatorSet, IndicatorValue, PriceSample};
use tracing::debug;

/// Compute every indicator whose inputs are present.
///
/// Indicators with a missing input are left out of the set:
/// - `rsi` needs the coin's RSI value
/// - `returns_vs_btc` and `mansfield_rs` need both 24h changes
/// - `roc` needs the coin's 24h change
/// - `vwap` is the coin's price (no volume weighting yet)
pub fn compute_all(coin: &PriceSample, benchmark: &PriceSample) -> IndicatorSet {
    let mut indicators = IndicatorSet::new();

    if let Some(rsi) = coin.rsi {
        indicators.insert(IndicatorKind::Rsi, rsi);
    }

    if let (Some(coin_change), Some(btc_change)) =
        (coin.price_change_24h, benchmark.price_change_24h)
    {
        indicators.insert(
            IndicatorKind::ReturnsVsBtc,
            returns_vs_btc(coin_change, btc_change),
        );
        indicators.insert(
            IndicatorKind::MansfieldRs,
            mansfield_rs(coin_change, btc_change),
        );
    }

    if let Some(coin_change) = coin.price_change_24h {
        indicators.insert(IndicatorKind::Roc, coin_change);
    }

    indicators.insert(IndicatorKind::Vwap, coin.price);

    debug!(
        "Calculated {} indicators for {}",
        indicators.len(),
        coin.symbol
    );
    indicators
}

/// Qualitative label for an indicator value. Thresholds are checked top to
/// bottom and the first match wins.
pub fn indicator_signal(kind: IndicatorKind, value: f64) -> &'static str {
    match kind {
        IndicatorKind::Rsi => match value {
            v if v >= 70.0 => "Overbought",
            v if v <= 30.0 => "Oversold",
            v if v >= 50.0 => "Bullish",
            _ => "Bearish",
        },
        IndicatorKind::ReturnsVsBtc => match value {
            v if v > 5.0 => "Strong Outperformance",
            v if v > 0.0 => "Outperforming",
            v if v > -5.0 => "Underperforming",
            _ => "Weak Underperformance",
        },
        IndicatorKind::MansfieldRs => match value {
            v if v > 10.0 => "Very Strong",
            v if v > 5.0 => "Strong",
            v if v > 0.0 => "Positive",
            v if v > -5.0 => "Weak",
            _ => "Very Weak",
        },
        IndicatorKind::Roc => match value {
            v if v > 20.0 => "Very Strong Momentum",
            v if v > 10.0 => "Strong Momentum",
            v if v > 0.0 => "Positive Momentum",
            v if v > -10.0 => "Weak Momentum",
            _ => "Very Weak Momentum",
        },
        IndicatorKind::Vwap => "Neutral",
    }
}

/// Pair a value with its signal label.
pub fn indicator_value(kind: IndicatorKind, value: f64) -> IndicatorValue {
    IndicatorValue {
        indicator: kind,
        value,
        signal: indicator_signal(kind, value),
    }
}
