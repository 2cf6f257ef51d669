//! Relative Strength Index (RSI) engine.

use crate::types::OhlcvSeries;
use serde::Serialize;
use tracing::{debug, warn};

/// Default RSI look-back period.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI (Relative Strength Index) calculator.
///
/// Averages gains and losses with a simplified EMA: the smoothing is seeded
/// with the first raw delta and runs left to right with `alpha = 2/(period+1)`.
/// When there are no losses RS is taken as 0, so a series that only rises
/// evaluates to 0 rather than the textbook 100.
///
/// Values range from 0-100:
/// - 70 and above: Overbought
/// - 30 and below: Oversold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

/// RSI analysis of a candle window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsiAnalysis {
    pub rsi: Option<f64>,
    pub signal: &'static str,
    /// Percent change from the first to the last close of the window.
    pub price_change: Option<f64>,
    /// Percent change from the first to the last candle volume.
    pub volume_change: Option<f64>,
    pub data_points: usize,
    pub last_price: Option<f64>,
}

impl Rsi {
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be positive");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Minimum number of closes needed for a value.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// Compute RSI from closing prices, oldest first.
    ///
    /// Returns `None` when fewer than `period + 1` closes are supplied.
    pub fn compute(&self, closes: &[f64]) -> Option<f64> {
        if closes.len() < self.min_periods() {
            warn!(
                "Insufficient data for RSI calculation. Need {}, got {}",
                self.min_periods(),
                closes.len()
            );
            return None;
        }

        let mut gains = Vec::with_capacity(closes.len() - 1);
        let mut losses = Vec::with_capacity(closes.len() - 1);

        for pair in closes.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let avg_gain = self.smoothed_average(&gains);
        let avg_loss = self.smoothed_average(&losses);

        let rs = if avg_loss != 0.0 { avg_gain / avg_loss } else { 0.0 };
        let rsi = (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0);
        let rsi = round2(rsi);

        debug!("RSI calculated: {:.2} for {} price points", rsi, closes.len());
        Some(rsi)
    }

    /// Arithmetic mean for short sequences, otherwise an EMA seeded with the
    /// first element.
    fn smoothed_average(&self, data: &[f64]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }

        if data.len() <= self.period {
            return data.iter().sum::<f64>() / data.len() as f64;
        }

        let alpha = 2.0 / (self.period as f64 + 1.0);
        data[1..]
            .iter()
            .fold(data[0], |ema, value| alpha * value + (1.0 - alpha) * ema)
    }

    /// Compute RSI plus window price/volume change for a candle series.
    pub fn analyze(&self, series: &OhlcvSeries) -> RsiAnalysis {
        let data_points = series.len();

        if data_points < self.min_periods() {
            return RsiAnalysis {
                rsi: None,
                signal: "Unknown",
                price_change: None,
                volume_change: None,
                data_points,
                last_price: None,
            };
        }

        let closes = series.closes();
        let volumes = series.volumes();
        let rsi = self.compute(&closes);

        RsiAnalysis {
            rsi,
            signal: rsi.map(rsi_signal).unwrap_or("Unknown"),
            price_change: percent_change(&closes),
            volume_change: percent_change(&volumes),
            data_points,
            last_price: closes.last().copied(),
        }
    }
}

/// Compute RSI with an explicit period.
pub fn compute_rsi(closes: &[f64], period: usize) -> Option<f64> {
    Rsi::new(period).compute(closes)
}

/// Five-band RSI classification. Bands are checked in order, first match wins.
pub fn rsi_signal(rsi: f64) -> &'static str {
    if rsi >= 70.0 {
        "Overbought"
    } else if rsi <= 30.0 {
        "Oversold"
    } else if rsi >= 60.0 {
        "Bullish"
    } else if rsi <= 40.0 {
        "Bearish"
    } else {
        "Neutral"
    }
}

fn percent_change(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    let last = *values.last()?;
    if values.len() < 2 || first == 0.0 {
        return None;
    }
    Some(round2((last - first) / first * 100.0))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
