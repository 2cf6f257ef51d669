//! Composite performance ranking for the RSI screener view.

use crate::services::indicators::rsi::{round2, Rsi};
use crate::types::{MarketSnapshot, PerformanceEntry};
use tracing::debug;

const BINANCE_TRADE_URL: &str = "https://www.binance.com/en/trade";

/// Score a coin by RSI band, volume and positive 24h momentum.
///
/// Coins in the 50-70 RSI band score best; overbought and oversold readings
/// are penalized. Volume adds up to 10 points (one per million of quote
/// volume) and each positive percent of 24h change adds 0.1.
pub fn performance_score(rsi: f64, volume_24h: f64, price_change_24h: f64) -> f64 {
    let base = if (50.0..70.0).contains(&rsi) {
        rsi * 1.5
    } else if (40.0..50.0).contains(&rsi) {
        rsi * 1.2
    } else if rsi >= 70.0 {
        rsi * 0.7
    } else {
        rsi * 0.5
    };

    let volume_bonus = (volume_24h / 1_000_000.0).min(10.0);
    let price_bonus = price_change_24h.max(0.0) * 0.1;

    base + volume_bonus + price_bonus
}

/// Analyze every universe coin's candle window and rank the ones with an
/// RSI value by performance score, best first, keeping at most `limit`.
///
/// Coins without a window, or with too short a window, are skipped. A
/// missing 24h change counts as no change.
pub fn rank_by_performance(
    snapshot: &MarketSnapshot,
    rsi: &Rsi,
    limit: usize,
) -> Vec<PerformanceEntry> {
    let mut entries: Vec<PerformanceEntry> = snapshot
        .universe
        .iter()
        .filter_map(|sample| {
            let analysis = rsi.analyze(snapshot.series_for(&sample.symbol)?);
            let rsi_value = analysis.rsi?;
            let change = sample.price_change_24h.unwrap_or(0.0);

            Some(PerformanceEntry {
                rank: 0,
                symbol: sample.symbol.clone(),
                base: sample.base().to_string(),
                price: analysis.last_price.unwrap_or(sample.price),
                rsi: rsi_value,
                signal: analysis.signal,
                price_change_24h: change,
                volume_24h: sample.volume_24h,
                price_change_period: analysis.price_change,
                data_points: analysis.data_points,
                performance_score: performance_score(rsi_value, sample.volume_24h, change),
                binance_link: format!("{}/{}", BINANCE_TRADE_URL, sample.symbol),
                last_updated: snapshot.fetched_at,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.performance_score.total_cmp(&a.performance_score));
    entries.truncate(limit);

    debug!("Ranked {} coins by performance score", entries.len());

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
        entry.performance_score = round2(entry.performance_score);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candle, OhlcvSeries, PriceSample};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn window(symbol: &str, closes: &[f64]) -> OhlcvSeries {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, close)| Candle {
                open_time: i as i64,
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 10.0,
            })
            .collect();
        OhlcvSeries::new(symbol, candles)
    }

    #[test]
    fn test_score_bands() {
        assert!(approx(performance_score(60.0, 0.0, 0.0), 90.0));
        assert!(approx(performance_score(45.0, 0.0, 0.0), 54.0));
        assert!(approx(performance_score(80.0, 0.0, 0.0), 56.0));
        assert!(approx(performance_score(20.0, 0.0, 0.0), 10.0));
    }

    #[test]
    fn test_score_bonuses() {
        // volume bonus caps at 10, negative change adds nothing
        assert!(approx(performance_score(20.0, 50_000_000.0, -4.0), 20.0));
        assert!(approx(performance_score(20.0, 2_000_000.0, 10.0), 13.0));
    }

    #[test]
    fn test_rank_by_performance_uses_window_analysis() {
        // period 3 windows: [10, 12, 11, 12] gives RSI 75, falling gives 0.
        let snapshot = MarketSnapshot::new(
            vec![
                PriceSample::new("AUSDT", 1.0, 0.0).with_change(-2.0),
                PriceSample::new("BUSDT", 2.0, 3_000_000.0).with_change(4.0),
                PriceSample::new("CUSDT", 3.0, 0.0),
                PriceSample::new("DUSDT", 4.0, 0.0),
            ],
            None,
        )
        .with_series(window("AUSDT", &[4.0, 3.0, 2.0, 1.0]))
        .with_series(window("BUSDT", &[10.0, 12.0, 11.0, 12.0]))
        .with_series(window("DUSDT", &[1.0, 2.0]));

        let ranked = rank_by_performance(&snapshot, &Rsi::new(3), 10);
        assert_eq!(ranked.len(), 2);

        let top = &ranked[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.symbol, "BUSDT");
        assert_eq!(top.base, "B");
        assert_eq!(top.rsi, 75.0);
        assert_eq!(top.signal, "Overbought");
        assert_eq!(top.price, 12.0);
        assert_eq!(top.price_change_period, Some(20.0));
        assert_eq!(top.data_points, 4);
        // 75 * 0.7 + 3 + 0.4
        assert_eq!(top.performance_score, 55.9);
        assert_eq!(top.binance_link, "https://www.binance.com/en/trade/BUSDT");
        assert_eq!(top.last_updated, snapshot.fetched_at);

        assert_eq!(ranked[1].symbol, "AUSDT");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].signal, "Oversold");
        assert_eq!(ranked[1].price_change_24h, -2.0);
    }

    #[test]
    fn test_rank_by_performance_truncates() {
        let snapshot = MarketSnapshot::new(
            vec![
                PriceSample::new("AUSDT", 1.0, 0.0),
                PriceSample::new("BUSDT", 1.0, 0.0),
            ],
            None,
        )
        .with_series(window("AUSDT", &[4.0, 3.0, 2.0, 1.0]))
        .with_series(window("BUSDT", &[10.0, 12.0, 11.0, 12.0]));

        let ranked = rank_by_performance(&snapshot, &Rsi::new(3), 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].symbol, "BUSDT");
    }
}
