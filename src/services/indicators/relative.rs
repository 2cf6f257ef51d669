//! Indicators measured relative to the benchmark asset.

use tracing::debug;

/// Coin 24h change minus benchmark 24h change, in percentage points.
pub fn returns_vs_btc(coin_change: f64, btc_change: f64) -> f64 {
    coin_change - btc_change
}

/// Mansfield relative strength as a percentage.
///
/// `((1 + coin/100) / (1 + btc/100) - 1) * 100`, defined as 0 when the
/// benchmark did not move or lost its whole value (change of -100% or less).
pub fn mansfield_rs(coin_change: f64, btc_change: f64) -> f64 {
    if btc_change == 0.0 {
        debug!("Benchmark change is 0, Mansfield RS defined as 0");
        return 0.0;
    }

    let benchmark_ratio = 1.0 + btc_change / 100.0;
    if benchmark_ratio <= 0.0 {
        debug!("Benchmark change is {}%, Mansfield RS defined as 0", btc_change);
        return 0.0;
    }

    ((1.0 + coin_change / 100.0) / benchmark_ratio - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_vs_btc() {
        assert_eq!(returns_vs_btc(5.0, 2.0), 3.0);
        assert_eq!(returns_vs_btc(2.0, 2.0), 0.0);
        assert_eq!(returns_vs_btc(-3.0, 2.0), -5.0);
    }

    #[test]
    fn test_mansfield_rs_zero_benchmark() {
        assert_eq!(mansfield_rs(10.0, 0.0), 0.0);
        assert_eq!(mansfield_rs(-50.0, 0.0), 0.0);
    }

    #[test]
    fn test_mansfield_rs_wiped_out_benchmark() {
        assert_eq!(mansfield_rs(10.0, -100.0), 0.0);
        assert_eq!(mansfield_rs(-100.0, -100.0), 0.0);
        assert_eq!(mansfield_rs(10.0, -150.0), 0.0);
        assert!(mansfield_rs(10.0, -99.0).is_finite());
    }

    #[test]
    fn test_mansfield_rs_ratio() {
        // 1.10 / 1.05 - 1 = 4.7619%
        let value = mansfield_rs(10.0, 5.0);
        assert!((value - 4.761_904_761_9).abs() < 1e-6, "got {}", value);
    }

    #[test]
    fn test_mansfield_rs_equal_moves() {
        assert!(mansfield_rs(3.0, 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mansfield_rs_underperformance() {
        // 0.98 / 1.02 - 1 = -3.9216%
        let value = mansfield_rs(-2.0, 2.0);
        assert!((value + 3.921_568_627).abs() < 1e-6, "got {}", value);
    }
}
