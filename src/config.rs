use crate::services::indicators::DEFAULT_RSI_PERIOD;
use crate::sources::BINANCE_API_URL;
use crate::types::DEFAULT_PERCENTILE;
use std::env;

/// Market feed configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Binance REST base URL.
    pub api_url: String,
    /// Binance API key (optional, public endpoints work without).
    pub api_key: Option<String>,
    /// Benchmark pair for relative indicators.
    pub benchmark_symbol: String,
    /// Kline interval used for RSI series.
    pub kline_interval: String,
    /// Number of klines fetched per symbol.
    pub kline_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: BINANCE_API_URL.to_string(),
            api_key: None,
            benchmark_symbol: "BTCUSDT".to_string(),
            kline_interval: "1h".to_string(),
            kline_limit: 100,
        }
    }
}

/// Screening defaults, passed explicitly into each cycle.
#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    /// RSI look-back period.
    pub rsi_period: usize,
    /// Default ranking percentile.
    pub percentile: f64,
    /// Default number of pairs screened per cycle.
    pub universe_limit: usize,
    /// Largest universe a request may ask for.
    pub max_universe_limit: usize,
    /// Number of pairs analyzed for the performance ranking.
    pub performance_universe_limit: usize,
    /// Age after which a cached result is refreshed (seconds).
    pub result_ttl_secs: u64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            percentile: DEFAULT_PERCENTILE,
            universe_limit: 100,
            max_universe_limit: 250,
            performance_universe_limit: 50,
            result_ttl_secs: 900, // 15 minutes
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    pub feed: FeedConfig,
    pub screener: ScreenerConfig,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let feed_defaults = FeedConfig::default();
        let screener_defaults = ScreenerConfig::default();

        // A zero period would panic in the RSI engine
        let rsi_period = parsed::<usize>("RSI_PERIOD")
            .filter(|p| *p > 0)
            .unwrap_or(screener_defaults.rsi_period);
        let percentile = parsed::<f64>("SCREENER_PERCENTILE")
            .filter(|p| (0.0..=100.0).contains(p))
            .unwrap_or(screener_defaults.percentile);
        let max_universe_limit = parsed::<usize>("MAX_UNIVERSE_LIMIT")
            .filter(|l| *l > 0)
            .unwrap_or(screener_defaults.max_universe_limit);
        let universe_limit = parsed::<usize>("UNIVERSE_LIMIT")
            .filter(|l| (1..=max_universe_limit).contains(l))
            .unwrap_or_else(|| screener_defaults.universe_limit.min(max_universe_limit));
        let performance_universe_limit = parsed::<usize>("PERFORMANCE_UNIVERSE_LIMIT")
            .filter(|l| *l > 0)
            .unwrap_or(screener_defaults.performance_universe_limit);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("PORT").unwrap_or(5000),
            feed: FeedConfig {
                api_url: env::var("BINANCE_API_URL").unwrap_or(feed_defaults.api_url),
                api_key: env::var("BINANCE_API_KEY").ok(),
                benchmark_symbol: env::var("BENCHMARK_SYMBOL")
                    .unwrap_or(feed_defaults.benchmark_symbol),
                kline_interval: env::var("KLINE_INTERVAL").unwrap_or(feed_defaults.kline_interval),
                kline_limit: parsed("KLINE_LIMIT").unwrap_or(feed_defaults.kline_limit),
            },
            screener: ScreenerConfig {
                rsi_period,
                percentile,
                universe_limit,
                max_universe_limit,
                performance_universe_limit,
                result_ttl_secs: parsed("RESULT_TTL_SECS")
                    .unwrap_or(screener_defaults.result_ttl_secs),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_config_defaults() {
        let feed = FeedConfig::default();
        assert_eq!(feed.api_url, "https://api.binance.com/api/v3");
        assert_eq!(feed.benchmark_symbol, "BTCUSDT");
        assert_eq!(feed.kline_interval, "1h");
        assert_eq!(feed.kline_limit, 100);
        assert!(feed.api_key.is_none());
    }

    #[test]
    fn test_screener_config_defaults() {
        let screener = ScreenerConfig::default();
        assert_eq!(screener.rsi_period, 14);
        assert_eq!(screener.percentile, 95.0);
        assert_eq!(screener.universe_limit, 100);
        assert_eq!(screener.max_universe_limit, 250);
        assert_eq!(screener.performance_universe_limit, 50);
        assert_eq!(screener.result_ttl_secs, 900);
    }

    #[test]
    fn test_config_from_env_is_valid() {
        let config = Config::from_env();
        assert!(config.screener.rsi_period > 0);
        assert!((0.0..=100.0).contains(&config.screener.percentile));
        assert!(config.screener.universe_limit <= config.screener.max_universe_limit);
        assert!(config.screener.performance_universe_limit > 0);
        assert!(!config.host.is_empty());
    }
}
