pub mod binance;

pub use binance::{BinanceClient, BINANCE_API_URL};

use crate::types::MarketSnapshot;
use async_trait::async_trait;

/// Supplies the batch for one screening cycle.
///
/// Retry and reconnect policy belongs to the implementation; callers treat a
/// failure as "no data this cycle".
#[async_trait]
pub trait MarketFeed: Send + Sync {
    async fn snapshot(&self, limit: usize) -> anyhow::Result<MarketSnapshot>;
}

/// Binance feed bound to a benchmark and kline settings.
pub struct BinanceFeed {
    client: BinanceClient,
    benchmark_symbol: String,
    kline_interval: String,
    kline_limit: usize,
}

impl BinanceFeed {
    pub fn new(config: &crate::config::FeedConfig) -> Self {
        Self {
            client: BinanceClient::new(config.api_url.clone(), config.api_key.clone()),
            benchmark_symbol: config.benchmark_symbol.clone(),
            kline_interval: config.kline_interval.clone(),
            kline_limit: config.kline_limit,
        }
    }
}

#[async_trait]
impl MarketFeed for BinanceFeed {
    async fn snapshot(&self, limit: usize) -> anyhow::Result<MarketSnapshot> {
        self.client
            .fetch_snapshot(
                limit,
                &self.benchmark_symbol,
                &self.kline_interval,
                self.kline_limit,
            )
            .await
    }
}
