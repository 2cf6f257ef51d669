//! Coin screener - multi-indicator cryptocurrency screening server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{PerformanceCache, ScreeningCache, Screener};
use sources::MarketFeed;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed: Arc<dyn MarketFeed>,
    pub screener: Screener,
    pub screenings: Arc<ScreeningCache>,
    pub performance: Arc<PerformanceCache>,
}

impl AppState {
    pub fn new(config: Config, feed: Arc<dyn MarketFeed>) -> Self {
        let screener = Screener::new(config.screener.rsi_period);
        let ttl = Duration::from_secs(config.screener.result_ttl_secs);

        Self {
            config: Arc::new(config),
            feed,
            screener,
            screenings: Arc::new(ScreeningCache::new(ttl)),
            performance: Arc::new(PerformanceCache::new(ttl)),
        }
    }
}

// Re-export commonly used types
pub use types::*;
