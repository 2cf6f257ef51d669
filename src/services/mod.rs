pub mod cache;
pub mod indicators;
pub mod performance;
pub mod ranking;
pub mod screener;

pub use cache::{CacheStats, PerformanceCache, ResultCache, ScreenKey, ScreeningCache};
pub use indicators::{compute_all, compute_rsi, indicator_signal, rsi_signal, Rsi, RsiAnalysis};
pub use performance::{performance_score, rank_by_performance};
pub use ranking::{rank, select_top_percentile, top_percentile_count};
pub use screener::{run_screening_cycle, unknown_indicator_result, Screener};
