//! Screening orchestrator: indicators -> ranking -> percentile slice.

use crate::services::indicators::{compute_all, Rsi};
use crate::services::performance::rank_by_performance;
use crate::services::ranking::{rank, select_top_percentile};
use crate::types::{
    describe_indicator, CoinWithIndicators, IndicatorKind, MarketSnapshot, PerformanceEntry,
    PriceSample, ScreeningRequest, ScreeningResult,
};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Run one screening cycle over an in-memory batch.
///
/// Steps run in a fixed order: attach indicators to every coin against the
/// benchmark, rank by the requested indicator, keep the top percentile, then
/// stamp the result. An empty universe gives an unsuccessful but well-formed
/// result.
///
/// Panics if `request.percentile` is outside `[0, 100]`.
pub fn run_screening_cycle(
    universe: &[PriceSample],
    benchmark: &PriceSample,
    request: &ScreeningRequest,
) -> ScreeningResult {
    assert!(
        (0.0..=100.0).contains(&request.percentile),
        "percentile must be within [0, 100], got {}",
        request.percentile
    );
    info!("Starting screening for indicator: {}", request.indicator);

    if universe.is_empty() {
        warn!("No coins data available");
        return empty_result(request, false, "No coins data available".to_string());
    }

    let coins: Vec<CoinWithIndicators> = universe
        .iter()
        .map(|sample| CoinWithIndicators {
            sample: sample.clone(),
            indicators: compute_all(sample, benchmark),
        })
        .collect();
    debug!("Calculated indicators for {} coins", coins.len());

    let ranked = rank(&coins, &request.indicator);
    let total_coins_analyzed = ranked.len();
    let top = select_top_percentile(ranked, request.percentile);

    info!(
        "Screening completed: {} of {} coins in top slice",
        top.len(),
        total_coins_analyzed
    );

    ScreeningResult {
        success: true,
        message: None,
        selected_indicator: request.indicator.clone(),
        indicator_description: describe_indicator(&request.indicator),
        percentile: request.percentile,
        total_coins_analyzed,
        top_percentile_count: top.len(),
        timestamp: Utc::now(),
        coins: top,
        available_indicators: IndicatorKind::ALL.to_vec(),
    }
}

/// Result for an indicator id that ranks nothing, built without market data.
///
/// Matches what a cycle over any universe yields for that id: a successful
/// result with no ranked coins.
pub fn unknown_indicator_result(request: &ScreeningRequest) -> ScreeningResult {
    empty_result(
        request,
        true,
        format!("Unknown indicator: {}", request.indicator),
    )
}

fn empty_result(request: &ScreeningRequest, success: bool, message: String) -> ScreeningResult {
    ScreeningResult {
        success,
        message: Some(message),
        selected_indicator: request.indicator.clone(),
        indicator_description: describe_indicator(&request.indicator),
        percentile: request.percentile,
        total_coins_analyzed: 0,
        top_percentile_count: 0,
        timestamp: Utc::now(),
        coins: Vec::new(),
        available_indicators: IndicatorKind::ALL.to_vec(),
    }
}

/// Screens market snapshots, attaching RSI from close series first.
///
/// Holds only its RSI settings; every call works on its own snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Screener {
    rsi: Rsi,
}

impl Screener {
    pub fn new(rsi_period: usize) -> Self {
        Self {
            rsi: Rsi::new(rsi_period),
        }
    }

    /// Universe samples with RSI filled from the snapshot's candle windows.
    /// Symbols without a window, or with too short a window, keep no RSI.
    pub fn with_rsi(&self, snapshot: &MarketSnapshot) -> Vec<PriceSample> {
        snapshot
            .universe
            .iter()
            .map(|sample| {
                let rsi = snapshot
                    .series_for(&sample.symbol)
                    .and_then(|series| self.rsi.compute(&series.closes()));
                sample.clone().with_rsi(rsi.or(sample.rsi))
            })
            .collect()
    }

    /// Run a screening cycle on a snapshot.
    ///
    /// A snapshot without a benchmark screens against a benchmark with no
    /// 24h change, so the relative indicators are left out for every coin.
    pub fn screen(&self, snapshot: &MarketSnapshot, request: &ScreeningRequest) -> ScreeningResult {
        let universe = self.with_rsi(snapshot);
        let benchmark = match &snapshot.benchmark {
            Some(benchmark) => benchmark.clone(),
            None => {
                warn!("No benchmark sample, relative indicators will be omitted");
                PriceSample::new("BTCUSDT", 0.0, 0.0)
            }
        };

        run_screening_cycle(&universe, &benchmark, request)
    }

    /// Rank a snapshot's coins by performance score, keeping the top `limit`.
    pub fn performance(&self, snapshot: &MarketSnapshot, limit: usize) -> Vec<PerformanceEntry> {
        rank_by_performance(snapshot, &self.rsi, limit)
    }
}
