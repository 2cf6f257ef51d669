//! Ranking and top-percentile selection.

use crate::services::indicators::indicator_value;
use crate::types::{CoinWithIndicators, IndicatorKind, RankedCoin};
use tracing::{debug, info, warn};

/// Rank coins by one indicator.
///
/// Coins without a value for the indicator are left out. Ordering is
/// descending for rsi, returns_vs_btc, mansfield_rs and roc, ascending
/// otherwise. The sort is stable, so equal values keep their input order.
/// An unknown indicator name ranks nothing.
pub fn rank(coins: &[CoinWithIndicators], indicator: &str) -> Vec<RankedCoin> {
    let Some(kind) = IndicatorKind::from_str(indicator) else {
        warn!("Unknown indicator '{}', nothing to rank", indicator);
        return Vec::new();
    };

    info!("Ranking {} coins by indicator: {}", coins.len(), kind);

    let mut ranked: Vec<RankedCoin> = coins
        .iter()
        .filter_map(|coin| match coin.indicators.get(kind) {
            Some(value) => Some(RankedCoin {
                rank: 0,
                sample: coin.sample.clone(),
                indicator: indicator_value(kind, value),
                indicators: coin.indicators.clone(),
            }),
            None => {
                debug!("Indicator {} not found for {}", kind, coin.sample.symbol);
                None
            }
        })
        .collect();

    // slice::sort_by is stable
    if kind.ranks_descending() {
        ranked.sort_by(|a, b| b.value().total_cmp(&a.value()));
    } else {
        ranked.sort_by(|a, b| a.value().total_cmp(&b.value()));
    }

    assign_ranks(&mut ranked);
    debug!(
        "Ranked {} coins by {} ({})",
        ranked.len(),
        kind,
        if kind.ranks_descending() { "descending" } else { "ascending" }
    );
    ranked
}

/// Number of coins kept from a ranking of `len` at `percentile`.
///
/// `max(1, floor(len * (100 - percentile) / 100))`, or 0 for an empty ranking.
pub fn top_percentile_count(len: usize, percentile: f64) -> usize {
    assert!(
        (0.0..=100.0).contains(&percentile),
        "percentile must be within [0, 100], got {}",
        percentile
    );

    if len == 0 {
        return 0;
    }

    let count = (len as f64 * (100.0 - percentile) / 100.0).floor() as usize;
    count.clamp(1, len)
}

/// Keep the head of an already-ranked sequence and renumber it from 1.
///
/// Panics if `percentile` is outside `[0, 100]`.
pub fn select_top_percentile(mut ranked: Vec<RankedCoin>, percentile: f64) -> Vec<RankedCoin> {
    let count = top_percentile_count(ranked.len(), percentile);
    if count == 0 {
        warn!("No ranked coins provided");
        return ranked;
    }

    ranked.truncate(count);
    assign_ranks(&mut ranked);

    info!(
        "Top {}% represents {} coins: {:?}",
        100.0 - percentile,
        count,
        ranked.iter().map(RankedCoin::symbol).collect::<Vec<_>>()
    );
    ranked
}

fn assign_ranks(ranked: &mut [RankedCoin]) {
    for (i, coin) in ranked.iter_mut().enumerate() {
        coin.rank = i + 1;
    }
}
