//! Screener API endpoints.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::{unknown_indicator_result, CacheStats, ScreenKey};
use crate::types::{
    IndicatorInfo, IndicatorKind, PerformanceEntry, ScreeningRequest, ScreeningResult,
    TopPerformer,
};
use crate::AppState;

/// Entries returned by the performance view when no limit is given.
const DEFAULT_PERFORMANCE_LIMIT: usize = 10;

/// Query parameters for the screening endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenerQuery {
    /// Indicator id: rsi, returns_vs_btc, mansfield_rs, roc, vwap
    pub indicator: Option<String>,
    /// Ranking percentile in [0, 100]; 95 keeps the top 5%.
    pub percentile: Option<f64>,
    /// Number of pairs (by volume) to screen.
    pub limit: Option<usize>,
    /// Bypass the cached result.
    #[serde(default)]
    pub refresh: bool,
}

/// Query parameters for the performance endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PerformanceQuery {
    /// Number of ranked coins to return.
    pub limit: Option<usize>,
    /// Bypass the cached ranking.
    #[serde(default)]
    pub refresh: bool,
}

/// Cache state of both views plus the current performance leader.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerStats {
    pub screenings: CacheStats,
    pub performance: CacheStats,
    pub top_performer: Option<TopPerformer>,
}

/// Create the screener router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_screening))
        .route("/indicators", get(get_indicators))
        .route("/stats", get(get_stats))
        .route("/performance", get(get_performance))
}

/// Screen the universe by one indicator, reusing a fresh cached result.
async fn get_screening(
    State(state): State<AppState>,
    Query(query): Query<ScreenerQuery>,
) -> Result<Json<ApiResponse<Arc<ScreeningResult>>>> {
    let defaults = &state.config.screener;
    let indicator = query
        .indicator
        .unwrap_or_else(|| IndicatorKind::Rsi.id().to_string());
    let percentile = query.percentile.unwrap_or(defaults.percentile);
    let limit = query.limit.unwrap_or(defaults.universe_limit);

    if !(0.0..=100.0).contains(&percentile) {
        return Err(AppError::BadRequest(format!(
            "percentile must be within [0, 100], got {}",
            percentile
        )));
    }
    if limit == 0 || limit > defaults.max_universe_limit {
        return Err(AppError::BadRequest(format!(
            "limit must be within [1, {}], got {}",
            defaults.max_universe_limit, limit
        )));
    }

    let request = ScreeningRequest::new(indicator, percentile);
    let Some(kind) = IndicatorKind::from_str(&request.indicator) else {
        info!("Unknown indicator requested: {}", request.indicator);
        return Ok(Json(ApiResponse::new(Arc::new(unknown_indicator_result(
            &request,
        )))));
    };

    let key = ScreenKey::new(kind, percentile, limit);
    if !query.refresh {
        if let Some(cached) = state.screenings.get(&key) {
            info!("Using cached screening result for {}", kind);
            return Ok(Json(ApiResponse::cached(cached)));
        }
    }

    let snapshot = match state.feed.snapshot(limit).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Market feed failed: {}", e);
            if let Some(stale) = state.screenings.get_stale(&key) {
                return Ok(Json(ApiResponse::cached(stale)));
            }
            return Err(e.into());
        }
    };

    let result = state.screener.screen(&snapshot, &request);
    let result = state.screenings.insert(key, result);

    Ok(Json(ApiResponse::new(result)))
}

/// List the available indicators.
async fn get_indicators() -> Json<ApiResponse<Vec<IndicatorInfo>>> {
    let indicators = IndicatorKind::ALL.into_iter().map(IndicatorInfo::from).collect();
    Json(ApiResponse::new(indicators))
}

/// Cache statistics: entry counts, last update, next refresh and the leader
/// of the latest performance ranking.
async fn get_stats(State(state): State<AppState>) -> Json<ApiResponse<ScreenerStats>> {
    let top_performer = state
        .performance
        .latest()
        .and_then(|entries| entries.first().map(TopPerformer::from));

    Json(ApiResponse::new(ScreenerStats {
        screenings: state.screenings.stats(),
        performance: state.performance.stats(),
        top_performer,
    }))
}

/// Rank the performance universe by the composite RSI performance score.
async fn get_performance(
    State(state): State<AppState>,
    Query(query): Query<PerformanceQuery>,
) -> Result<Json<ApiResponse<Arc<Vec<PerformanceEntry>>>>> {
    let universe = state.config.screener.performance_universe_limit;
    let limit = query
        .limit
        .unwrap_or_else(|| DEFAULT_PERFORMANCE_LIMIT.min(universe));

    if limit == 0 || limit > universe {
        return Err(AppError::BadRequest(format!(
            "limit must be within [1, {}], got {}",
            universe, limit
        )));
    }

    if !query.refresh {
        if let Some(cached) = state.performance.get(&limit) {
            info!("Using cached performance ranking (top {})", limit);
            return Ok(Json(ApiResponse::cached(cached)));
        }
    }

    let snapshot = match state.feed.snapshot(universe).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Market feed failed: {}", e);
            if let Some(stale) = state.performance.get_stale(&limit) {
                return Ok(Json(ApiResponse::cached(stale)));
            }
            return Err(e.into());
        }
    };

    let entries = state.screener.performance(&snapshot, limit);
    info!("Ranked {} coins by performance", entries.len());

    Ok(Json(ApiResponse::new(state.performance.insert(limit, entries))))
}
