use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    cached_results: usize,
    last_screening: Option<DateTime<Utc>>,
    last_performance_update: Option<DateTime<Utc>>,
}

/// Liveness plus the age of the newest screening result.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let screenings = state.screenings.stats();
    let performance = state.performance.stats();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cached_results: screenings.entries + performance.entries,
        last_screening: screenings.last_update,
        last_performance_update: performance.last_update,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
