//! HTTP-level tests against the screener router with an in-memory feed.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use coin_screener::config::{Config, FeedConfig, ScreenerConfig};
use coin_screener::sources::MarketFeed;
use coin_screener::types::{MarketSnapshot, PriceSample};
use coin_screener::{api, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

struct FixedFeed(MarketSnapshot);

#[async_trait]
impl MarketFeed for FixedFeed {
    async fn snapshot(&self, limit: usize) -> anyhow::Result<MarketSnapshot> {
        let mut snapshot = self.0.clone();
        snapshot.universe.truncate(limit);
        Ok(snapshot)
    }
}

fn app() -> Router {
    let btc = PriceSample::new("BTCUSDT", 50000.0, 2.0e9).with_change(2.0);
    let universe = vec![
        btc.clone(),
        PriceSample::new("ETHUSDT", 3000.0, 1.0e9).with_change(5.0),
        PriceSample::new("SOLUSDT", 150.0, 5.0e8).with_change(-4.0),
    ];
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        feed: FeedConfig::default(),
        screener: ScreenerConfig::default(),
    };
    let feed = Arc::new(FixedFeed(MarketSnapshot::new(universe, Some(btc))));

    api::router().with_state(AppState::new(config, feed))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get_json(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_screener_endpoint_ranks_by_indicator() {
    let uri = "/api/screener?indicator=returns_vs_btc&percentile=0";
    let (status, body) = get_json(app(), uri).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["success"], true);
    assert_eq!(data["selectedIndicator"], "returns_vs_btc");
    assert_eq!(data["indicatorDescription"], "24h Returns vs Bitcoin");
    assert_eq!(data["totalCoinsAnalyzed"], 3);
    assert_eq!(data["topPercentileCount"], 3);

    let coins = data["coins"].as_array().unwrap();
    let symbols: Vec<&str> = coins.iter().map(|c| c["symbol"].as_str().unwrap()).collect();
    assert_eq!(symbols, vec!["ETHUSDT", "BTCUSDT", "SOLUSDT"]);
    assert_eq!(coins[0]["rank"], 1);
    assert_eq!(coins[0]["indicator"]["signal"], "Outperforming");
    assert_eq!(coins[2]["indicator"]["signal"], "Weak Underperformance");
    assert_eq!(body["meta"]["cached"], false);
}

#[tokio::test]
async fn test_screener_endpoint_default_percentile_keeps_one() {
    let (status, body) = get_json(app(), "/api/screener?indicator=vwap").await;
    assert_eq!(status, StatusCode::OK);
    let coins = body["data"]["coins"].as_array().unwrap();
    assert_eq!(coins.len(), 1);
    assert_eq!(coins[0]["symbol"], "SOLUSDT");
}

#[tokio::test]
async fn test_screener_endpoint_unknown_indicator() {
    let (status, body) = get_json(app(), "/api/screener?indicator=macd").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["indicatorDescription"], "Unknown indicator");
    assert_eq!(body["data"]["totalCoinsAnalyzed"], 0);
    assert!(body["data"]["coins"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["message"], "Unknown indicator: macd");
}

#[tokio::test]
async fn test_screener_endpoint_limit_over_cap() {
    let (status, body) = get_json(app(), "/api/screener?indicator=roc&limit=100000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_screener_endpoint_bad_percentile() {
    let (status, body) = get_json(app(), "/api/screener?percentile=150").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_indicators_endpoint() {
    let (status, body) = get_json(app(), "/api/screener/indicators").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data[2]["id"], "mansfield_rs");
    assert_eq!(data[2]["description"], "Mansfield Relative Strength");
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (status, body) = get_json(app(), "/api/screener/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["screenings"]["entries"], 0);
    assert_eq!(body["data"]["screenings"]["ttlSecs"], 900);
    assert!(body["data"]["screenings"]["lastUpdate"].is_null());
    assert_eq!(body["data"]["performance"]["entries"], 0);
    assert!(body["data"]["topPerformer"].is_null());
}
