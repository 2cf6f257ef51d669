use axum::Router;
use coin_screener::{api, config::Config, sources::BinanceFeed, AppState};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coin_screener=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Starting screener on {}:{} (RSI period {}, percentile {}, universe {})",
        config.host,
        config.port,
        config.screener.rsi_period,
        config.screener.percentile,
        config.screener.universe_limit
    );

    let feed = Arc::new(BinanceFeed::new(&config.feed));
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, feed);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Screener listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
