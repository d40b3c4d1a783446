mod config;
mod network;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use network::http::{get_stats, preview, quote, settlement};
use network::stream::{ws_handler, AppState, SharedState};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

fn app(state: SharedState) -> Router {
    Router::new()
        .route("/preview", post(preview))
        .route("/quote", post(quote))
        .route("/settlement", post(settlement))
        .route("/ws", get(ws_handler))
        .route("/stats", get(get_stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv().ok();

    info!("🚀 Starting pool-processor...");

    let config = Config::from_env();
    info!(
        "📋 Default fees: platform {} bps, creator {} bps",
        config.default_fees.platform_fee_bps, config.default_fees.creator_fee_bps
    );

    let addr = config.listen_addr();
    let state: SharedState = Arc::new(AppState::new(config));

    info!("🌐 Preview server starting on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("✅ pool-processor ready!");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
