mod config;
mod db;
mod errors;
mod fortune;
mod models;
mod routes;
mod state;
mod stroke_client;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::fortune::history::PgFortuneStore;
use crate::fortune::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::fortune::service::FortuneService;
use crate::routes::build_router;
use crate::state::AppState;
use crate::stroke_client::{HttpStrokeOracle, StrokeClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fortune API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgFortuneStore::new(db));

    // Initialize stroke oracle client
    let oracle = HttpStrokeOracle::new(
        &config.stroke_service_url,
        Duration::from_secs(config.stroke_service_timeout_secs),
    )
    .context("Failed to build stroke oracle client")?;
    let strokes = StrokeClient::new(Arc::new(oracle));
    info!("Stroke oracle client initialized ({})", config.stroke_service_url);

    let rng: Arc<dyn RandomSource> = match config.fortune_seed {
        Some(seed) => {
            info!("Using seeded randomness (seed {seed})");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };

    let fortune = Arc::new(FortuneService::new(strokes.clone(), store.clone(), store, rng));

    // Build app state
    let state = AppState { fortune, strokes };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
