//! SpecScope service
//!
//! Single binary that serves:
//! - synthetic spectrum sweeps (`/data`)
//! - rule-based interference detection (`/interference`, `/trends`)
//! - ML classification through the external prediction service
//!   (`/ml-interference`, `/ml-interference/replay`)

use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use specscope_control::classifier::HttpClassifier;
use specscope_control::config::Config;
use specscope_control::{api, state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // ── Prediction client ───────────────────────────────────────
    let classifier = HttpClassifier::new(&config.predict_url, config.predict_timeout())?;
    tracing::info!(
        predict_url = %classifier.url(),
        timeout_ms = config.predict_timeout_ms,
        concurrency = config.predict_concurrency,
        "prediction client ready"
    );
    if let Some(seed) = config.seed {
        tracing::warn!(seed, "fixed RNG seed, every request repeats the same sweep");
    }

    // ── Shared state ────────────────────────────────────────────
    let state = state::AppState::new(Arc::new(classifier), config.settings());

    // ── Router ──────────────────────────────────────────────────
    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // ── Listen ──────────────────────────────────────────────────
    tracing::info!("specscope-control listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
