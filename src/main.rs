//! PISA Explorer binary entrypoint.
//! Boots the Axum HTTP server: config, tracing, the initial dataset load,
//! then routes, shared state, and middleware.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pisa_explorer::api::{self, AppState};
use pisa_explorer::config::DatasetConfig;
use pisa_explorer::dataset::{self, state::DatasetStore};
use pisa_explorer::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pisa_explorer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = DatasetConfig::load().context("loading dataset config")?;
    let metrics = Metrics::init();

    // Initial load before serving, so the first request already sees a
    // complete state (loaded, partial, or failed, never half-merged).
    let (coords, primary) = dataset::http_sources(&config);
    let initial = dataset::load_dataset(&coords, &primary).await;
    tracing::info!(rows = initial.rows().len(), "initial dataset state ready");

    let store = Arc::new(DatasetStore::new());
    store.publish(initial);

    let state = AppState {
        store,
        config: Arc::new(config),
    };
    let app = api::create_router(state).merge(metrics.router());

    let addr = std::env::var("PISA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "serving");
    axum::serve(listener, app).await?;
    Ok(())
}
