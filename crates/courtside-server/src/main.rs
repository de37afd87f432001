// Dashboard server entry point.
//
// Startup sequence:
// 1. Load config (config/courtside.toml, PORT)
// 2. Initialize tracing
// 3. Load the player index, or the fallback table
// 4. Serve HTTP + WebSocket until Ctrl+C

use courtside_core::config;
use courtside_core::dataset::loader;
use courtside_server::logging::init_tracing;
use courtside_server::routes::{routes, AppContext};

use anyhow::Context;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(config.logging.filter.as_deref())?;
    info!("courtside starting up");

    // 3. Load data
    let dataset = loader::load_or_fallback(&config.data);
    if !dataset.conversion_errors.is_empty() {
        warn!(
            "{} numeric columns were left unconverted",
            dataset.conversion_errors.len()
        );
    }
    info!(
        "serving {} player rows from {}",
        dataset.table.len(),
        dataset.source
    );
    let ctx = AppContext::new(dataset);

    // 4. Serve
    let host = config.server.host.as_str();
    let port = config.server.port;
    let addr = tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("failed to resolve {host}:{port}"))?
        .next()
        .with_context(|| format!("no address found for {host}:{port}"))?;

    let (bound, server) = warp::serve(routes(ctx))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("dashboard listening on http://{bound}");

    server.await;
    info!("courtside shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
