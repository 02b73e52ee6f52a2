//! SectorGrid - warehouse sector grid server
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use sectorgrid_lib::{router, AppContext};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so we can see .env loading
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    info!("SectorGrid starting...");

    let ctx = AppContext::new().await.context("failed to initialize application context")?;
    let bind_address = ctx.config.server.bind_address.clone();
    let app = router(Arc::new(ctx));

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(address = %bind_address, "SectorGrid listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("SectorGrid stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", err);
    }
}
