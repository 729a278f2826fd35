//! HTTP server for the itops issue tracker.
//!
//! Loads [`ServerConfig`], seeds the user directory, and serves the tracker
//! routes until Ctrl-C is received.

use std::sync::Arc;

use anyhow::Context;
use itops::{
    api::{build_router, cors_layer},
    config::ServerConfig,
    issue::{
        adapters::memory::{InMemoryIssueRepository, StaticUserDirectory},
        services::IssueTrackerService,
    },
};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let directory = StaticUserDirectory::seeded();
    info!(users = directory.len(), "user directory seeded");
    let service = IssueTrackerService::new(
        Arc::new(InMemoryIssueRepository::new()),
        Arc::new(directory),
        Arc::new(DefaultClock),
    );
    let cors = cors_layer(&config.allowed_origin)
        .with_context(|| format!("invalid allowed origin: {}", config.allowed_origin))?;
    let app = build_router(service, cors);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
