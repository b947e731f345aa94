mod config;
mod core;
mod error;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::config::ProxyConfig;
use crate::core::proxy::{FaultProxy, Proxy};
use crate::error::ProxyError;

#[tokio::main]
async fn main() -> Result<(), ProxyError> {
    // Load configuration
    let config = ProxyConfig::from_env();

    // Initialize tracing; RUST_LOG overrides the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let proxy = Arc::new(FaultProxy::new(config.clone())?);

    tracing::info!(
        "Starting fault proxy on {}:{}",
        config.server.host,
        config.server.port
    );

    // Start the server
    proxy.start().await?;
    tracing::info!("Fault proxy started successfully");

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping fault proxy");

    // Stop the server
    proxy.stop().await?;
    tracing::info!("Fault proxy stopped successfully");

    Ok(())
}
