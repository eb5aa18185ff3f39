//! Startup orchestration.
//!
//! # Responsibilities
//! - Warn about a missing credential
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ObservabilityConfig, ProxyConfig};
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::Shutdown;
use crate::observability::metrics::init_metrics;

/// Error type for startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Start the proxy and serve until `shutdown` fires.
pub async fn start(config: ProxyConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.upstream.api_key.is_empty() && config.upstream.send_api_key {
        tracing::warn!("NASA_API_KEY is not set; upstream calls will be sent with an empty api_key");
    }

    tracing::info!(
        listen = %config.listener.socket_addr(),
        send_api_key = config.upstream.send_api_key,
        timeout_secs = config.upstream.timeout_secs,
        empty_results = ?config.search.empty_results,
        cors = config.cors.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Some(addr) = metrics_address(&config.observability) {
            init_metrics(addr)?;
        }
    }

    let server = HttpServer::new(config)?;

    let addr = server.config().listener.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    tracing::info!(address = %listener.local_addr().unwrap_or(addr), "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

/// Parsed metrics listen address; logs and yields `None` when unparseable.
fn metrics_address(observability: &ObservabilityConfig) -> Option<SocketAddr> {
    match observability.metrics_address.parse() {
        Ok(addr) => Some(addr),
        Err(e) => {
            tracing::error!(
                metrics_address = %observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            );
            None
        }
    }
}
