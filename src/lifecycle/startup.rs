//! Startup orchestration.
//!
//! # Order
//! 1. Logging (config is already validated by the caller)
//! 2. Metrics exporter, if enabled
//! 3. Gate + forwarding delegate
//! 4. Listener bind, then serve until a termination signal
//!
//! Any error before serving is fatal.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::error::StartupError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Bring the proxy up and serve until shutdown.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    logging::init(&config.observability)?;
    tracing::info!(
        listener = %config.listener.bind_address(),
        backend = %config.backend.url,
        auth = ?config.auth,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let address = config.listener.bind_address();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let result = server.run(listener, server_shutdown).await;
    tracing::info!("Reverse proxy server exiting");
    result.map_err(StartupError::Serve)
}
