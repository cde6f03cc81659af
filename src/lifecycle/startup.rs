//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the record store (awaiting its load)
//! - Start the optional metrics endpoint
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Store is fully loaded before the listener accepts traffic
//! - Subsystems initialize in order, not concurrently
//! - Metrics failures are logged, not fatal

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::routing::PatternError;
use crate::storage::Database;

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid route table: {0}")]
    Routes(#[from] PatternError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the service with `config` until a stop signal arrives.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage = %config.storage.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let db = Arc::new(Database::open(&config.storage.path).await);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.triggered();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(&config, db)?;
    server.run(listener, server_shutdown).await?;
    Ok(())
}
