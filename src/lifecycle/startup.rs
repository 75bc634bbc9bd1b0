//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared metric store
//! - Bind the metrics listener and start the exposition server
//! - Start the background prober
//! - Stop both on a signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound before the prober starts, so a taken port aborts
//!   the process before any probe is sent

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinHandle};

use crate::config::ExporterConfig;
use crate::health::{Prober, ProberError};
use crate::http::MetricsServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::MetricStore;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build metric store: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to create prober: {0}")]
    Prober(#[from] ProberError),

    #[error("failed to bind metrics listener on {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("metrics server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("task failed: {0}")]
    Join(#[from] JoinError),
}

/// A started exporter: server and prober running in the background.
pub struct RunningExporter {
    shutdown: Shutdown,
    local_addr: SocketAddr,
    store: Arc<MetricStore>,
    prober: JoinHandle<()>,
    server: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningExporter {
    /// Address the metrics server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn store(&self) -> &Arc<MetricStore> {
        &self.store
    }

    /// Trigger shutdown and wait for both tasks to finish.
    pub async fn stop(self) -> Result<(), StartupError> {
        self.shutdown.trigger();
        self.prober.await?;
        self.server.await??;
        Ok(())
    }
}

/// Bind the metrics listener, then spawn the server and the prober.
pub async fn start(config: ExporterConfig) -> Result<RunningExporter, StartupError> {
    let address = config.metrics.bind_address();
    tracing::info!(
        target_url = %config.target.base_url,
        metrics_port = config.metrics.port,
        interval_secs = config.probe.interval_secs,
        timeout_secs = config.probe.timeout_secs,
        "parking-exporter starting"
    );

    let store = Arc::new(MetricStore::new()?);
    let prober = Prober::new(&config.target, config.probe.clone(), store.clone())?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr()?;

    let shutdown = Shutdown::new();
    let server = MetricsServer::new(store.clone());
    let server = tokio::spawn(server.run(listener, shutdown.subscribe()));
    let prober = tokio::spawn(prober.run(shutdown.subscribe()));

    tracing::info!(address = %local_addr, "Exporting metrics");

    Ok(RunningExporter {
        shutdown,
        local_addr,
        store,
        prober,
        server,
    })
}

/// Run until SIGINT/SIGTERM, then shut down gracefully.
pub async fn run(config: ExporterConfig) -> Result<(), StartupError> {
    let exporter = start(config).await?;

    match signals::wait_for_signal().await {
        Ok(signal) => tracing::info!(signal, "Shutdown signal received"),
        Err(e) => {
            // Without a handler there is no graceful path; run until killed.
            tracing::error!(error = %e, "Failed to install signal handlers");
            std::future::pending::<()>().await;
        }
    }

    exporter.stop().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
