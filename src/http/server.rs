//! Metrics exposition server.
//!
//! # Responsibilities
//! - Create Axum Router with the scrape and liveness handlers
//! - Wire up middleware (tracing)
//! - Serve until the shutdown coordinator fires
//!
//! The server only reads the `MetricStore`; it never waits on the prober.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::observability::MetricStore;

/// Content type of the Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// HTTP server exposing `/metrics` for scrapers.
pub struct MetricsServer {
    router: Router,
}

impl MetricsServer {
    pub fn new(store: Arc<MetricStore>) -> Self {
        Self {
            router: Self::build_router(store),
        }
    }

    fn build_router(store: Arc<MetricStore>) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(store)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Metrics server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Metrics server stopped");
        Ok(())
    }
}

async fn metrics_handler(State(store): State<Arc<MetricStore>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        store.render(),
    )
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
