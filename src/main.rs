//! Parking application metrics exporter.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │               PARKING EXPORTER                 │
//!                 │                                                │
//!   Parking app   │  ┌─────────┐    ┌───────────┐                  │
//!   (HTML index) ◀┼──│ health  │───▶│ occupancy │                  │
//!                 │  │ prober  │    │  parser   │                  │
//!                 │  └────┬────┘    └─────┬─────┘                  │
//!                 │       │               │                        │
//!                 │       ▼               ▼                        │
//!                 │  ┌─────────────────────────┐   ┌───────────┐   │
//!                 │  │  observability::metrics │◀──│   http    │◀──┼── Prometheus
//!                 │  │       MetricStore       │   │  server   │   │   scrape
//!                 │  └─────────────────────────┘   └───────────┘   │
//!                 │                                                │
//!                 │  config · lifecycle (startup/shutdown/signals) │
//!                 └───────────────────────────────────────────────┘
//! ```

use parking_exporter::config::ExporterConfig;
use parking_exporter::lifecycle::startup;
use parking_exporter::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ExporterConfig::from_env()?;
    logging::init(&config.logging);

    startup::run(config).await?;
    Ok(())
}
