//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file named by EXPORTER_CONFIG (loader.rs)
//!     → environment overrides: APP_URL, METRICS_PORT, SCRAPE_INTERVAL, ...
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the exporter runs with no configuration at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ExporterConfig, LogFormat, LoggingConfig, MetricsConfig, ProbeConfig, TargetConfig};
pub use validation::{validate_config, ValidationError};
