//! # hunt-telemetry
//!
//! Structured logging bootstrap for the hunt services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hunt_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("failed to init telemetry");
//!     // tracing events from the engine now flow to the subscriber
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HUNT_SERVICE_NAME` | `riddle-hunt` | Service name attached to logs |
//! | `HUNT_LOG_LEVEL` or `RUST_LOG` | `info` | Log level filter |
//! | `HUNT_JSON_LOGS` | `false` | JSON log lines (for containers) |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry bootstrap errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The log filter expression was invalid.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("subscriber init failed: {0}")]
    Init(String),
}

/// Installs the global tracing subscriber.
///
/// Layers an `EnvFilter` (from `RUST_LOG`, falling back to the configured
/// level) under a fmt layer, JSON-formatted when configured.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::info!(service = %config.service_name, "telemetry initialized");
    Ok(())
}
