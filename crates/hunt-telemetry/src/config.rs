//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for the logging bootstrap.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log lines.
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// Whether to emit JSON-formatted log lines.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "riddle-hunt".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HUNT_SERVICE_NAME`: Service name (default: riddle-hunt)
    /// - `HUNT_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `HUNT_JSON_LOGS`: JSON log lines (default: false, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("HUNT_SERVICE_NAME")
                .unwrap_or_else(|_| "riddle-hunt".to_string()),

            log_level: env::var("HUNT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("HUNT_JSON_LOGS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }
}
