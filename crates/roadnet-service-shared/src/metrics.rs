//! Prometheus metrics infrastructure for the roadnet service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder. Call once at startup before
/// any metrics are recorded.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint. Returns Prometheus exposition
/// format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Record a successfully answered path query.
pub fn record_path_computed(endpoint: &'static str, weighted: bool) {
    metrics::counter!(
        "path_queries_total",
        "endpoint" => endpoint,
        "outcome" => "ok",
        "weighted" => if weighted { "true" } else { "false" }
    )
    .increment(1);
}

/// Record a failed path query with the failure reason.
pub fn record_path_failed(endpoint: &'static str, reason: &'static str) {
    metrics::counter!(
        "path_queries_total",
        "endpoint" => endpoint,
        "outcome" => reason,
        "weighted" => "n/a"
    )
    .increment(1);
}

/// Record the hop count of a computed path.
pub fn record_path_hops(hops: usize) {
    metrics::histogram!("path_query_hops").record(hops as f64);
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "metrics are disabled"),
            Self::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            Self::InstallFailed(reason) => write!(f, "failed to install recorder: {}", reason),
        }
    }
}

impl std::error::Error for MetricsError {}
