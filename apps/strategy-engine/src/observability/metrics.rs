//! Prometheus metrics for the strategy engine.
//!
//! Covers strategy construction (latency, outcome per archetype), strike
//! selection fallbacks and pipeline runs.
//!
//! # Example
//!
//! ```ignore
//! use strategy_engine::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config)?;
//!
//! record_strategy_build("IRON_CONDOR", 0.0004);
//! ```

use std::net::SocketAddr;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::MetricsSettings;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // Latency buckets from 10us to 1s
            latency_buckets: vec![
                0.000_01, 0.000_05, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }

    /// Build from the `observability.metrics` config section.
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address does not parse.
    pub fn from_settings(settings: &MetricsSettings) -> Result<Self, MetricsError> {
        let addr = settings
            .listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| MetricsError::Configuration(format!("{}: {e}", settings.listen_addr)))?;
        Ok(Self::with_addr(addr))
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Construction Metrics
// ============================================================================

/// Record strategy build time.
///
/// # Arguments
///
/// * `strategy_type` - Strategy kind (e.g., `"IRON_CONDOR"`)
/// * `duration_seconds` - Construction time in seconds
pub fn record_strategy_build(strategy_type: &str, duration_seconds: f64) {
    histogram!(
        "strategy_build_seconds",
        "strategy_type" => strategy_type.to_string()
    )
    .record(duration_seconds);
}

/// Record the outcome of a construction.
///
/// # Arguments
///
/// * `strategy_type` - Strategy kind
/// * `status` - `"success"` or the failure's error code
pub fn record_construction(strategy_type: &str, status: &str) {
    counter!(
        "strategy_constructions_total",
        "strategy" => strategy_type.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a strike selection that fell back outside the preferred candidates.
///
/// # Arguments
///
/// * `reason` - `"illiquid"` or `"moneyness_band"`
pub fn record_strike_fallback(reason: &str) {
    counter!("strike_selection_fallbacks_total", "reason" => reason.to_string()).increment(1);
}

// ============================================================================
// Pipeline Metrics
// ============================================================================

/// Record a pipeline run.
///
/// # Arguments
///
/// * `symbols` - Symbols analysed
/// * `recommendations` - Successful constructions
/// * `failures` - Skipped constructions
/// * `duration_seconds` - Wall time of the run
pub fn record_pipeline_run(
    symbols: usize,
    recommendations: usize,
    failures: usize,
    duration_seconds: f64,
) {
    counter!("pipeline_runs_total").increment(1);
    counter!("pipeline_recommendations_total").increment(recommendations as u64);
    counter!("pipeline_failures_total").increment(failures as u64);
    gauge!("pipeline_batch_symbols").set(symbols as f64);
    histogram!("pipeline_run_seconds").record(duration_seconds);
}
