//! Observability module for metrics and logging.
//!
//! Provides Prometheus metrics export and `tracing` subscriber setup for the
//! strategy engine.

mod logging;
mod metrics;

pub use logging::init_tracing;
pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_construction, record_pipeline_run,
    record_strategy_build, record_strike_fallback,
};
