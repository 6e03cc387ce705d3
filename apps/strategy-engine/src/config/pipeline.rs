//! Batch pipeline configuration.

use serde::{Deserialize, Serialize};

/// Batch pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Worker threads for batch runs (0 = rayon default).
    #[serde(default)]
    pub max_threads: usize,
    /// Batches with fewer jobs run sequentially.
    #[serde(default = "default_min_parallel_jobs")]
    pub min_parallel_jobs: usize,
    /// Keep at most this many recommendations per symbol (0 = all).
    #[serde(default)]
    pub max_recommendations: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            min_parallel_jobs: default_min_parallel_jobs(),
            max_recommendations: 0,
        }
    }
}

const fn default_min_parallel_jobs() -> usize {
    4
}
