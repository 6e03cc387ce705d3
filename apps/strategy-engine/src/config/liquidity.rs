//! Liquidity scoring configuration.

use serde::{Deserialize, Serialize};

/// Normalizers for the liquidity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityConfig {
    /// Open interest that earns the full OI component.
    #[serde(default = "default_open_interest_norm")]
    pub open_interest_norm: f64,
    /// Volume that earns the full volume component.
    #[serde(default = "default_volume_norm")]
    pub volume_norm: f64,
    /// Relative spread at which the spread component reaches zero.
    #[serde(default = "default_max_spread_pct")]
    pub max_spread_pct: f64,
    /// Minimum score a leg needs to pass the risk liquidity check.
    #[serde(default = "default_min_acceptable_score")]
    pub min_acceptable_score: f64,
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            open_interest_norm: default_open_interest_norm(),
            volume_norm: default_volume_norm(),
            max_spread_pct: default_max_spread_pct(),
            min_acceptable_score: default_min_acceptable_score(),
        }
    }
}

const fn default_open_interest_norm() -> f64 {
    500.0
}

const fn default_volume_norm() -> f64 {
    200.0
}

const fn default_max_spread_pct() -> f64 {
    0.10
}

const fn default_min_acceptable_score() -> f64 {
    0.4
}
