//! Strategy construction configuration.

use serde::{Deserialize, Serialize};

use crate::probability::ProbabilityMode;
use crate::strategies::StrategyKind;

/// Strategy construction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategiesConfig {
    /// Archetypes the pipeline may construct.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<StrategyKind>,
    /// Minimum ATM IV (points) to sell premium.
    #[serde(default = "default_min_short_premium_iv")]
    pub min_short_premium_iv: f64,
    /// Maximum ATM IV (points) to buy straddles/strangles.
    #[serde(default = "default_max_long_volatility_iv")]
    pub max_long_volatility_iv: f64,
    /// Probability estimate used by single-leg archetypes.
    #[serde(default)]
    pub probability_mode: ProbabilityMode,
    /// Assumed gap between near and far expiry for time spreads without a
    /// far-expiry chain.
    #[serde(default = "default_calendar_gap_days")]
    pub calendar_gap_days: u32,
    /// Maximum units for capital-sized income strategies.
    #[serde(default = "default_max_income_units")]
    pub max_income_units: u32,
}

impl Default for StrategiesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_short_premium_iv: default_min_short_premium_iv(),
            max_long_volatility_iv: default_max_long_volatility_iv(),
            probability_mode: ProbabilityMode::default(),
            calendar_gap_days: default_calendar_gap_days(),
            max_income_units: default_max_income_units(),
        }
    }
}

fn default_enabled() -> Vec<StrategyKind> {
    StrategyKind::ALL.to_vec()
}

const fn default_min_short_premium_iv() -> f64 {
    15.0
}

const fn default_max_long_volatility_iv() -> f64 {
    60.0
}

const fn default_calendar_gap_days() -> u32 {
    30
}

const fn default_max_income_units() -> u32 {
    10
}
