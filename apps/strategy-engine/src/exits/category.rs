//! Strategy categories and their default exit parameters.

use serde::{Deserialize, Serialize};

/// Exit-management family of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyCategory {
    /// Single legs and vertical spreads.
    Directional,
    /// Condors and butterflies.
    Neutral,
    /// Straddles and strangles.
    Volatility,
    /// Cash-secured puts and covered calls.
    Income,
    /// Ratio and time spreads.
    Advanced,
}

impl StrategyCategory {
    /// Every category.
    pub const ALL: [Self; 5] = [
        Self::Directional,
        Self::Neutral,
        Self::Volatility,
        Self::Income,
        Self::Advanced,
    ];

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Directional => "directional",
            Self::Neutral => "neutral",
            Self::Volatility => "volatility",
            Self::Income => "income",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for StrategyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit parameters for a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitParams {
    /// Fraction of max profit at which to take profit.
    pub profit_target_pct: f64,
    /// Fraction of max loss at which to stop out.
    pub stop_loss_pct: f64,
    /// Close when days to expiry falls to this value.
    pub time_exit_dte: u32,
    /// Absolute position delta that triggers a review.
    pub delta_threshold: f64,
    /// Vega exposure (fraction of premium per vol point) that triggers a review.
    pub vega_threshold: f64,
    /// Short-leg delta at which assignment risk is flagged.
    pub assignment_threshold: f64,
}

impl ExitParams {
    /// Built-in defaults for a category.
    #[must_use]
    pub const fn defaults_for(category: StrategyCategory) -> Self {
        match category {
            StrategyCategory::Directional => Self {
                profit_target_pct: 0.75,
                stop_loss_pct: 0.50,
                time_exit_dte: 7,
                delta_threshold: 0.75,
                vega_threshold: 0.20,
                assignment_threshold: 0.80,
            },
            StrategyCategory::Neutral => Self {
                profit_target_pct: 0.50,
                stop_loss_pct: 0.50,
                time_exit_dte: 21,
                delta_threshold: 0.30,
                vega_threshold: 0.15,
                assignment_threshold: 0.70,
            },
            StrategyCategory::Volatility => Self {
                profit_target_pct: 0.50,
                stop_loss_pct: 0.40,
                time_exit_dte: 10,
                delta_threshold: 0.25,
                vega_threshold: 0.25,
                assignment_threshold: 0.75,
            },
            StrategyCategory::Income => Self {
                profit_target_pct: 0.50,
                stop_loss_pct: 0.20,
                time_exit_dte: 7,
                delta_threshold: 0.50,
                vega_threshold: 0.15,
                assignment_threshold: 0.60,
            },
            StrategyCategory::Advanced => Self {
                profit_target_pct: 0.40,
                stop_loss_pct: 0.50,
                time_exit_dte: 14,
                delta_threshold: 0.40,
                vega_threshold: 0.20,
                assignment_threshold: 0.65,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_defaults() {
        let params = ExitParams::defaults_for(StrategyCategory::Neutral);
        assert!((params.profit_target_pct - 0.5).abs() < 1e-10);
        assert_eq!(params.time_exit_dte, 21);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&StrategyCategory::Volatility).unwrap();
        assert_eq!(json, "\"volatility\"");
        assert_eq!(StrategyCategory::Income.to_string(), "income");
    }
}
