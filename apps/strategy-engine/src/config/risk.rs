//! Risk and sizing configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Risk and sizing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Account size used when the caller supplies no account context.
    #[serde(default = "default_account_size")]
    pub default_account_size: Decimal,
    /// Fraction of capital risked per trade.
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: f64,
    /// Hard cap on capital at risk in a single position.
    #[serde(default = "default_hard_position_limit")]
    pub hard_position_limit: Decimal,
    /// Maximum contracts per position.
    #[serde(default = "default_max_contracts")]
    pub max_contracts: u32,
    /// Apply DTE / IV-percentile size reductions.
    #[serde(default = "default_apply_adjustments")]
    pub apply_adjustments: bool,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            default_account_size: default_account_size(),
            risk_per_trade: default_risk_per_trade(),
            hard_position_limit: default_hard_position_limit(),
            max_contracts: default_max_contracts(),
            apply_adjustments: default_apply_adjustments(),
        }
    }
}

fn default_account_size() -> Decimal {
    dec!(100000)
}

const fn default_risk_per_trade() -> f64 {
    0.02
}

fn default_hard_position_limit() -> Decimal {
    dec!(50000)
}

const fn default_max_contracts() -> u32 {
    10
}

const fn default_apply_adjustments() -> bool {
    true
}
