//! Core data model for the strategy engine.
//!
//! Inputs (chain snapshot, market analysis) are produced by external
//! collaborators and borrowed read-only. Outputs (`StrategyResult` and the
//! records derived from it) are created once and never mutated.

mod analysis;
mod chain;
mod contract;
mod greeks;
mod leg;
mod result;

pub use analysis::{
    AccountContext, ExpectedMoves, IvAnalysis, IvEnvironment, MarketAnalysis, MarketDirection,
    PriceLevels, Timeframe,
};
pub use chain::OptionChainSnapshot;
pub use contract::{OptionContract, OptionType};
pub use greeks::Greeks;
pub use leg::{PositionSide, StrategyLeg};
pub use result::{IncomeMetrics, PayoffBound, PositionDetails, StrategyResult};

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Convert a money amount to `f64` for statistical math.
#[must_use]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Convert a statistic back to a money amount (NaN/inf become zero).
#[must_use]
pub fn from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(8)
}
