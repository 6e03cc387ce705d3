//! Probability-of-profit estimates per archetype family.
//!
//! Every estimate is in `[0, 1]`; [`market_aware`] stays within `[0.1, 0.9]`.
//! Ratio spreads and time spreads carry fixed placeholder estimates
//! ([`RATIO_SPREAD_POP`], [`TIME_SPREAD_POP`]) because their payoff depends on
//! the path and on volatility at the near expiry.

mod delta;
mod market_aware;
mod volatility;

use serde::{Deserialize, Serialize};

pub use delta::{
    LONG_PREMIUM_HAIRCUT, PremiumFlow, RATIO_SPREAD_POP, TIME_SPREAD_POP, iron_condor, prob_itm,
    single_leg, spread,
};
pub use market_aware::{MarketContext, market_aware};
pub use volatility::{expected_move_fraction, straddle};

/// Estimate used by single-leg archetypes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbabilityMode {
    /// [`market_aware`] corrections on top of delta.
    #[default]
    MarketAware,
    /// Plain [`single_leg`] delta estimate.
    DeltaOnly,
}
