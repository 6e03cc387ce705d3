//! Strike selection from expected-move statistics.
//!
//! Target prices are derived from `m = one_sd_move * timeframe_multiplier`
//! and archetype-specific offsets; the selector then picks the listed strike
//! that best balances proximity to the target (0.7) and liquidity (0.3),
//! subject to a moneyness band per leg role.

mod bands;
mod selector;
mod targets;

pub use bands::MoneynessBand;
pub use selector::{
    SpreadLegs, StrikeDirection, StrikeSelector, adjacent_strike, atm_strike, nearest_contract,
};
pub(crate) use selector::adjacent_or_fail;
pub use targets::{SpreadTargets, single_leg_target, spread_targets};
