//! Strategy archetypes and their construction.
//!
//! Each archetype implements [`StrategyArchetype`] and is registered in the
//! [`StrategyCatalog`] under its [`StrategyKind`]. Construction reads a chain
//! snapshot and a market analysis through a [`ConstructionContext`] and
//! returns either a [`StrategyResult`](crate::models::StrategyResult) or a
//! [`StrategyError`](crate::error::StrategyError) explaining the skip.

mod archetype;
mod builder;
mod calendar;
mod catalog;
mod condor;
mod context;
mod directional;
mod income;
mod kind;
mod payoff;
mod ratio;
mod vertical;
mod volatility;

#[cfg(test)]
pub(crate) mod test_support;

pub use archetype::StrategyArchetype;
pub use builder::StrategyResultBuilder;
pub use calendar::{CalendarSpread, DiagonalSpread};
pub use catalog::StrategyCatalog;
pub use condor::{Butterfly, IronButterfly, IronCondor};
pub use context::ConstructionContext;
pub use directional::SingleLeg;
pub use income::{CashSecuredPut, CoveredCall};
pub use kind::{IvPreference, MarketBias, StrategyKind, StrategyProfile};
pub use payoff::{PayoffSummary, expiry_payoff, payoff_at};
pub use ratio::RatioSpread;
pub use vertical::VerticalSpread;
pub use volatility::{Straddle, Strangle};
