//! Theta decay projection and decay-adjusted targets.
//!
//! - [`decay_curve`]: day-by-day decay of one option, accelerating toward expiry
//! - [`strategy_theta`]: legs netted into a POSITIVE/NEGATIVE classification
//! - [`adjusted_targets`]: profit targets shifted by the decay profile

mod curve;
mod strategy;
mod targets;

pub use curve::{DecayPoint, ThetaDecayProfile, decay_curve};
pub use strategy::{StrategyThetaAnalysis, ThetaClassification, strategy_theta};
pub use targets::{DecayAdjustedTargets, TargetCheckpoint, adjusted_targets};
