//! Exit planning for constructed positions.
//!
//! Every strategy maps to one of five categories; each category carries its
//! own profit target, stop, time exit and greek thresholds. The manager turns
//! those parameters into a concrete plan for a position.

mod category;
mod conditions;
mod manager;

pub use category::{ExitParams, StrategyCategory};
pub use conditions::{
    AdjustmentKind, AdjustmentTrigger, ExitConditionSet, Greek, GreekTrigger, MonitoringFrequency,
    MonitoringPlan, ProfitTarget, ProfitTargets, StopKind, StopLoss, TimeExit, TimeTrigger,
    TrailingRule,
};
pub use manager::ExitManager;
