//! Exit plan types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::{ExitParams, StrategyCategory};
use crate::strategies::StrategyKind;

/// A profit level at which to close all or part of the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitTarget {
    /// Fraction of the profit basis.
    pub target_pct: f64,
    /// Profit amount (currency).
    pub target_amount: Decimal,
    /// Share of the position to close.
    pub close_fraction: f64,
    /// Human-readable rule.
    pub description: String,
}

/// Lock in gains once a profit level is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingRule {
    /// Profit amount that arms the trail.
    pub activation_amount: Decimal,
    /// Fraction of peak profit that may be given back.
    pub giveback_pct: f64,
}

/// Profit-taking plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitTargets {
    /// Profit the targets are measured against.
    pub profit_basis: Decimal,
    /// Whether `profit_basis` is the 1-SD expected-move profit rather than
    /// the theoretical maximum.
    pub realistic: bool,
    /// Main target.
    pub primary: ProfitTarget,
    /// Scale-out levels at 25/50/75%.
    pub scaling: Vec<ProfitTarget>,
    /// Trailing rule.
    pub trailing: TrailingRule,
}

/// How a stop is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopKind {
    /// Share of the bounded max loss.
    MaxLossPercent,
    /// Multiple of the credit received.
    CreditMultiple,
    /// Multiple of the debit paid.
    DebitMultiple,
    /// Underlying crossing a price.
    UnderlyingPrice,
}

/// A loss level at which to close the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopLoss {
    /// Measurement.
    pub kind: StopKind,
    /// Loss amount (currency), or underlying price for `UnderlyingPrice`.
    pub level: Decimal,
    /// Human-readable rule.
    pub description: String,
}

/// What starts a time-based exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeTrigger {
    /// Days to expiry falls to this value.
    DaysToExpiry {
        /// Remaining days.
        days: u32,
    },
    /// Share of the time to expiry has elapsed.
    Elapsed {
        /// Elapsed share.
        pct: f64,
        /// Calendar day from entry.
        day: u32,
    },
}

/// Time-based exit or review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeExit {
    /// Trigger.
    pub trigger: TimeTrigger,
    /// What to do.
    pub action: String,
}

/// Option sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Greek {
    /// Price sensitivity.
    Delta,
    /// Delta sensitivity.
    Gamma,
    /// Time decay.
    Theta,
    /// Volatility sensitivity.
    Vega,
}

/// Greek level that calls for action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreekTrigger {
    /// Which greek.
    pub greek: Greek,
    /// Absolute level (per unit).
    pub threshold: f64,
    /// Value at entry (per unit).
    pub at_entry: f64,
    /// What to do.
    pub action: String,
}

/// Adjustment family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Reduce risk on the tested side.
    Defensive,
    /// Press a winning position.
    Offensive,
    /// Move strikes or expiry.
    Rolling,
    /// Change the structure.
    Morphing,
}

/// Adjustment playbook entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentTrigger {
    /// Family.
    pub kind: AdjustmentKind,
    /// When it applies.
    pub condition: String,
    /// What to do.
    pub action: String,
}

/// How often to check the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringFrequency {
    /// Several times per session.
    Intraday,
    /// Once per session.
    Daily,
    /// Once per week.
    Weekly,
}

/// Monitoring cadence and alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPlan {
    /// Cadence.
    pub frequency: MonitoringFrequency,
    /// Alert conditions.
    pub alerts: Vec<String>,
}

/// Complete exit plan for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitConditionSet {
    /// Strategy the plan is for.
    pub strategy: StrategyKind,
    /// Exit family.
    pub category: StrategyCategory,
    /// Parameters the plan was built from.
    pub params: ExitParams,
    /// Profit taking.
    pub profit_targets: ProfitTargets,
    /// Stops.
    pub stop_losses: Vec<StopLoss>,
    /// Time exits and checkpoints.
    pub time_exits: Vec<TimeExit>,
    /// Greek triggers.
    pub greek_triggers: Vec<GreekTrigger>,
    /// Adjustment playbook.
    pub adjustment_triggers: Vec<AdjustmentTrigger>,
    /// Monitoring plan.
    pub monitoring: MonitoringPlan,
}
