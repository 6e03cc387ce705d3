//! Constructed strategy result.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::greeks::Greeks;
use super::leg::StrategyLeg;
use super::to_f64;
use crate::strategies::StrategyKind;

/// Maximum profit or loss: a limited amount or unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum PayoffBound {
    /// Bounded amount (currency).
    Limited(Decimal),
    /// No upper bound.
    Unbounded,
}

impl PayoffBound {
    /// Bounded amount, if any.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Limited(amount) => Some(*amount),
            Self::Unbounded => None,
        }
    }

    /// Whether the bound is unlimited.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Multiply a limited amount, leaving unbounded as is.
    #[must_use]
    pub fn scale(&self, factor: Decimal) -> Self {
        match self {
            Self::Limited(amount) => Self::Limited(*amount * factor),
            Self::Unbounded => Self::Unbounded,
        }
    }
}

impl std::fmt::Display for PayoffBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(amount) => write!(f, "{amount}"),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Lot-level sizing and amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDetails {
    /// Shares per contract.
    pub lot_size: u32,
    /// Strategy units (lots of the whole structure).
    pub units: u32,
    /// Signed net premium per unit (currency, negative = debit).
    pub premium_per_unit: Decimal,
    /// Signed net premium for the whole position (currency).
    pub total_premium: Decimal,
    /// Capital tied up (debit paid, margin at risk, or cash secured).
    pub capital_required: Decimal,
}

/// Return metrics for income strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeMetrics {
    /// Premium over strike, percent.
    pub return_on_cash_pct: f64,
    /// (premium/strike)·(365/dte)·100.
    pub annualized_return_pct: f64,
    /// Cash secured or invested.
    pub capital_required: Decimal,
}

/// A constructed multi-leg position. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Result identifier.
    pub id: Uuid,
    /// Strategy archetype.
    pub strategy: StrategyKind,
    /// Display name.
    pub strategy_name: String,
    /// Underlying symbol.
    pub symbol: String,
    /// Spot at construction.
    pub spot_price: Decimal,
    /// Days to expiry of the (near) expiry.
    pub days_to_expiry: u32,
    /// Legs, 1 to 4.
    pub legs: Vec<StrategyLeg>,
    /// Maximum profit (currency).
    pub max_profit: PayoffBound,
    /// Maximum loss (currency, positive number).
    pub max_loss: PayoffBound,
    /// Breakeven prices at expiry.
    pub breakevens: Vec<Decimal>,
    /// Signed net premium per share (negative = debit).
    pub net_premium: Decimal,
    /// Aggregate Greeks (signed, scaled by leg quantity).
    pub net_greeks: Greeks,
    /// Probability of profit, 0..=1.
    pub probability_of_profit: f64,
    /// Lot-level amounts.
    pub position_details: PositionDetails,
    /// Income metrics (cash-secured put, covered call).
    pub income: Option<IncomeMetrics>,
    /// Construction timestamp.
    pub created_at: DateTime<Utc>,
}

impl StrategyResult {
    /// Whether the position was opened for a net credit.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.net_premium > Decimal::ZERO
    }

    /// Premium paid or received for the whole position (currency).
    #[must_use]
    pub fn premium_amount(&self) -> Decimal {
        self.position_details.total_premium.abs()
    }

    /// Reward/risk ratio. Unbounded profit → infinity, unbounded loss → 0.
    #[must_use]
    pub fn reward_risk_ratio(&self) -> f64 {
        match (self.max_profit, self.max_loss) {
            (PayoffBound::Unbounded, _) => f64::INFINITY,
            (_, PayoffBound::Unbounded) => 0.0,
            (PayoffBound::Limited(profit), PayoffBound::Limited(loss)) => {
                if loss <= Decimal::ZERO {
                    f64::INFINITY
                } else {
                    to_f64(profit / loss)
                }
            }
        }
    }

    /// Lowest leg liquidity score.
    #[must_use]
    pub fn min_leg_liquidity(&self) -> f64 {
        self.legs
            .iter()
            .map(|leg| leg.liquidity_score)
            .fold(f64::INFINITY, f64::min)
            .min(1.0)
    }

    /// Net delta per strategy unit.
    #[must_use]
    pub fn net_delta_per_unit(&self) -> f64 {
        self.net_greeks.delta / f64::from(self.position_details.units.max(1))
    }
}
