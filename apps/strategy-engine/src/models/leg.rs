//! Strategy leg types and operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contract::{OptionContract, OptionType};
use super::greeks::Greeks;

/// Position direction for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
}

impl PositionSide {
    /// +1 for long, -1 for short.
    #[must_use]
    pub const fn sign(&self) -> i64 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }
}

/// A single leg of a constructed strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyLeg {
    /// Option type.
    pub option_type: OptionType,
    /// Position direction.
    pub position: PositionSide,
    /// Strike price.
    pub strike: Decimal,
    /// Entry premium per share.
    pub premium: Decimal,
    /// Number of lots.
    pub quantity: u32,
    /// Days to expiry of this leg (differs across legs for time spreads).
    pub days_to_expiry: u32,
    /// Per-contract Greeks at construction time.
    pub greeks: Greeks,
    /// Implied volatility at construction (percentage points).
    pub implied_volatility: Option<f64>,
    /// Liquidity score of the contract at construction.
    pub liquidity_score: f64,
}

impl StrategyLeg {
    /// Build a leg from a chain contract.
    #[must_use]
    pub fn from_contract(
        contract: &OptionContract,
        position: PositionSide,
        quantity: u32,
        days_to_expiry: u32,
        liquidity_score: f64,
    ) -> Self {
        Self {
            option_type: contract.option_type,
            position,
            strike: contract.strike,
            premium: contract.premium(),
            quantity,
            days_to_expiry,
            greeks: contract.greeks(),
            implied_volatility: contract.implied_volatility,
            liquidity_score,
        }
    }

    /// Signed quantity (positive for long, negative for short).
    #[must_use]
    pub fn signed_quantity(&self) -> i64 {
        i64::from(self.quantity) * self.position.sign()
    }

    /// Net premium per share (positive = credit, negative = debit).
    #[must_use]
    pub fn net_premium(&self) -> Decimal {
        -self.premium * Decimal::from(self.signed_quantity())
    }

    /// Greeks scaled by signed quantity.
    #[must_use]
    pub fn total_greeks(&self) -> Greeks {
        self.greeks.scale(self.signed_quantity() as f64)
    }

    /// Intrinsic value per share at an underlying price.
    #[must_use]
    pub fn intrinsic_at(&self, price: Decimal) -> Decimal {
        match self.option_type {
            OptionType::Call => (price - self.strike).max(Decimal::ZERO),
            OptionType::Put => (self.strike - price).max(Decimal::ZERO),
        }
    }

    /// Expiry profit per share (all lots) at an underlying price.
    #[must_use]
    pub fn payoff_at(&self, price: Decimal) -> Decimal {
        self.intrinsic_at(price) * Decimal::from(self.signed_quantity()) + self.net_premium()
    }
}
