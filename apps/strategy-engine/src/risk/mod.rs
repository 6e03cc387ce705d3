//! Risk scoring and position sizing for constructed strategies.
//!
//! # Features
//!
//! - Additive risk score with LOW / MODERATE / HIGH / EXTREME bands
//! - Fixed-fractional sizing bounded by a hard capital limit and contract cap
//! - DTE and IV-rank size reductions, reported alongside the base size

mod adjustments;
mod assessment;
mod sizing;

use rust_decimal::Decimal;

use crate::config::RiskConfig;
use crate::models::{AccountContext, MarketAnalysis, PayoffBound, StrategyResult};

pub use adjustments::{
    SizeAdjustment, apply_adjustments, dte_adjustment, iv_adjustment, sizing_adjustments,
};
pub use assessment::{RiskAction, RiskAssessment, RiskFactor, RiskRating, assess};
pub use sizing::{PositionSize, position_size};

/// Applies the risk configuration to constructed strategies.
#[derive(Debug, Clone)]
pub struct RiskManager {
    config: RiskConfig,
    liquidity_threshold: f64,
}

impl Default for RiskManager {
    fn default() -> Self {
        Self::new(RiskConfig::default(), 0.4)
    }
}

impl RiskManager {
    /// Create a manager; `liquidity_threshold` is the minimum acceptable leg
    /// liquidity score.
    #[must_use]
    pub const fn new(config: RiskConfig, liquidity_threshold: f64) -> Self {
        Self {
            config,
            liquidity_threshold,
        }
    }

    /// Risk configuration.
    #[must_use]
    pub const fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Score a position.
    #[must_use]
    pub fn assess_risk(&self, result: &StrategyResult) -> RiskAssessment {
        assess(result, self.liquidity_threshold)
    }

    /// Contracts for a per-contract max loss, using the configured hard limit
    /// and contract cap.
    #[must_use]
    pub fn position_size(
        &self,
        max_loss: PayoffBound,
        account_size: Decimal,
        risk_per_trade: f64,
    ) -> PositionSize {
        position_size(
            max_loss,
            account_size,
            risk_per_trade,
            self.config.hard_position_limit,
            self.config.max_contracts,
        )
    }

    /// Size a constructed position for an account.
    ///
    /// Without an account the configured default account size and risk
    /// fraction apply. The max loss of one unit is the result's max loss
    /// divided by its units.
    #[must_use]
    pub fn size_position(
        &self,
        result: &StrategyResult,
        analysis: &MarketAnalysis,
        account: Option<&AccountContext>,
    ) -> PositionSize {
        let (capital, risk) = account.map_or(
            (self.config.default_account_size, self.config.risk_per_trade),
            |a| (a.capital, a.risk_per_trade),
        );
        let units = Decimal::from(result.position_details.units.max(1));
        let per_unit = match result.max_loss {
            PayoffBound::Limited(amount) => PayoffBound::Limited(amount / units),
            PayoffBound::Unbounded => PayoffBound::Unbounded,
        };

        let size = self.position_size(per_unit, capital, risk);
        if self.config.apply_adjustments {
            size.with_adjustments(sizing_adjustments(
                result.days_to_expiry,
                analysis.iv_percentile() / 100.0,
            ))
        } else {
            size
        }
    }
}
