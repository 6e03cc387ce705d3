//! Inputs shared by every construction.

use rust_decimal::Decimal;

use crate::config::StrategiesConfig;
use crate::error::StrategyError;
use crate::models::{
    AccountContext, MarketAnalysis, OptionChainSnapshot, OptionContract, PositionSide,
    StrategyLeg, to_f64,
};
use crate::probability::{self, MarketContext, ProbabilityMode};
use crate::selection::StrikeSelector;

/// Borrowed inputs for one construction.
#[derive(Debug, Clone, Copy)]
pub struct ConstructionContext<'a> {
    /// Near-expiry chain.
    pub chain: &'a OptionChainSnapshot,
    /// Upstream market view.
    pub analysis: &'a MarketAnalysis,
    /// Later-expiry chain for time spreads.
    pub far_chain: Option<&'a OptionChainSnapshot>,
    /// Capital available for income sizing.
    pub account: Option<&'a AccountContext>,
    /// Strike selector.
    pub selector: &'a StrikeSelector,
    /// Construction settings.
    pub config: &'a StrategiesConfig,
}

impl<'a> ConstructionContext<'a> {
    /// Context without a far chain or account.
    #[must_use]
    pub const fn new(
        chain: &'a OptionChainSnapshot,
        analysis: &'a MarketAnalysis,
        selector: &'a StrikeSelector,
        config: &'a StrategiesConfig,
    ) -> Self {
        Self {
            chain,
            analysis,
            far_chain: None,
            account: None,
            selector,
            config,
        }
    }

    /// Attach a later-expiry chain.
    #[must_use]
    pub const fn with_far_chain(mut self, far_chain: Option<&'a OptionChainSnapshot>) -> Self {
        self.far_chain = far_chain;
        self
    }

    /// Attach account capital.
    #[must_use]
    pub const fn with_account(mut self, account: Option<&'a AccountContext>) -> Self {
        self.account = account;
        self
    }

    /// Spot price of the underlying.
    #[must_use]
    pub const fn spot(&self) -> Decimal {
        self.chain.spot_price
    }

    /// Days to the near expiry.
    #[must_use]
    pub fn dte(&self) -> u32 {
        self.chain.days_to_expiry()
    }

    /// Expected-move unit for target prices.
    #[must_use]
    pub fn move_unit(&self) -> Decimal {
        self.selector.move_unit(self.analysis)
    }

    /// ATM IV in percentage points; the chain's ATM IV when the analysis has none.
    #[must_use]
    pub fn atm_iv(&self) -> f64 {
        let from_analysis = self.analysis.atm_iv();
        if from_analysis.is_finite() && from_analysis > 0.0 {
            from_analysis
        } else {
            self.chain.atm_iv().unwrap_or(0.0)
        }
    }

    /// Build a near-expiry leg from a contract.
    #[must_use]
    pub fn leg(&self, contract: &OptionContract, position: PositionSide, quantity: u32) -> StrategyLeg {
        StrategyLeg::from_contract(
            contract,
            position,
            quantity,
            self.dte(),
            self.selector.liquidity(contract),
        )
    }

    /// Fail unless expected moves are available.
    pub fn require_expected_moves(&self) -> Result<Decimal, StrategyError> {
        let unit = self.move_unit();
        if unit > Decimal::ZERO {
            Ok(unit)
        } else {
            Err(StrategyError::insufficient("expected moves unavailable"))
        }
    }

    /// Fail when IV is too low to sell premium.
    pub fn require_short_premium_iv(&self) -> Result<(), StrategyError> {
        let atm_iv = self.atm_iv();
        if atm_iv < self.config.min_short_premium_iv {
            return Err(StrategyError::IvTooLow {
                atm_iv,
                minimum: self.config.min_short_premium_iv,
            });
        }
        Ok(())
    }

    /// Fail when IV is too high to buy volatility.
    pub fn require_long_volatility_iv(&self) -> Result<(), StrategyError> {
        let atm_iv = self.atm_iv();
        if atm_iv > self.config.max_long_volatility_iv {
            return Err(StrategyError::IvTooHigh {
                atm_iv,
                maximum: self.config.max_long_volatility_iv,
            });
        }
        Ok(())
    }

    /// Fail when a contract has no usable premium.
    pub fn require_premium(&self, contract: &OptionContract) -> Result<Decimal, StrategyError> {
        let premium = contract.premium();
        if premium > Decimal::ZERO {
            Ok(premium)
        } else {
            Err(StrategyError::insufficient(format!(
                "no premium quoted for {} {}",
                contract.option_type, contract.strike
            )))
        }
    }

    /// Probability of profit for a single leg held to expiry.
    #[must_use]
    pub fn single_leg_probability(&self, leg: &StrategyLeg) -> f64 {
        match self.config.probability_mode {
            ProbabilityMode::DeltaOnly => probability::single_leg(probability_delta(leg), leg.position),
            ProbabilityMode::MarketAware => {
                let premium_pct_of_strike = if leg.strike > Decimal::ZERO {
                    to_f64(leg.premium / leg.strike) * 100.0
                } else {
                    0.0
                };
                let context = MarketContext {
                    dte: leg.days_to_expiry,
                    premium_pct_of_strike,
                    iv_percentile: self.analysis.iv_percentile(),
                };
                probability::market_aware(probability_delta(leg), leg.position, &context)
            }
        }
    }
}

/// Leg delta for probability estimates; a missing (zero) delta is neutral.
pub(crate) fn probability_delta(leg: &StrategyLeg) -> f64 {
    if leg.greeks.delta == 0.0 {
        0.5
    } else {
        leg.greeks.delta
    }
}
