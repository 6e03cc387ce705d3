//! Capital-backed premium selling: cash-secured put and covered call.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::ConstructionContext;
use super::kind::StrategyKind;
use super::payoff::PayoffSummary;
use crate::error::StrategyError;
use crate::models::{OptionType, PayoffBound, PositionSide, StrategyResult};
use crate::selection::MoneynessBand;

/// Units affordable with the account, capped by `max_income_units`.
///
/// Without an account context the position is one unit.
fn income_units(ctx: &ConstructionContext<'_>, capital_per_share: Decimal) -> Result<u32, StrategyError> {
    let Some(account) = ctx.account else {
        return Ok(1);
    };
    let per_unit = capital_per_share * Decimal::from(ctx.chain.lot_size);
    if per_unit <= Decimal::ZERO {
        return Err(StrategyError::insufficient("capital per unit must be positive"));
    }
    let affordable = (account.capital / per_unit).floor().to_u32().unwrap_or(u32::MAX);
    if affordable == 0 {
        return Err(StrategyError::InsufficientCapital {
            required: per_unit,
            available: account.capital,
        });
    }
    Ok(affordable.min(ctx.config.max_income_units))
}

/// Sell an OTM put with cash set aside for assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashSecuredPut;

impl StrategyArchetype for CashSecuredPut {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CashSecuredPut
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        ctx.require_short_premium_iv()?;
        let m = ctx.require_expected_moves()?;
        let put = ctx.selector.select_validated(
            ctx.spot() - m * dec!(0.5),
            OptionType::Put,
            MoneynessBand::SHORT_PUT,
            ctx.chain,
        )?;
        ctx.require_premium(put)?;
        let units = income_units(ctx, put.strike)?;

        let leg = ctx.leg(put, PositionSide::Short, 1);
        let probability = ctx.single_leg_probability(&leg);
        debug!(
            strike = %put.strike,
            premium = %leg.premium,
            units,
            probability,
            "Built cash-secured put"
        );

        StrategyResultBuilder::new(ctx, self.kind(), vec![leg])
            .probability(probability)
            .units(units)
            .capital_per_share(put.strike)
            .income(put.strike)
            .build()
    }
}

/// Sell an OTM call against 100 shares held per contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoveredCall;

impl StrategyArchetype for CoveredCall {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CoveredCall
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        ctx.require_short_premium_iv()?;
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();
        let call = ctx.selector.select_validated(
            spot + m * dec!(0.5),
            OptionType::Call,
            MoneynessBand::SHORT_CALL,
            ctx.chain,
        )?;
        let premium = ctx.require_premium(call)?;
        let units = income_units(ctx, spot)?;

        // Stock bought at spot, call sold against it.
        let payoff = PayoffSummary {
            max_profit: PayoffBound::Limited((call.strike - spot + premium).max(Decimal::ZERO)),
            max_loss: PayoffBound::Limited((spot - premium).max(Decimal::ZERO)),
            breakevens: vec![spot - premium],
        };
        let leg = ctx.leg(call, PositionSide::Short, 1);
        let probability = ctx.single_leg_probability(&leg);
        debug!(
            strike = %call.strike,
            %premium,
            units,
            probability,
            "Built covered call"
        );

        StrategyResultBuilder::new(ctx, self.kind(), vec![leg])
            .payoff(payoff)
            .probability(probability)
            .units(units)
            .capital_per_share(spot)
            .covered_by_stock()
            .income(call.strike)
            .build()
    }
}
