//! Time spreads: sell a near-dated call, buy a later-dated call.
//!
//! The far leg comes from the far-expiry chain when one is supplied. Without
//! it, the far call is approximated from the near contract at the same strike
//! by square-root-of-time scaling over `calendar_gap_days`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::ConstructionContext;
use super::kind::StrategyKind;
use super::payoff::PayoffSummary;
use crate::error::StrategyError;
use crate::models::{
    Greeks, OptionType, PayoffBound, PositionSide, StrategyLeg, StrategyResult, from_f64,
};
use crate::probability::TIME_SPREAD_POP;
use crate::selection::{MoneynessBand, StrikeDirection, adjacent_or_fail, nearest_contract};

/// Long far-dated call at `strike`.
fn far_leg(ctx: &ConstructionContext<'_>, strike: Decimal) -> Result<StrategyLeg, StrategyError> {
    let near_dte = ctx.dte();
    if near_dte == 0 {
        return Err(StrategyError::insufficient("near expiry has no time left"));
    }

    if let Some(far_chain) = ctx.far_chain {
        let far_dte = far_chain.days_to_expiry();
        if far_dte <= near_dte {
            return Err(StrategyError::insufficient(format!(
                "far expiry ({far_dte}d) must be later than near expiry ({near_dte}d)"
            )));
        }
        let contract = far_chain.find(strike, OptionType::Call).ok_or_else(|| {
            StrategyError::insufficient(format!("no far-expiry CALL at {strike}"))
        })?;
        ctx.require_premium(contract)?;
        return Ok(StrategyLeg::from_contract(
            contract,
            PositionSide::Long,
            1,
            far_dte,
            ctx.selector.liquidity(contract),
        ));
    }

    let near = ctx
        .chain
        .find(strike, OptionType::Call)
        .ok_or_else(|| StrategyError::insufficient(format!("no CALL at {strike}")))?;
    let premium = ctx.require_premium(near)?;
    let far_dte = near_dte + ctx.config.calendar_gap_days;
    let growth = (f64::from(far_dte) / f64::from(near_dte)).sqrt();
    let greeks = near.greeks();

    Ok(StrategyLeg {
        option_type: OptionType::Call,
        position: PositionSide::Long,
        strike,
        premium: (premium * from_f64(growth)).round_dp(2),
        quantity: 1,
        days_to_expiry: far_dte,
        greeks: Greeks::new(
            greeks.delta,
            greeks.gamma / growth,
            greeks.theta / growth,
            greeks.vega * growth,
        ),
        implied_volatility: near.implied_volatility,
        liquidity_score: ctx.selector.liquidity(near),
    })
}

/// Time value the far call keeps when the near call expires.
fn far_residual(far: &StrategyLeg, near_dte: u32) -> Decimal {
    let far_dte = f64::from(far.days_to_expiry.max(1));
    let remaining = f64::from(far.days_to_expiry.saturating_sub(near_dte)) / far_dte;
    far.premium * from_f64(remaining.sqrt())
}

/// Breakevens around the shared strike; a single point when no profit is left.
fn calendar_breakevens(strike: Decimal, max_profit: Decimal) -> Vec<Decimal> {
    if max_profit > Decimal::ZERO {
        vec![strike - max_profit, strike + max_profit]
    } else {
        vec![strike]
    }
}

fn require_debit(kind: StrategyKind, legs: &[StrategyLeg]) -> Result<Decimal, StrategyError> {
    let net: Decimal = legs.iter().map(StrategyLeg::net_premium).sum();
    if net < Decimal::ZERO {
        Ok(-net)
    } else {
        Err(StrategyError::no_premium(format!(
            "{kind} requires a net debit, got {net}"
        )))
    }
}

/// Same strike, two expiries.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarSpread;

impl StrategyArchetype for CalendarSpread {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CalendarSpread
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        let near = nearest_contract(ctx.chain, OptionType::Call, ctx.spot()).ok_or(
            StrategyError::NoStrikesAvailable {
                option_type: OptionType::Call,
            },
        )?;
        ctx.require_premium(near)?;
        let far = far_leg(ctx, near.strike)?;
        let short = ctx.leg(near, PositionSide::Short, 1);
        let residual = far_residual(&far, ctx.dte());

        let legs = vec![short, far];
        let debit = require_debit(self.kind(), &legs)?;
        let max_profit = (residual - debit).max(Decimal::ZERO);
        let strike = near.strike;
        let payoff = PayoffSummary {
            max_profit: PayoffBound::Limited(max_profit),
            max_loss: PayoffBound::Limited(debit),
            breakevens: calendar_breakevens(strike, max_profit),
        };
        debug!(
            %strike,
            %debit,
            %residual,
            far_dte = legs[1].days_to_expiry,
            "Built calendar spread"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .payoff(payoff)
            .probability(TIME_SPREAD_POP)
            .build()
    }
}

/// Short near call above spot, long far ATM call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagonalSpread;

impl StrategyArchetype for DiagonalSpread {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DiagonalSpread
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();
        let long_strike = nearest_contract(ctx.far_chain.unwrap_or(ctx.chain), OptionType::Call, spot)
            .ok_or(StrategyError::NoStrikesAvailable {
                option_type: OptionType::Call,
            })?
            .strike;
        let mut near = ctx.selector.select_validated(
            spot + m * dec!(0.5),
            OptionType::Call,
            MoneynessBand::SHORT_CALL,
            ctx.chain,
        )?;
        if near.strike <= long_strike {
            near = adjacent_or_fail(ctx.chain, OptionType::Call, long_strike, StrikeDirection::Above)?;
        }
        ctx.require_premium(near)?;
        let far = far_leg(ctx, long_strike)?;
        let residual = far_residual(&far, ctx.dte());
        let short = ctx.leg(near, PositionSide::Short, 1);

        let width = short.strike - far.strike;
        let legs = vec![short, far];
        let debit = require_debit(self.kind(), &legs)?;
        let payoff = PayoffSummary {
            max_profit: PayoffBound::Limited((width + residual - debit).max(Decimal::ZERO)),
            max_loss: PayoffBound::Limited(debit),
            breakevens: vec![long_strike + debit],
        };
        debug!(
            short = %legs[0].strike,
            long = %long_strike,
            %debit,
            %residual,
            "Built diagonal spread"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .payoff(payoff)
            .probability(TIME_SPREAD_POP)
            .build()
    }
}
