//! Range-bound structures: iron condor, iron butterfly and call butterfly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::{ConstructionContext, probability_delta};
use super::kind::StrategyKind;
use crate::error::StrategyError;
use crate::models::{OptionContract, OptionType, PositionSide, StrategyLeg, StrategyResult};
use crate::probability;
use crate::selection::{
    MoneynessBand, StrikeDirection, adjacent_or_fail, atm_strike, nearest_contract,
};

/// Fail unless the legs open for a net credit.
fn require_credit(kind: StrategyKind, legs: &[StrategyLeg]) -> Result<Decimal, StrategyError> {
    let net: Decimal = legs.iter().map(StrategyLeg::net_premium).sum();
    if net > Decimal::ZERO {
        Ok(net)
    } else {
        Err(StrategyError::no_premium(format!(
            "{kind} requires a net credit, got {net}"
        )))
    }
}

/// Fail unless the legs open for a net debit.
fn require_debit(kind: StrategyKind, legs: &[StrategyLeg]) -> Result<Decimal, StrategyError> {
    let net: Decimal = legs.iter().map(StrategyLeg::net_premium).sum();
    if net < Decimal::ZERO {
        Ok(net)
    } else {
        Err(StrategyError::no_premium(format!(
            "{kind} requires a net debit, got {net}"
        )))
    }
}

/// Select a wing and push it outside `inner` when it lands on or inside it.
fn wing<'a>(
    ctx: &ConstructionContext<'a>,
    target: Decimal,
    option_type: OptionType,
    inner: Decimal,
    direction: StrikeDirection,
) -> Result<&'a OptionContract, StrategyError> {
    let selected =
        ctx.selector
            .select_validated(target, option_type, MoneynessBand::SPREAD, ctx.chain)?;
    let inside = match direction {
        StrikeDirection::Above => selected.strike <= inner,
        StrikeDirection::Below => selected.strike >= inner,
    };
    if inside {
        adjacent_or_fail(ctx.chain, option_type, inner, direction)
    } else {
        Ok(selected)
    }
}

/// Short put and call around spot, long wings further out.
#[derive(Debug, Clone, Copy, Default)]
pub struct IronCondor;

impl StrategyArchetype for IronCondor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::IronCondor
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();

        // Shorts must straddle spot.
        let put_short = wing(ctx, spot - m * dec!(0.7), OptionType::Put, spot, StrikeDirection::Below)?;
        let call_short =
            wing(ctx, spot + m * dec!(0.7), OptionType::Call, spot, StrikeDirection::Above)?;
        let put_long = wing(
            ctx,
            spot - m * dec!(1.3),
            OptionType::Put,
            put_short.strike,
            StrikeDirection::Below,
        )?;
        let call_long = wing(
            ctx,
            spot + m * dec!(1.3),
            OptionType::Call,
            call_short.strike,
            StrikeDirection::Above,
        )?;

        let ordered = put_long.strike < put_short.strike
            && put_short.strike < spot
            && spot < call_short.strike
            && call_short.strike < call_long.strike;
        if !ordered {
            return Err(StrategyError::ordering(format!(
                "iron condor {} / {} / {spot} / {} / {}",
                put_long.strike, put_short.strike, call_short.strike, call_long.strike
            )));
        }

        for contract in [put_long, put_short, call_short, call_long] {
            ctx.require_premium(contract)?;
        }
        let legs = vec![
            ctx.leg(put_long, PositionSide::Long, 1),
            ctx.leg(put_short, PositionSide::Short, 1),
            ctx.leg(call_short, PositionSide::Short, 1),
            ctx.leg(call_long, PositionSide::Long, 1),
        ];
        let credit = require_credit(self.kind(), &legs)?;

        let probability = probability::iron_condor(
            probability_delta(&legs[2]),
            probability_delta(&legs[1]),
            probability_delta(&legs[3]),
            probability_delta(&legs[0]),
        );
        debug!(
            put_long = %put_long.strike,
            put_short = %put_short.strike,
            call_short = %call_short.strike,
            call_long = %call_long.strike,
            %credit,
            probability,
            "Built iron condor"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .probability(probability)
            .build()
    }
}

/// Short ATM straddle with long wings one move away.
#[derive(Debug, Clone, Copy, Default)]
pub struct IronButterfly;

impl StrategyArchetype for IronButterfly {
    fn kind(&self) -> StrategyKind {
        StrategyKind::IronButterfly
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();
        let body = atm_strike(ctx.chain)
            .ok_or_else(|| StrategyError::insufficient("no strike listed for both calls and puts"))?;
        let (call_body, put_body) = match (
            ctx.chain.find(body, OptionType::Call),
            ctx.chain.find(body, OptionType::Put),
        ) {
            (Some(call), Some(put)) => (call, put),
            _ => return Err(StrategyError::insufficient(format!("no ATM pair at {body}"))),
        };
        let put_wing = wing(ctx, spot - m, OptionType::Put, body, StrikeDirection::Below)?;
        let call_wing = wing(ctx, spot + m, OptionType::Call, body, StrikeDirection::Above)?;

        for contract in [put_wing, put_body, call_body, call_wing] {
            ctx.require_premium(contract)?;
        }
        let legs = vec![
            ctx.leg(put_wing, PositionSide::Long, 1),
            ctx.leg(put_body, PositionSide::Short, 1),
            ctx.leg(call_body, PositionSide::Short, 1),
            ctx.leg(call_wing, PositionSide::Long, 1),
        ];
        let credit = require_credit(self.kind(), &legs)?;

        let probability = probability::straddle(
            probability_delta(&legs[2]),
            ctx.atm_iv(),
            ctx.dte(),
            PositionSide::Short,
        );
        debug!(
            %body,
            put_wing = %put_wing.strike,
            call_wing = %call_wing.strike,
            %credit,
            probability,
            "Built iron butterfly"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .probability(probability)
            .build()
    }
}

/// Long call wings around two short ATM calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Butterfly;

impl StrategyArchetype for Butterfly {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Butterfly
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();
        let body = nearest_contract(ctx.chain, OptionType::Call, spot).ok_or(
            StrategyError::NoStrikesAvailable {
                option_type: OptionType::Call,
            },
        )?;
        let lower = wing(ctx, spot - m, OptionType::Call, body.strike, StrikeDirection::Below)?;
        let upper = wing(ctx, spot + m, OptionType::Call, body.strike, StrikeDirection::Above)?;

        for contract in [lower, body, upper] {
            ctx.require_premium(contract)?;
        }
        let legs = vec![
            ctx.leg(lower, PositionSide::Long, 1),
            ctx.leg(body, PositionSide::Short, 2),
            ctx.leg(upper, PositionSide::Long, 1),
        ];
        let debit = require_debit(self.kind(), &legs)?;

        let probability = probability::straddle(
            probability_delta(&legs[1]),
            ctx.atm_iv(),
            ctx.dte(),
            PositionSide::Short,
        );
        debug!(
            lower = %lower.strike,
            body = %body.strike,
            upper = %upper.strike,
            %debit,
            probability,
            "Built call butterfly"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .probability(probability)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayoffBound;
    use crate::strategies::test_support::{analysis, chain, with_ctx};

    #[test]
    fn test_iron_condor_ordering_and_credit() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| IronCondor.construct(ctx)).unwrap();
        let strikes: Vec<Decimal> = result.legs.iter().map(|l| l.strike).collect();
        assert!(strikes[0] < strikes[1]);
        assert!(strikes[1] < dec!(100));
        assert!(dec!(100) < strikes[2]);
        assert!(strikes[2] < strikes[3]);
        assert!(result.is_credit());
        assert_eq!(result.breakevens.len(), 2);
        assert!(!result.max_loss.is_unbounded());
        assert!((0.0..=1.0).contains(&result.probability_of_profit));
    }

    #[test]
    fn test_iron_condor_on_strike_spot_moves_shorts_off_spot() {
        // Tiny move: both short targets round onto the spot strike
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(0.5));
        let result = with_ctx(&chain, &analysis, |ctx| IronCondor.construct(ctx)).unwrap();
        assert_eq!(result.legs[1].strike, dec!(97.5));
        assert_eq!(result.legs[2].strike, dec!(102.5));
    }

    #[test]
    fn test_iron_butterfly_shares_body() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| IronButterfly.construct(ctx)).unwrap();
        assert_eq!(result.legs[1].strike, dec!(100));
        assert_eq!(result.legs[2].strike, dec!(100));
        assert!(result.legs[0].strike < dec!(100));
        assert!(result.legs[3].strike > dec!(100));
        assert!(result.is_credit());
    }

    #[test]
    fn test_butterfly_body_has_quantity_two() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| Butterfly.construct(ctx)).unwrap();
        assert_eq!(result.legs.len(), 3);
        assert_eq!(result.legs[1].quantity, 2);
        assert_eq!(result.legs[1].position, PositionSide::Short);
        assert!(result.net_premium < Decimal::ZERO);
        assert!(matches!(result.max_profit, PayoffBound::Limited(_)));
    }
}
