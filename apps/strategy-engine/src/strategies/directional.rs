//! Single option bought or sold outright.

use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::ConstructionContext;
use super::kind::StrategyKind;
use crate::error::StrategyError;
use crate::models::{OptionType, PositionSide, StrategyResult};
use crate::selection::{MoneynessBand, single_leg_target};

/// Long/short call or put.
#[derive(Debug, Clone, Copy)]
pub struct SingleLeg {
    kind: StrategyKind,
    option_type: OptionType,
    position: PositionSide,
}

impl SingleLeg {
    /// Buy a call.
    pub const LONG_CALL: Self = Self::new(StrategyKind::LongCall, OptionType::Call, PositionSide::Long);
    /// Buy a put.
    pub const LONG_PUT: Self = Self::new(StrategyKind::LongPut, OptionType::Put, PositionSide::Long);
    /// Sell a call.
    pub const SHORT_CALL: Self =
        Self::new(StrategyKind::ShortCall, OptionType::Call, PositionSide::Short);
    /// Sell a put.
    pub const SHORT_PUT: Self = Self::new(StrategyKind::ShortPut, OptionType::Put, PositionSide::Short);

    const fn new(kind: StrategyKind, option_type: OptionType, position: PositionSide) -> Self {
        Self {
            kind,
            option_type,
            position,
        }
    }
}

impl StrategyArchetype for SingleLeg {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        if self.position == PositionSide::Short {
            ctx.require_short_premium_iv()?;
        }
        let move_unit = ctx.require_expected_moves()?;
        let target = single_leg_target(self.kind, ctx.spot(), move_unit).ok_or_else(|| {
            StrategyError::insufficient(format!("{} has no single-leg target", self.kind))
        })?;

        let contract = ctx.selector.select_validated(
            target,
            self.option_type,
            MoneynessBand::single_leg(self.option_type, self.position),
            ctx.chain,
        )?;
        ctx.require_premium(contract)?;

        let leg = ctx.leg(contract, self.position, 1);
        let probability = ctx.single_leg_probability(&leg);
        debug!(
            strategy = %self.kind,
            %target,
            strike = %leg.strike,
            premium = %leg.premium,
            probability,
            "Built single-leg position"
        );

        StrategyResultBuilder::new(ctx, self.kind, vec![leg])
            .probability(probability)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::error::ErrorCode;
    use crate::models::PayoffBound;
    use crate::strategies::test_support::{analysis, chain, with_ctx};

    #[test]
    fn test_long_call_targets_expected_move() {
        // m = 5 * 0.75; target = 100 + 0.8m = 103
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| SingleLeg::LONG_CALL.construct(ctx)).unwrap();
        assert_eq!(result.legs[0].strike, dec!(102.5));
        assert_eq!(result.max_profit, PayoffBound::Unbounded);
        assert_eq!(
            result.max_loss,
            PayoffBound::Limited(result.legs[0].premium * dec!(100))
        );
        assert_eq!(result.breakevens, vec![dec!(102.5) + result.legs[0].premium]);
    }

    #[test]
    fn test_short_call_rejects_low_iv() {
        let chain = chain(dec!(100));
        let mut analysis = analysis(dec!(5));
        analysis.iv_analysis.atm_iv = 10.0;
        let err = with_ctx(&chain, &analysis, |ctx| SingleLeg::SHORT_CALL.construct(ctx)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IvOutOfBand);
        assert_eq!(err.reason(), "IV too low for attractive premium collection");
    }

    #[test]
    fn test_short_put_stays_otm() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| SingleLeg::SHORT_PUT.construct(ctx)).unwrap();
        assert!(result.legs[0].strike <= dec!(100));
        assert_eq!(result.max_profit, PayoffBound::Limited(result.legs[0].premium * dec!(100)));
        assert!(result.is_credit());
    }

    #[test]
    fn test_missing_expected_moves() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(0));
        let err = with_ctx(&chain, &analysis, |ctx| SingleLeg::LONG_PUT.construct(ctx)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientData);
    }
}
