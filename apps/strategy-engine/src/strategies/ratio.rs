//! One-by-two ratio spreads.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::ConstructionContext;
use super::kind::StrategyKind;
use crate::error::StrategyError;
use crate::models::{OptionType, PositionSide, StrategyResult};
use crate::probability::RATIO_SPREAD_POP;
use crate::selection::{MoneynessBand, StrikeDirection, adjacent_or_fail};

/// Long one near spot, short two further out.
#[derive(Debug, Clone, Copy)]
pub struct RatioSpread {
    option_type: OptionType,
}

impl RatioSpread {
    /// Calls: short strikes above spot, unbounded risk on a rally.
    pub const CALL: Self = Self {
        option_type: OptionType::Call,
    };
    /// Puts: short strikes below spot, risk bounded at zero.
    pub const PUT: Self = Self {
        option_type: OptionType::Put,
    };
}

impl StrategyArchetype for RatioSpread {
    fn kind(&self) -> StrategyKind {
        match self.option_type {
            OptionType::Call => StrategyKind::CallRatioSpread,
            OptionType::Put => StrategyKind::PutRatioSpread,
        }
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();
        let (long_band, short_band, offset, outward) = match self.option_type {
            OptionType::Call => (
                MoneynessBand::LONG_CALL,
                MoneynessBand::SHORT_CALL,
                dec!(0.8),
                StrikeDirection::Above,
            ),
            OptionType::Put => (
                MoneynessBand::LONG_PUT,
                MoneynessBand::SHORT_PUT,
                dec!(-0.8),
                StrikeDirection::Below,
            ),
        };

        let long = ctx
            .selector
            .select_validated(spot, self.option_type, long_band, ctx.chain)?;
        let mut short = ctx.selector.select_validated(
            spot + m * offset,
            self.option_type,
            short_band,
            ctx.chain,
        )?;
        let outside = match outward {
            StrikeDirection::Above => short.strike > long.strike,
            StrikeDirection::Below => short.strike < long.strike,
        };
        if !outside {
            short = adjacent_or_fail(ctx.chain, self.option_type, long.strike, outward)?;
        }
        ctx.require_premium(long)?;
        ctx.require_premium(short)?;

        let legs = vec![
            ctx.leg(long, PositionSide::Long, 1),
            ctx.leg(short, PositionSide::Short, 2),
        ];
        let net_premium: Decimal = legs.iter().map(|leg| leg.net_premium()).sum();
        debug!(
            strategy = %self.kind(),
            long = %long.strike,
            short = %short.strike,
            %net_premium,
            "Built ratio spread"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .probability(RATIO_SPREAD_POP)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayoffBound;
    use crate::strategies::test_support::{analysis, chain, with_ctx};

    #[test]
    fn test_call_ratio_unbounded_above() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| RatioSpread::CALL.construct(ctx)).unwrap();
        assert_eq!(result.max_loss, PayoffBound::Unbounded);
        assert!(result.legs[1].strike > result.legs[0].strike);
        assert_eq!(result.legs[1].quantity, 2);
        assert!((result.probability_of_profit - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_put_ratio_bounded_at_zero() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| RatioSpread::PUT.construct(ctx)).unwrap();
        assert!(!result.max_loss.is_unbounded());
        assert!(result.legs[1].strike < result.legs[0].strike);
        // Worst case is the underlying at zero
        let long = &result.legs[0];
        let short = &result.legs[1];
        let at_zero = long.strike - short.strike * dec!(2) + result.net_premium;
        assert_eq!(result.max_loss, PayoffBound::Limited(-at_zero * dec!(100)));
    }
}
