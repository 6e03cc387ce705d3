//! Straddles and strangles.

use rust_decimal_macros::dec;
use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::{ConstructionContext, probability_delta};
use super::kind::StrategyKind;
use crate::error::StrategyError;
use crate::models::{OptionType, PositionSide, StrategyResult};
use crate::probability;
use crate::selection::{MoneynessBand, StrikeDirection, adjacent_or_fail, atm_strike};

fn volatility_gate(ctx: &ConstructionContext<'_>, position: PositionSide) -> Result<(), StrategyError> {
    match position {
        PositionSide::Short => ctx.require_short_premium_iv(),
        PositionSide::Long => ctx.require_long_volatility_iv(),
    }
}

/// Call and put at the same ATM strike.
#[derive(Debug, Clone, Copy)]
pub struct Straddle {
    position: PositionSide,
}

impl Straddle {
    /// Buy the straddle.
    pub const LONG: Self = Self {
        position: PositionSide::Long,
    };
    /// Sell the straddle.
    pub const SHORT: Self = Self {
        position: PositionSide::Short,
    };
}

impl StrategyArchetype for Straddle {
    fn kind(&self) -> StrategyKind {
        match self.position {
            PositionSide::Long => StrategyKind::LongStraddle,
            PositionSide::Short => StrategyKind::ShortStraddle,
        }
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        volatility_gate(ctx, self.position)?;
        let strike = atm_strike(ctx.chain)
            .ok_or_else(|| StrategyError::insufficient("no strike listed for both calls and puts"))?;
        let (call, put) = match (
            ctx.chain.find(strike, OptionType::Call),
            ctx.chain.find(strike, OptionType::Put),
        ) {
            (Some(call), Some(put)) => (call, put),
            _ => return Err(StrategyError::insufficient(format!("no ATM pair at {strike}"))),
        };
        ctx.require_premium(call)?;
        ctx.require_premium(put)?;

        let legs = vec![
            ctx.leg(call, self.position, 1),
            ctx.leg(put, self.position, 1),
        ];
        let probability = probability::straddle(
            probability_delta(&legs[0]),
            ctx.atm_iv(),
            ctx.dte(),
            self.position,
        );
        debug!(
            strategy = %self.kind(),
            %strike,
            call_premium = %call.premium(),
            put_premium = %put.premium(),
            probability,
            "Built straddle"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .probability(probability)
            .build()
    }
}

/// OTM call and OTM put half a move either side of spot.
#[derive(Debug, Clone, Copy)]
pub struct Strangle {
    position: PositionSide,
}

impl Strangle {
    /// Buy the strangle.
    pub const LONG: Self = Self {
        position: PositionSide::Long,
    };
    /// Sell the strangle.
    pub const SHORT: Self = Self {
        position: PositionSide::Short,
    };
}

impl StrategyArchetype for Strangle {
    fn kind(&self) -> StrategyKind {
        match self.position {
            PositionSide::Long => StrategyKind::LongStrangle,
            PositionSide::Short => StrategyKind::ShortStrangle,
        }
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        volatility_gate(ctx, self.position)?;
        let m = ctx.require_expected_moves()?;
        let spot = ctx.spot();

        let mut call = ctx.selector.select_validated(
            spot + m * dec!(0.5),
            OptionType::Call,
            MoneynessBand::SHORT_CALL,
            ctx.chain,
        )?;
        let put = ctx.selector.select_validated(
            spot - m * dec!(0.5),
            OptionType::Put,
            MoneynessBand::SHORT_PUT,
            ctx.chain,
        )?;
        if put.strike >= call.strike {
            call = adjacent_or_fail(ctx.chain, OptionType::Call, put.strike, StrikeDirection::Above)?;
        }
        if put.strike >= call.strike {
            return Err(StrategyError::ordering(format!(
                "strangle put {} must sit below call {}",
                put.strike, call.strike
            )));
        }
        ctx.require_premium(call)?;
        ctx.require_premium(put)?;

        let legs = vec![
            ctx.leg(call, self.position, 1),
            ctx.leg(put, self.position, 1),
        ];
        let probability = probability::straddle(
            probability_delta(&legs[0]),
            ctx.atm_iv(),
            ctx.dte(),
            self.position,
        );
        debug!(
            strategy = %self.kind(),
            call = %call.strike,
            put = %put.strike,
            probability,
            "Built strangle"
        );

        StrategyResultBuilder::new(ctx, self.kind(), legs)
            .probability(probability)
            .build()
    }
}
