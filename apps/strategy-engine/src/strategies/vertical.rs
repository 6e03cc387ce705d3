//! Two-leg vertical spreads.

use rust_decimal::Decimal;
use tracing::debug;

use super::archetype::StrategyArchetype;
use super::builder::StrategyResultBuilder;
use super::context::{ConstructionContext, probability_delta};
use super::kind::StrategyKind;
use crate::error::StrategyError;
use crate::models::{PositionSide, StrategyResult};
use crate::probability::{self, PremiumFlow};

/// Bull/bear call/put spread.
#[derive(Debug, Clone, Copy)]
pub struct VerticalSpread {
    kind: StrategyKind,
}

impl VerticalSpread {
    /// Long lower call, short higher call.
    pub const BULL_CALL: Self = Self {
        kind: StrategyKind::BullCallSpread,
    };
    /// Long higher put, short lower put.
    pub const BEAR_PUT: Self = Self {
        kind: StrategyKind::BearPutSpread,
    };
    /// Short higher put, long lower put.
    pub const BULL_PUT: Self = Self {
        kind: StrategyKind::BullPutSpread,
    };
    /// Short lower call, long higher call.
    pub const BEAR_CALL: Self = Self {
        kind: StrategyKind::BearCallSpread,
    };

    const fn flow(&self) -> PremiumFlow {
        match self.kind {
            StrategyKind::BullCallSpread | StrategyKind::BearPutSpread => PremiumFlow::Debit,
            _ => PremiumFlow::Credit,
        }
    }

    fn check_ordering(&self, long: Decimal, short: Decimal) -> Result<(), StrategyError> {
        let ordered = match self.kind {
            StrategyKind::BullCallSpread | StrategyKind::BullPutSpread => long < short,
            _ => short < long,
        };
        if ordered {
            Ok(())
        } else {
            Err(StrategyError::ordering(format!(
                "{}: long {long}, short {short}",
                self.kind
            )))
        }
    }
}

impl StrategyArchetype for VerticalSpread {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError> {
        ctx.require_expected_moves()?;
        let selected = ctx.selector.select_spread(self.kind, ctx.chain, ctx.analysis)?;
        self.check_ordering(selected.long.strike, selected.short.strike)?;
        ctx.require_premium(selected.long)?;
        ctx.require_premium(selected.short)?;

        let long = ctx.leg(selected.long, PositionSide::Long, 1);
        let short = ctx.leg(selected.short, PositionSide::Short, 1);
        let net_premium = long.net_premium() + short.net_premium();
        let flow = self.flow();
        match flow {
            PremiumFlow::Debit if net_premium >= Decimal::ZERO => {
                return Err(StrategyError::no_premium(format!(
                    "{} requires a net debit, got {net_premium}",
                    self.kind
                )));
            }
            PremiumFlow::Credit if net_premium <= Decimal::ZERO => {
                return Err(StrategyError::no_premium(format!(
                    "{} requires a net credit, got {net_premium}",
                    self.kind
                )));
            }
            _ => {}
        }

        let probability =
            probability::spread(probability_delta(&short), probability_delta(&long), flow);
        debug!(
            strategy = %self.kind,
            long = %long.strike,
            short = %short.strike,
            %net_premium,
            probability,
            "Built vertical spread"
        );

        StrategyResultBuilder::new(ctx, self.kind, vec![long, short])
            .probability(probability)
            .build()
    }
}
