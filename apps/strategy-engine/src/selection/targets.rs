//! Target prices derived from expected moves.
//!
//! All targets are expressed as `spot + k * m` where
//! `m = one_sd_move * timeframe_multiplier`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::strategies::StrategyKind;

/// Long and short target prices for a two-leg vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpreadTargets {
    /// Target for the long leg.
    pub long: Decimal,
    /// Target for the short leg.
    pub short: Decimal,
}

/// Target price for a single-leg directional archetype.
///
/// Returns `None` for archetypes that are not single-leg directional.
#[must_use]
pub fn single_leg_target(kind: StrategyKind, spot: Decimal, move_unit: Decimal) -> Option<Decimal> {
    let offset = match kind {
        StrategyKind::LongCall => dec!(0.8),
        StrategyKind::LongPut => dec!(-0.8),
        StrategyKind::ShortCall => dec!(1.0),
        StrategyKind::ShortPut => dec!(-1.0),
        _ => return None,
    };
    Some(spot + move_unit * offset)
}

/// Long/short targets for a vertical spread.
///
/// | Strategy | long | short |
/// |---|---|---|
/// | Bull Call | spot | spot + 0.8m |
/// | Bear Put | spot | spot - 0.8m |
/// | Bull Put | spot - 1.2m | spot - 0.5m |
/// | Bear Call | spot + 1.2m | spot + 0.5m |
#[must_use]
pub fn spread_targets(kind: StrategyKind, spot: Decimal, move_unit: Decimal) -> Option<SpreadTargets> {
    let (long, short) = match kind {
        StrategyKind::BullCallSpread => (Decimal::ZERO, dec!(0.8)),
        StrategyKind::BearPutSpread => (Decimal::ZERO, dec!(-0.8)),
        StrategyKind::BullPutSpread => (dec!(-1.2), dec!(-0.5)),
        StrategyKind::BearCallSpread => (dec!(1.2), dec!(0.5)),
        _ => return None,
    };
    Some(SpreadTargets {
        long: spot + move_unit * long,
        short: spot + move_unit * short,
    })
}
