//! Delta-based probability of profit.
//!
//! `|delta|` approximates the probability that an option finishes in the
//! money. Deltas are taken in absolute value so put deltas may be quoted with
//! either sign.

use serde::{Deserialize, Serialize};

use crate::models::PositionSide;

/// Haircut applied to a long option's ITM probability for the premium paid.
pub const LONG_PREMIUM_HAIRCUT: f64 = 0.06;

/// Fixed estimate for ratio spreads, whose payoff is path-dependent.
pub const RATIO_SPREAD_POP: f64 = 0.40;

/// Fixed estimate for calendar and diagonal spreads.
pub const TIME_SPREAD_POP: f64 = 0.45;

/// Whether a spread is opened for a net credit or a net debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumFlow {
    /// Net premium received.
    Credit,
    /// Net premium paid.
    Debit,
}

/// `|delta|` clamped to `[0, 1]`; non-finite deltas become a neutral 0.5.
#[must_use]
pub fn prob_itm(delta: f64) -> f64 {
    if delta.is_finite() {
        delta.abs().min(1.0)
    } else {
        0.5
    }
}

/// Probability of profit for one option held to expiry.
///
/// Long: `max(0, |delta| - 0.06)`. Short: `1 - |delta|`.
#[must_use]
pub fn single_leg(delta: f64, position: PositionSide) -> f64 {
    let itm = prob_itm(delta);
    match position {
        PositionSide::Long => (itm - LONG_PREMIUM_HAIRCUT).max(0.0),
        PositionSide::Short => 1.0 - itm,
    }
}

/// Probability of profit for a vertical spread.
///
/// Credit spreads profit when the short strike expires worthless,
/// `1 - |short_delta|`. Debit spreads need the short strike reached,
/// `|short_delta|`. The long delta is accepted for symmetry with the leg
/// pair but does not enter either estimate.
#[must_use]
pub fn spread(short_delta: f64, _long_delta: f64, flow: PremiumFlow) -> f64 {
    let short_itm = prob_itm(short_delta);
    match flow {
        PremiumFlow::Credit => 1.0 - short_itm,
        PremiumFlow::Debit => short_itm,
    }
}

/// Probability of profit for an iron condor.
///
/// `(1 - (|call_short| + (1 - |put_short|))) * 0.9`, clamped to `[0, 1]`.
/// The wing deltas do not enter the estimate.
// NOTE: reduces to (|put_short| - |call_short|) * 0.9 and is near zero for a
// symmetric condor; kept as the established estimate until the intended
// semantics are settled.
#[must_use]
pub fn iron_condor(
    call_short_delta: f64,
    put_short_delta: f64,
    _call_long_delta: f64,
    _put_long_delta: f64,
) -> f64 {
    let call_short = prob_itm(call_short_delta);
    let put_short = prob_itm(put_short_delta);
    ((1.0 - (call_short + (1.0 - put_short))) * 0.9).clamp(0.0, 1.0)
}
