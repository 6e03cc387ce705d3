//! Probability of profit for straddles and strangles.

use super::delta::single_leg;
use crate::models::PositionSide;

/// Long volatility never scores above this.
const LONG_CAP: f64 = 0.7;
/// Short volatility never scores below this.
const SHORT_FLOOR: f64 = 0.3;

/// Expected move over `dte` as a fraction of spot, from IV in percentage points.
#[must_use]
pub fn expected_move_fraction(iv: f64, dte: u32) -> f64 {
    iv * (f64::from(dte) / 365.0).sqrt() / 100.0
}

/// Probability of profit for a straddle or strangle.
///
/// Long: `min(0.7, move * 2.5)`. Short: `max(0.3, 1 - move * 2.0)`, where
/// `move = iv * sqrt(dte / 365) / 100`. Without a usable IV the call delta
/// alone drives a single-leg estimate.
#[must_use]
pub fn straddle(delta: f64, iv: f64, dte: u32, position: PositionSide) -> f64 {
    if !iv.is_finite() || iv <= 0.0 {
        return single_leg(delta, position);
    }

    let move_fraction = expected_move_fraction(iv, dte);
    let p = match position {
        PositionSide::Long => (move_fraction * 2.5).min(LONG_CAP),
        PositionSide::Short => (1.0 - move_fraction * 2.0).max(SHORT_FLOOR),
    };
    p.clamp(0.0, 1.0)
}
