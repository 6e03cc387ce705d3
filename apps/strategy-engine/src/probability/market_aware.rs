//! Delta probability corrected for premium cost, IV regime and time.

use serde::{Deserialize, Serialize};

use super::delta::prob_itm;
use crate::models::PositionSide;

const MIN_PROBABILITY: f64 = 0.1;
const MAX_PROBABILITY: f64 = 0.9;
const MAX_PREMIUM_ADJUSTMENT: f64 = 0.15;
/// Adjustment per percentage point of premium relative to strike.
const PREMIUM_SENSITIVITY: f64 = 0.02;
const IV_ADJUSTMENT: f64 = 0.05;

/// Market context for a single option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Days to expiry.
    pub dte: u32,
    /// Premium as a percentage of strike (2.5 = 2.5%).
    pub premium_pct_of_strike: f64,
    /// IV percentile in `[0, 100]`.
    pub iv_percentile: f64,
}

/// Time adjustment by days to expiry.
fn time_adjustment(dte: u32) -> f64 {
    match dte {
        0..=6 => 0.08,
        7..=13 => 0.04,
        46.. => 0.01,
        _ => 0.02,
    }
}

/// Probability of profit with market-context corrections, in `[0.1, 0.9]`.
///
/// Buyers start from `|delta|`, pay a premium penalty (capped 0.15), gain 0.05
/// when IV is cheap (below the 30th percentile), lose 0.05 when it is rich
/// (above the 70th) and lose time value. Sellers start from `1 - |delta|` with
/// every correction reversed.
#[must_use]
pub fn market_aware(delta: f64, position: PositionSide, context: &MarketContext) -> f64 {
    let itm = prob_itm(delta);

    let premium_pct = if context.premium_pct_of_strike.is_finite() {
        context.premium_pct_of_strike.max(0.0)
    } else {
        0.0
    };
    let premium_adjustment = (premium_pct * PREMIUM_SENSITIVITY).min(MAX_PREMIUM_ADJUSTMENT);

    let percentile = if context.iv_percentile.is_finite() {
        context.iv_percentile
    } else {
        50.0
    };
    let cheap_iv = if percentile < 30.0 {
        IV_ADJUSTMENT
    } else if percentile > 70.0 {
        -IV_ADJUSTMENT
    } else {
        0.0
    };
    let time = time_adjustment(context.dte);

    let p = match position {
        PositionSide::Long => itm - premium_adjustment + cheap_iv - time,
        PositionSide::Short => (1.0 - itm) + premium_adjustment - cheap_iv + time,
    };
    p.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dte: u32, premium_pct: f64, percentile: f64) -> MarketContext {
        MarketContext {
            dte,
            premium_pct_of_strike: premium_pct,
            iv_percentile: percentile,
        }
    }

    #[test]
    fn test_long_with_cheap_iv() {
        // 0.45 - 0.04 + 0.05 - 0.02
        let p = market_aware(0.45, PositionSide::Long, &context(20, 2.0, 20.0));
        assert!((p - 0.44).abs() < 1e-10);
    }

    #[test]
    fn test_long_near_expiry_penalized() {
        let p = market_aware(0.45, PositionSide::Long, &context(5, 2.0, 50.0));
        assert!((p - (0.45 - 0.04 - 0.08)).abs() < 1e-10);
    }

    #[test]
    fn test_short_with_rich_iv() {
        // 0.70 + 0.03 + 0.05 + 0.01
        let p = market_aware(-0.30, PositionSide::Short, &context(60, 1.5, 85.0));
        assert!((p - 0.79).abs() < 1e-10);
    }

    #[test]
    fn test_premium_penalty_capped() {
        let p = market_aware(0.6, PositionSide::Long, &context(30, 50.0, 50.0));
        assert!((p - (0.6 - 0.15 - 0.02)).abs() < 1e-10);
    }

    #[test]
    fn test_clamped() {
        assert!((market_aware(0.99, PositionSide::Long, &context(30, 0.0, 10.0)) - 0.9).abs() < 1e-10);
        assert!((market_aware(0.01, PositionSide::Long, &context(3, 5.0, 90.0)) - 0.1).abs() < 1e-10);
    }
}
