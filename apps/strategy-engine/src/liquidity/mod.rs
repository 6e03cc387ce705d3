//! Contract liquidity scoring.
//!
//! A contract's tradability is a weighted blend of open interest, session
//! volume and bid/ask tightness:
//!
//! ```text
//! score = 0.4 * min(1, OI / oi_norm)
//!       + 0.3 * min(1, volume / volume_norm)
//!       + 0.3 * (1 - min(1, spread_pct / max_spread_pct))
//! ```
//!
//! A contract without a two-sided quote has `spread_pct = 0`.

use serde::{Deserialize, Serialize};

use crate::config::LiquidityConfig;
use crate::models::OptionContract;

const OPEN_INTEREST_WEIGHT: f64 = 0.4;
const VOLUME_WEIGHT: f64 = 0.3;
const SPREAD_WEIGHT: f64 = 0.3;

/// Liquidity rating bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidityRating {
    /// Score >= 0.8.
    Excellent,
    /// Score >= 0.6.
    Good,
    /// Score >= 0.4.
    Fair,
    /// Score >= 0.2.
    Poor,
    /// Score < 0.2.
    VeryPoor,
}

impl LiquidityRating {
    /// Rating band for a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else if score >= 0.2 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }
}

/// Scores a single contract's tradability.
#[derive(Debug, Clone, Default)]
pub struct LiquidityScorer {
    config: LiquidityConfig,
}

impl LiquidityScorer {
    /// Create a scorer with the given normalizers.
    #[must_use]
    pub const fn new(config: LiquidityConfig) -> Self {
        Self { config }
    }

    /// Score in `[0, 1]`.
    #[must_use]
    pub fn score(&self, contract: &OptionContract) -> f64 {
        let oi_component = ratio(contract.open_interest as f64, self.config.open_interest_norm);
        let volume_component = ratio(contract.volume as f64, self.config.volume_norm);
        let spread_component = 1.0 - ratio(contract.spread_pct(), self.config.max_spread_pct);

        let score = OPEN_INTEREST_WEIGHT * oi_component
            + VOLUME_WEIGHT * volume_component
            + SPREAD_WEIGHT * spread_component;
        score.clamp(0.0, 1.0)
    }

    /// Score and rating band together.
    #[must_use]
    pub fn rate(&self, contract: &OptionContract) -> (f64, LiquidityRating) {
        let score = self.score(contract);
        (score, LiquidityRating::from_score(score))
    }

    /// Whether a score clears the configured minimum.
    #[must_use]
    pub fn is_acceptable(&self, score: f64) -> bool {
        score >= self.config.min_acceptable_score
    }

    /// Configured minimum acceptable score.
    #[must_use]
    pub const fn min_acceptable_score(&self) -> f64 {
        self.config.min_acceptable_score
    }
}

/// `min(1, value / norm)`, zero for non-finite or negative inputs.
fn ratio(value: f64, norm: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || norm <= 0.0 {
        return 0.0;
    }
    (value / norm).min(1.0)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    use super::*;
    use crate::models::OptionType;

    fn contract(oi: u64, volume: u64, bid: Decimal, ask: Decimal) -> OptionContract {
        OptionContract {
            strike: dec!(100),
            option_type: OptionType::Call,
            bid,
            ask,
            last_price: dec!(1),
            open_interest: oi,
            volume,
            implied_volatility: None,
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
        }
    }

    #[test]
    fn test_perfect_liquidity() {
        let scorer = LiquidityScorer::default();
        let c = contract(1_000, 500, dec!(2.00), dec!(2.00));
        assert!((scorer.score(&c) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_partial_components() {
        let scorer = LiquidityScorer::default();
        // OI 250 -> 0.5, volume 100 -> 0.5, spread 0.1/1.05 ~= 0.0952 -> 0.952
        let c = contract(250, 100, dec!(1.00), dec!(1.10));
        let spread = 0.1 / 1.05;
        let expected = 0.4 * 0.5 + 0.3 * 0.5 + 0.3 * (1.0 - spread / 0.10);
        assert!((scorer.score(&c) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_missing_quotes_count_as_tight() {
        let scorer = LiquidityScorer::default();
        let c = contract(0, 0, Decimal::ZERO, Decimal::ZERO);
        assert!((scorer.score(&c) - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_wide_spread_zeroes_component() {
        let scorer = LiquidityScorer::default();
        let c = contract(0, 0, dec!(1.00), dec!(2.00));
        assert!(scorer.score(&c).abs() < 1e-10);
    }

    #[test_case(0.95, LiquidityRating::Excellent)]
    #[test_case(0.8, LiquidityRating::Excellent)]
    #[test_case(0.65, LiquidityRating::Good)]
    #[test_case(0.4, LiquidityRating::Fair)]
    #[test_case(0.25, LiquidityRating::Poor)]
    #[test_case(0.1, LiquidityRating::VeryPoor)]
    fn test_rating_bands(score: f64, expected: LiquidityRating) {
        assert_eq!(LiquidityRating::from_score(score), expected);
    }

    #[test]
    fn test_acceptable_threshold() {
        let scorer = LiquidityScorer::default();
        assert!(scorer.is_acceptable(0.4));
        assert!(!scorer.is_acceptable(0.39));
    }
}
