//! Moneyness bands for selected strikes.

use serde::{Deserialize, Serialize};

use crate::models::{OptionType, PositionSide};

/// Allowed moneyness range, `(strike - spot) / spot`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneynessBand {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl MoneynessBand {
    /// Long calls: slightly ITM to moderately OTM.
    pub const LONG_CALL: Self = Self::new(-0.05, 0.10);
    /// Long puts: moderately OTM to slightly ITM.
    pub const LONG_PUT: Self = Self::new(-0.10, 0.05);
    /// Short calls: ATM to OTM only.
    pub const SHORT_CALL: Self = Self::new(0.0, 0.15);
    /// Short puts: OTM to ATM only.
    pub const SHORT_PUT: Self = Self::new(-0.15, 0.0);
    /// Any spread leg.
    pub const SPREAD: Self = Self::new(-0.15, 0.15);

    /// Create a band.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Band for a single-leg position.
    #[must_use]
    pub const fn single_leg(option_type: OptionType, position: PositionSide) -> Self {
        match (option_type, position) {
            (OptionType::Call, PositionSide::Long) => Self::LONG_CALL,
            (OptionType::Put, PositionSide::Long) => Self::LONG_PUT,
            (OptionType::Call, PositionSide::Short) => Self::SHORT_CALL,
            (OptionType::Put, PositionSide::Short) => Self::SHORT_PUT,
        }
    }

    /// Whether a moneyness value falls inside the band.
    #[must_use]
    pub fn contains(&self, moneyness: f64) -> bool {
        // Tolerate decimal-to-float rounding at the edges
        const EPS: f64 = 1e-9;
        moneyness >= self.min - EPS && moneyness <= self.max + EPS
    }
}
