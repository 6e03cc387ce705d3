//! Error taxonomy for strategy construction.
//!
//! Every failure inside the decision core is recoverable at the call site:
//! constructions return `Result<StrategyResult, StrategyError>` and batch runs
//! record failures as [`StrategyFailure`] values instead of aborting.
//!
//! | Code | Meaning |
//! |------|---------|
//! | `INSUFFICIENT_DATA` | Missing contracts, legs or premiums |
//! | `IV_OUT_OF_BAND` | Implied volatility too low/high for the archetype |
//! | `INVALID_STRIKE_ORDERING` | Spread/condor ordering invariant violated |
//! | `NO_LIQUID_STRIKES` | Only illiquid strikes were available |
//! | `NON_POSITIVE_PREMIUM` | No net credit/debit where one is required |
//! | `NO_STRIKES_AVAILABLE` | No contracts of the requested type |
//! | `INSUFFICIENT_CAPITAL` | Capital cannot secure a single lot |
//! | `INVALID_CHAIN` | Chain snapshot violates its invariants |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::OptionType;
use crate::strategies::StrategyKind;

/// Stable error codes for collaborators that persist failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing contracts, legs or premiums.
    InsufficientData,
    /// Implied volatility outside the archetype's band.
    IvOutOfBand,
    /// Strike ordering invariant violated.
    InvalidStrikeOrdering,
    /// Only illiquid strikes available.
    NoLiquidStrikes,
    /// No net credit or debit.
    NonPositivePremium,
    /// No strikes of the requested type.
    NoStrikesAvailable,
    /// Not enough capital for one lot.
    InsufficientCapital,
    /// Chain snapshot is malformed.
    InvalidChain,
}

impl ErrorCode {
    /// Code as it appears in persisted records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::IvOutOfBand => "IV_OUT_OF_BAND",
            Self::InvalidStrikeOrdering => "INVALID_STRIKE_ORDERING",
            Self::NoLiquidStrikes => "NO_LIQUID_STRIKES",
            Self::NonPositivePremium => "NON_POSITIVE_PREMIUM",
            Self::NoStrikesAvailable => "NO_STRIKES_AVAILABLE",
            Self::InsufficientCapital => "INSUFFICIENT_CAPITAL",
            Self::InvalidChain => "INVALID_CHAIN",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from strike selection and strategy construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    /// Required contracts, premiums or legs are missing.
    #[error("Insufficient option data: {message}")]
    InsufficientData {
        /// Error message.
        message: String,
    },

    /// ATM implied volatility is too low to sell premium.
    #[error("IV too low for attractive premium collection")]
    IvTooLow {
        /// Observed ATM IV (percentage points).
        atm_iv: f64,
        /// Minimum IV required by the archetype.
        minimum: f64,
    },

    /// ATM implied volatility is too high to buy premium.
    #[error("IV too high for buying volatility")]
    IvTooHigh {
        /// Observed ATM IV (percentage points).
        atm_iv: f64,
        /// Maximum IV tolerated by the archetype.
        maximum: f64,
    },

    /// Strike ordering invariant violated.
    #[error("Invalid strike ordering: {message}")]
    InvalidStrikeOrdering {
        /// Error message.
        message: String,
    },

    /// Only strikes failing the liquidity filter were found.
    #[error("No liquid {option_type} strikes available")]
    NoLiquidStrikes {
        /// Requested option type.
        option_type: OptionType,
    },

    /// The position does not produce the required net credit or debit.
    #[error("{message}")]
    NonPositivePremium {
        /// Error message.
        message: String,
    },

    /// No contracts of the requested type in the chain.
    #[error("No {option_type} strikes available")]
    NoStrikesAvailable {
        /// Requested option type.
        option_type: OptionType,
    },

    /// Capital cannot secure a single lot.
    #[error("Insufficient capital: required {required}, available {available}")]
    InsufficientCapital {
        /// Capital required for one lot.
        required: Decimal,
        /// Capital available.
        available: Decimal,
    },

    /// Chain snapshot violates its invariants.
    #[error("Invalid option chain: {message}")]
    InvalidChain {
        /// Error message.
        message: String,
    },
}

impl StrategyError {
    /// Stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InsufficientData { .. } => ErrorCode::InsufficientData,
            Self::IvTooLow { .. } | Self::IvTooHigh { .. } => ErrorCode::IvOutOfBand,
            Self::InvalidStrikeOrdering { .. } => ErrorCode::InvalidStrikeOrdering,
            Self::NoLiquidStrikes { .. } => ErrorCode::NoLiquidStrikes,
            Self::NonPositivePremium { .. } => ErrorCode::NonPositivePremium,
            Self::NoStrikesAvailable { .. } => ErrorCode::NoStrikesAvailable,
            Self::InsufficientCapital { .. } => ErrorCode::InsufficientCapital,
            Self::InvalidChain { .. } => ErrorCode::InvalidChain,
        }
    }

    /// Human-readable reason, as stored alongside skipped constructions.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    pub(crate) fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientData {
            message: message.into(),
        }
    }

    pub(crate) fn ordering(message: impl Into<String>) -> Self {
        Self::InvalidStrikeOrdering {
            message: message.into(),
        }
    }

    pub(crate) fn no_premium(message: impl Into<String>) -> Self {
        Self::NonPositivePremium {
            message: message.into(),
        }
    }
}

/// A construction that was skipped, kept as an ordinary value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyFailure {
    /// Underlying symbol.
    pub symbol: String,
    /// Strategy that failed to construct.
    pub strategy: StrategyKind,
    /// Stable error code.
    pub code: ErrorCode,
    /// Reason string.
    pub reason: String,
}

impl StrategyFailure {
    /// Record a failed construction.
    #[must_use]
    pub fn new(symbol: &str, strategy: StrategyKind, error: &StrategyError) -> Self {
        Self {
            symbol: symbol.to_string(),
            strategy,
            code: error.code(),
            reason: error.reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iv_too_low_reason_is_stable() {
        let err = StrategyError::IvTooLow {
            atm_iv: 10.0,
            minimum: 15.0,
        };
        assert_eq!(err.reason(), "IV too low for attractive premium collection");
        assert_eq!(err.code(), ErrorCode::IvOutOfBand);
    }

    #[test]
    fn iv_codes_share_band() {
        let err = StrategyError::IvTooHigh {
            atm_iv: 95.0,
            maximum: 60.0,
        };
        assert_eq!(err.code().as_str(), "IV_OUT_OF_BAND");
    }

    #[test]
    fn failure_carries_code_and_reason() {
        let err = StrategyError::NoStrikesAvailable {
            option_type: OptionType::Put,
        };
        let failure = StrategyFailure::new("NIFTY", StrategyKind::LongPut, &err);
        assert_eq!(failure.code, ErrorCode::NoStrikesAvailable);
        assert_eq!(failure.reason, "No PUT strikes available");
        assert_eq!(failure.symbol, "NIFTY");
    }

    #[test]
    fn error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::NonPositivePremium).unwrap_or_default();
        assert_eq!(json, "\"NON_POSITIVE_PREMIUM\"");
    }
}
