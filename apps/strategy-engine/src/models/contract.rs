//! Option contract as it appears in a chain snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::greeks::Greeks;
use super::to_f64;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// One row of an option chain snapshot.
///
/// Greeks and IV are optional because upstream feeds drop them for thinly
/// traded strikes; consumers substitute neutral defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Strike price.
    pub strike: Decimal,
    /// Option type (call/put).
    pub option_type: OptionType,
    /// Best bid.
    #[serde(default)]
    pub bid: Decimal,
    /// Best ask.
    #[serde(default)]
    pub ask: Decimal,
    /// Last traded price.
    #[serde(default)]
    pub last_price: Decimal,
    /// Open interest (contracts).
    #[serde(default)]
    pub open_interest: u64,
    /// Session volume (contracts).
    #[serde(default)]
    pub volume: u64,
    /// Implied volatility in percentage points (e.g. 18.5).
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    /// Delta (calls positive, puts negative).
    #[serde(default)]
    pub delta: Option<f64>,
    /// Gamma.
    #[serde(default)]
    pub gamma: Option<f64>,
    /// Theta per day (negative for long premium).
    #[serde(default)]
    pub theta: Option<f64>,
    /// Vega per IV point.
    #[serde(default)]
    pub vega: Option<f64>,
}

impl OptionContract {
    /// Mid price when both sides are quoted.
    #[must_use]
    pub fn mid(&self) -> Option<Decimal> {
        if self.bid > Decimal::ZERO && self.ask > Decimal::ZERO && self.ask >= self.bid {
            Some((self.bid + self.ask) / Decimal::TWO)
        } else {
            None
        }
    }

    /// Trading premium: mid when quoted, else last price.
    #[must_use]
    pub fn premium(&self) -> Decimal {
        self.mid().unwrap_or(self.last_price)
    }

    /// Relative bid/ask spread, 0 when either side is missing.
    #[must_use]
    pub fn spread_pct(&self) -> f64 {
        match self.mid() {
            Some(mid) if mid > Decimal::ZERO => to_f64((self.ask - self.bid) / mid),
            _ => 0.0,
        }
    }

    /// Absolute delta, 0.5 when the feed did not provide one.
    #[must_use]
    pub fn abs_delta(&self) -> f64 {
        self.delta
            .filter(|d| d.is_finite())
            .map_or(0.5, |d| d.abs().min(1.0))
    }

    /// Greeks with missing values treated as zero.
    #[must_use]
    pub fn greeks(&self) -> Greeks {
        Greeks::new(
            self.delta.unwrap_or(0.0),
            self.gamma.unwrap_or(0.0),
            self.theta.unwrap_or(0.0),
            self.vega.unwrap_or(0.0),
        )
    }

    /// Moneyness as a fraction of spot: (strike - spot) / spot.
    #[must_use]
    pub fn moneyness(&self, spot: Decimal) -> f64 {
        if spot <= Decimal::ZERO {
            return 0.0;
        }
        to_f64((self.strike - spot) / spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn contract(bid: Decimal, ask: Decimal, last: Decimal) -> OptionContract {
        OptionContract {
            strike: dec!(100),
            option_type: OptionType::Call,
            bid,
            ask,
            last_price: last,
            open_interest: 0,
            volume: 0,
            implied_volatility: None,
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
        }
    }

    #[test]
    fn test_option_type_display() {
        assert_eq!(OptionType::Call.to_string(), "CALL");
        assert_eq!(OptionType::Put.to_string(), "PUT");
    }

    #[test]
    fn test_premium_prefers_mid() {
        let c = contract(dec!(2.0), dec!(2.2), dec!(1.5));
        assert_eq!(c.premium(), dec!(2.1));
    }

    #[test]
    fn test_premium_falls_back_to_last() {
        let c = contract(Decimal::ZERO, dec!(2.2), dec!(1.5));
        assert_eq!(c.premium(), dec!(1.5));
        assert!(c.spread_pct().abs() < f64::EPSILON);
    }

    #[test]
    fn test_spread_pct() {
        let c = contract(dec!(1.9), dec!(2.1), dec!(2.0));
        assert!((c.spread_pct() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_missing_delta_is_neutral() {
        let c = contract(dec!(1), dec!(1), dec!(1));
        assert!((c.abs_delta() - 0.5).abs() < f64::EPSILON);
        assert!(c.greeks().theta.abs() < f64::EPSILON);
    }

    #[test]
    fn test_moneyness() {
        let c = contract(dec!(1), dec!(1), dec!(1));
        assert!((c.moneyness(dec!(80)) - 0.25).abs() < 1e-9);
        assert!(c.moneyness(Decimal::ZERO).abs() < f64::EPSILON);
    }
}
