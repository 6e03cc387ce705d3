//! Greeks for a contract, a leg or a whole position.

use serde::{Deserialize, Serialize};

/// Option sensitivities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta - rate of change of option price with respect to underlying price.
    /// Range: -1.0 to 1.0 for individual options.
    pub delta: f64,
    /// Gamma - rate of change of delta with respect to underlying price.
    pub gamma: f64,
    /// Theta - rate of change of option price with respect to time (per day).
    /// Typically negative for long options.
    pub theta: f64,
    /// Vega - sensitivity to implied volatility (per 1 point change in IV).
    pub vega: f64,
}

impl Greeks {
    /// Create new Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
        }
    }

    /// Scale Greeks by a quantity (positive for long, negative for short).
    #[must_use]
    pub fn scale(&self, quantity: f64) -> Self {
        Self {
            delta: self.delta * quantity,
            gamma: self.gamma * quantity,
            theta: self.theta * quantity,
            vega: self.vega * quantity,
        }
    }

    /// Add another Greeks to this one.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
        }
    }

    /// Create zero Greeks.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeks_scale() {
        let greeks = Greeks::new(0.5, 0.01, -5.0, 10.0);

        // Long 10 contracts
        let scaled = greeks.scale(10.0);
        assert!((scaled.delta - 5.0).abs() < 1e-12);
        assert!((scaled.theta + 50.0).abs() < 1e-12);

        // Short 5 contracts
        let scaled = greeks.scale(-5.0);
        assert!((scaled.delta + 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_greeks_add() {
        let sum = Greeks::new(5.0, 1.0, -10.0, 20.0).add(&Greeks::new(-3.0, 2.0, -5.0, 10.0));
        assert!((sum.delta - 2.0).abs() < 1e-12);
        assert!((sum.gamma - 3.0).abs() < 1e-12);
        assert!((sum.theta + 15.0).abs() < 1e-12);
        assert!((sum.vega - 30.0).abs() < 1e-12);
    }
}
