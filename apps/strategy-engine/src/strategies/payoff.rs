//! Expiry payoff of same-expiry option positions.
//!
//! The payoff is piecewise linear with breakpoints at the strikes, so it is
//! fully described by its value at zero, at every strike and by its slope
//! above the highest strike.

use rust_decimal::Decimal;

use crate::models::{OptionType, PayoffBound, StrategyLeg};

/// Per-share payoff extremes and breakevens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoffSummary {
    /// Best outcome at expiry.
    pub max_profit: PayoffBound,
    /// Worst outcome at expiry, as a positive amount.
    pub max_loss: PayoffBound,
    /// Underlying prices where the payoff crosses zero, ascending.
    pub breakevens: Vec<Decimal>,
}

/// Net payoff per share at `price`, premiums included.
#[must_use]
pub fn payoff_at(legs: &[StrategyLeg], price: Decimal) -> Decimal {
    legs.iter().map(|leg| leg.payoff_at(price)).sum()
}

/// Slope of the payoff above the highest strike (net call quantity).
fn upside_slope(legs: &[StrategyLeg]) -> Decimal {
    legs.iter()
        .filter(|leg| leg.option_type == OptionType::Call)
        .map(|leg| Decimal::from(leg.signed_quantity()))
        .sum()
}

fn sign(value: Decimal) -> i8 {
    if value > Decimal::ZERO {
        1
    } else if value < Decimal::ZERO {
        -1
    } else {
        0
    }
}

/// Summarise the expiry payoff of legs sharing one expiry.
#[must_use]
pub fn expiry_payoff(legs: &[StrategyLeg]) -> PayoffSummary {
    let mut points: Vec<Decimal> = std::iter::once(Decimal::ZERO)
        .chain(legs.iter().map(|leg| leg.strike))
        .collect();
    points.sort();
    points.dedup();

    let values: Vec<Decimal> = points.iter().map(|&p| payoff_at(legs, p)).collect();
    let slope = upside_slope(legs);

    let best = values.iter().copied().max().unwrap_or(Decimal::ZERO);
    let worst = values.iter().copied().min().unwrap_or(Decimal::ZERO);

    let max_profit = if slope > Decimal::ZERO {
        PayoffBound::Unbounded
    } else {
        PayoffBound::Limited(best.max(Decimal::ZERO))
    };
    let max_loss = if slope < Decimal::ZERO {
        PayoffBound::Unbounded
    } else {
        PayoffBound::Limited((-worst).max(Decimal::ZERO))
    };

    // Sign of the payoff far above the highest strike.
    let tail_sign = if slope.is_zero() {
        values.last().map_or(0, |v| sign(*v))
    } else {
        sign(slope)
    };

    let mut breakevens = Vec::new();
    for (i, (&point, &value)) in points.iter().zip(&values).enumerate() {
        // A zero touch counts only where the payoff changes sign. Flat zero
        // stretches are reported once, at their lower end.
        if value.is_zero() && point > Decimal::ZERO && i > 0 && !values[i - 1].is_zero() {
            let right = values[i + 1..]
                .iter()
                .find(|v| !v.is_zero())
                .map_or(tail_sign, |v| sign(*v));
            if sign(values[i - 1]) * right < 0 {
                breakevens.push(point);
            }
        }
        if let (Some(&next_point), Some(&next_value)) = (points.get(i + 1), values.get(i + 1)) {
            if (value < Decimal::ZERO && next_value > Decimal::ZERO)
                || (value > Decimal::ZERO && next_value < Decimal::ZERO)
            {
                breakevens.push(point + (next_point - point) * (-value) / (next_value - value));
            }
        }
    }
    if let (Some(&last_point), Some(&last_value)) = (points.last(), values.last()) {
        if !last_value.is_zero() && !slope.is_zero() && (last_value * slope) < Decimal::ZERO {
            breakevens.push(last_point - last_value / slope);
        }
    }
    for breakeven in &mut breakevens {
        *breakeven = breakeven.normalize();
    }
    breakevens.dedup();

    PayoffSummary {
        max_profit,
        max_loss,
        breakevens,
    }
}
