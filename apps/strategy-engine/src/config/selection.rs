//! Strike selection configuration.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Strike selection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Minimum open interest for a liquid candidate.
    #[serde(default = "default_min_open_interest")]
    pub min_open_interest: u64,
    /// Minimum session volume for a liquid candidate.
    #[serde(default = "default_min_volume")]
    pub min_volume: u64,
    /// Weight of strike proximity in the selection score.
    #[serde(default = "default_proximity_weight")]
    pub proximity_weight: f64,
    /// Weight of liquidity in the selection score.
    #[serde(default = "default_liquidity_weight")]
    pub liquidity_weight: f64,
    /// Expected-move multiplier per timeframe bucket.
    #[serde(default = "default_timeframe_multipliers")]
    pub timeframe_multipliers: BTreeMap<String, Decimal>,
    /// Multiplier for unrecognized timeframe buckets.
    #[serde(default = "default_timeframe_multiplier")]
    pub default_timeframe_multiplier: Decimal,
    /// Fail with `NoLiquidStrikes` instead of relaxing the liquidity filter.
    #[serde(default)]
    pub require_liquid_strikes: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_open_interest: default_min_open_interest(),
            min_volume: default_min_volume(),
            proximity_weight: default_proximity_weight(),
            liquidity_weight: default_liquidity_weight(),
            timeframe_multipliers: default_timeframe_multipliers(),
            default_timeframe_multiplier: default_timeframe_multiplier(),
            require_liquid_strikes: false,
        }
    }
}

impl SelectionConfig {
    /// Expected-move multiplier for a timeframe bucket.
    #[must_use]
    pub fn timeframe_multiplier(&self, duration: &str) -> Decimal {
        self.timeframe_multipliers
            .get(duration.trim())
            .copied()
            .unwrap_or(self.default_timeframe_multiplier)
    }
}

const fn default_min_open_interest() -> u64 {
    100
}

const fn default_min_volume() -> u64 {
    1
}

const fn default_proximity_weight() -> f64 {
    0.7
}

const fn default_liquidity_weight() -> f64 {
    0.3
}

fn default_timeframe_multipliers() -> BTreeMap<String, Decimal> {
    [
        ("1-5 days", dec!(0.3)),
        ("5-10 days", dec!(0.5)),
        ("10-20 days", dec!(0.75)),
        ("20-30 days", dec!(1.0)),
        ("30+ days", dec!(1.25)),
    ]
    .into_iter()
    .map(|(bucket, mult)| (bucket.to_string(), mult))
    .collect()
}

fn default_timeframe_multiplier() -> Decimal {
    dec!(0.75)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1-5 days", dec!(0.3))]
    #[test_case("5-10 days", dec!(0.5))]
    #[test_case("10-20 days", dec!(0.75))]
    #[test_case("20-30 days", dec!(1.0))]
    #[test_case("30+ days", dec!(1.25))]
    #[test_case("next quarter", dec!(0.75))]
    fn test_timeframe_multiplier(bucket: &str, expected: Decimal) {
        assert_eq!(SelectionConfig::default().timeframe_multiplier(bucket), expected);
    }
}
