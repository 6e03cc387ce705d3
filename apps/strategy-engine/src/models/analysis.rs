//! Market analysis record produced upstream and read by the core.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Directional view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDirection {
    /// Expect the underlying to rise.
    Bullish,
    /// Expect the underlying to fall.
    Bearish,
    /// No directional edge.
    Neutral,
}

/// Implied volatility regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IvEnvironment {
    /// IV cheap relative to history.
    Low,
    /// IV near its historical norm.
    #[default]
    Normal,
    /// IV rich relative to history.
    High,
}

/// Holding-period bucket, e.g. `"10-20 days"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    /// Duration bucket label.
    pub duration: String,
}

impl Timeframe {
    /// Create a timeframe from its bucket label.
    #[must_use]
    pub fn new(duration: impl Into<String>) -> Self {
        Self {
            duration: duration.into(),
        }
    }

    /// Intended holding period in days: the upper edge of the bucket.
    #[must_use]
    pub fn holding_days(&self) -> u32 {
        match self.duration.trim() {
            "1-5 days" => 5,
            "5-10 days" => 10,
            "10-20 days" => 20,
            "20-30 days" => 30,
            "30+ days" => 45,
            _ => 20,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::new("10-20 days")
    }
}

/// One and two standard deviation price moves over the timeframe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedMoves {
    /// One standard deviation move (price units).
    pub one_sd_move: Decimal,
    /// Two standard deviation move (price units).
    pub two_sd_move: Decimal,
}

/// Price levels section of the analysis record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevels {
    /// Expected moves.
    #[serde(default)]
    pub expected_moves: ExpectedMoves,
}

/// Implied volatility section of the analysis record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvAnalysis {
    /// IV regime.
    #[serde(default)]
    pub iv_environment: IvEnvironment,
    /// ATM implied volatility (percentage points).
    #[serde(default)]
    pub atm_iv: f64,
    /// IV percentile against history (0-100).
    #[serde(default = "default_iv_percentile")]
    pub iv_percentile: f64,
}

const fn default_iv_percentile() -> f64 {
    50.0
}

impl Default for IvAnalysis {
    fn default() -> Self {
        Self {
            iv_environment: IvEnvironment::default(),
            atm_iv: 0.0,
            iv_percentile: default_iv_percentile(),
        }
    }
}

/// Market analysis for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    /// Directional view.
    pub direction: MarketDirection,
    /// Confidence in the view, 0..=1.
    #[serde(default)]
    pub confidence: f64,
    /// Holding-period bucket.
    #[serde(default)]
    pub timeframe: Timeframe,
    /// Expected moves.
    #[serde(default)]
    pub price_levels: PriceLevels,
    /// IV context.
    #[serde(default)]
    pub iv_analysis: IvAnalysis,
}

impl MarketAnalysis {
    /// Expected moves shortcut.
    #[must_use]
    pub const fn expected_moves(&self) -> &ExpectedMoves {
        &self.price_levels.expected_moves
    }

    /// Whether a usable one-SD move was supplied.
    #[must_use]
    pub fn has_expected_moves(&self) -> bool {
        self.price_levels.expected_moves.one_sd_move > Decimal::ZERO
    }

    /// ATM IV (percentage points).
    #[must_use]
    pub const fn atm_iv(&self) -> f64 {
        self.iv_analysis.atm_iv
    }

    /// IV percentile clamped to 0..=100.
    #[must_use]
    pub fn iv_percentile(&self) -> f64 {
        if self.iv_analysis.iv_percentile.is_finite() {
            self.iv_analysis.iv_percentile.clamp(0.0, 100.0)
        } else {
            default_iv_percentile()
        }
    }
}

/// Capital context for sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountContext {
    /// Capital available to the strategy.
    pub capital: Decimal,
    /// Fraction of capital risked per trade.
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: f64,
}

const fn default_risk_per_trade() -> f64 {
    0.02
}

impl AccountContext {
    /// Account with the default 2% risk per trade.
    #[must_use]
    pub const fn new(capital: Decimal) -> Self {
        Self {
            capital,
            risk_per_trade: default_risk_per_trade(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_analysis_record() {
        let json = r#"{
            "direction": "bullish",
            "confidence": 0.7,
            "timeframe": {"duration": "5-10 days"},
            "price_levels": {"expected_moves": {"one_sd_move": 5, "two_sd_move": 10}},
            "iv_analysis": {"iv_environment": "high", "atm_iv": 24.5, "iv_percentile": 81}
        }"#;
        let analysis: MarketAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.direction, MarketDirection::Bullish);
        assert_eq!(analysis.expected_moves().one_sd_move, dec!(5));
        assert_eq!(analysis.iv_analysis.iv_environment, IvEnvironment::High);
        assert_eq!(analysis.timeframe.holding_days(), 10);
    }

    #[test]
    fn test_missing_sections_default() {
        let analysis: MarketAnalysis = serde_json::from_str(r#"{"direction": "neutral"}"#).unwrap();
        assert!(!analysis.has_expected_moves());
        assert!((analysis.iv_percentile() - 50.0).abs() < f64::EPSILON);
        assert_eq!(analysis.timeframe.duration, "10-20 days");
    }

    #[test]
    fn test_iv_section_without_percentile() {
        let analysis: MarketAnalysis =
            serde_json::from_str(r#"{"direction": "neutral", "iv_analysis": {"atm_iv": 25.0}}"#)
                .unwrap();
        assert!((analysis.iv_percentile() - 50.0).abs() < f64::EPSILON);
        assert!((IvAnalysis::default().iv_percentile - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_timeframe_holding_days() {
        assert_eq!(Timeframe::new("someday").holding_days(), 20);
        assert_eq!(Timeframe::new("30+ days").holding_days(), 45);
    }
}
