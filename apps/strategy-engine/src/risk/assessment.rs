//! Additive risk scoring of a constructed position.

use serde::{Deserialize, Serialize};

use crate::models::StrategyResult;

const LOW_MAX: f64 = 0.2;
const MODERATE_MAX: f64 = 0.5;
const HIGH_MAX: f64 = 0.8;
const EPS: f64 = 1e-9;

/// Overall risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskRating {
    /// Score up to 0.2.
    Low,
    /// Score up to 0.5.
    Moderate,
    /// Score up to 0.8.
    High,
    /// Score above 0.8.
    Extreme,
}

impl RiskRating {
    /// Band for a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= LOW_MAX + EPS {
            Self::Low
        } else if score <= MODERATE_MAX + EPS {
            Self::Moderate
        } else if score <= HIGH_MAX + EPS {
            Self::High
        } else {
            Self::Extreme
        }
    }

    /// Recommended action for the band.
    #[must_use]
    pub const fn action(&self) -> RiskAction {
        match self {
            Self::Low => RiskAction::Proceed,
            Self::Moderate => RiskAction::ProceedWithCaution,
            Self::High => RiskAction::ReduceSize,
            Self::Extreme => RiskAction::Avoid,
        }
    }
}

/// What to do with the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskAction {
    /// Trade as constructed.
    Proceed,
    /// Trade, with closer monitoring.
    ProceedWithCaution,
    /// Trade smaller.
    ReduceSize,
    /// Do not trade.
    Avoid,
}

/// One contribution to the risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Short identifier.
    pub name: String,
    /// Score contribution.
    pub weight: f64,
    /// Observed value behind it.
    pub detail: String,
}

/// Risk verdict for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Sum of factor weights.
    pub score: f64,
    /// Band of the score.
    pub rating: RiskRating,
    /// Recommended action.
    pub action: RiskAction,
    /// Factors that contributed.
    pub factors: Vec<RiskFactor>,
}

/// Score a position.
///
/// | factor | weight |
/// |---|---|
/// | PoP < 0.5 (else < 0.6) | 0.3 (0.1) |
/// | abs(net delta per unit) > 0.5 | 0.2 |
/// | reward/risk < 0.3 | 0.2 |
/// | lowest leg liquidity < threshold | 0.3 |
#[must_use]
pub fn assess(result: &StrategyResult, liquidity_threshold: f64) -> RiskAssessment {
    let mut factors = Vec::new();
    let mut add = |name: &str, weight: f64, detail: String| {
        factors.push(RiskFactor {
            name: name.to_string(),
            weight,
            detail,
        });
    };

    let pop = result.probability_of_profit;
    if pop < 0.5 {
        add("low_probability", 0.3, format!("PoP {pop:.2}"));
    } else if pop < 0.6 {
        add("modest_probability", 0.1, format!("PoP {pop:.2}"));
    }

    let delta = result.net_delta_per_unit();
    if delta.abs() > 0.5 {
        add("directional_exposure", 0.2, format!("net delta {delta:.2}"));
    }

    let reward_risk = result.reward_risk_ratio();
    if reward_risk < 0.3 {
        add("poor_reward_risk", 0.2, format!("reward/risk {reward_risk:.2}"));
    }

    let liquidity = result.min_leg_liquidity();
    if liquidity < liquidity_threshold {
        add("illiquid_leg", 0.3, format!("liquidity {liquidity:.2}"));
    }

    let score: f64 = factors.iter().map(|f| f.weight).sum();
    let rating = RiskRating::from_score(score);
    RiskAssessment {
        score,
        rating,
        action: rating.action(),
        factors,
    }
}
