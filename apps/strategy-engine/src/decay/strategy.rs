//! Net theta across the legs of a position.

use serde::{Deserialize, Serialize};

use super::curve::{ThetaDecayProfile, decay_curve};
use crate::models::{PositionSide, StrategyLeg, to_f64};

/// Whether time decay works for or against the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThetaClassification {
    /// The position collects decay.
    Positive,
    /// The position pays decay.
    Negative,
}

/// Decay analysis for a whole position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyThetaAnalysis {
    /// Collects or pays decay.
    pub classification: ThetaClassification,
    /// Net per-share decay over the holding period (positive = collected).
    pub net_decay: f64,
    /// Net decay as a percentage of the premium exchanged.
    pub decay_percentage: f64,
    /// Holding period analysed.
    pub holding_days: u32,
    /// Desirability of the decay profile in `[0, 1]`.
    pub theta_score: f64,
    /// Per-leg projections, in leg order.
    pub legs: Vec<ThetaDecayProfile>,
}

/// Project and net decay across legs.
///
/// Short legs contribute decay positively, long legs negatively. Each leg is
/// scaled by quantity and by its premium relative to the mean premium per
/// contract, so richer legs weigh more. Equal premiums reduce to plain
/// quantity netting.
#[must_use]
pub fn strategy_theta(legs: &[StrategyLeg], holding_days: u32, spot: f64) -> StrategyThetaAnalysis {
    let total_contracts: f64 = legs.iter().map(|leg| f64::from(leg.quantity)).sum();
    let total_premium: f64 = legs
        .iter()
        .map(|leg| f64::from(leg.quantity) * to_f64(leg.premium))
        .sum();
    let mean_premium = if total_contracts > 0.0 {
        total_premium / total_contracts
    } else {
        0.0
    };

    let mut net_decay = 0.0;
    let mut premium_exchanged = 0.0;
    let mut profiles = Vec::with_capacity(legs.len());

    for leg in legs {
        let premium = to_f64(leg.premium);
        let profile = decay_curve(
            leg.greeks.theta,
            premium,
            leg.days_to_expiry,
            holding_days,
            spot,
        );
        let quantity = f64::from(leg.quantity);
        let sign = match leg.position {
            PositionSide::Short => 1.0,
            PositionSide::Long => -1.0,
        };
        let weight = if mean_premium > 0.0 {
            premium / mean_premium
        } else {
            1.0
        };
        net_decay += sign * quantity * weight * profile.total_decay;
        premium_exchanged += sign * quantity * premium;
        profiles.push(profile);
    }

    let premium_exchanged = premium_exchanged.abs();
    let decay_percentage = if premium_exchanged > 0.0 {
        net_decay.abs() / premium_exchanged * 100.0
    } else {
        0.0
    };

    let classification = if net_decay > 0.0 {
        ThetaClassification::Positive
    } else {
        ThetaClassification::Negative
    };

    let theta_score = match classification {
        ThetaClassification::Positive => {
            let bonus: f64 = match holding_days {
                0..=7 => 0.15,
                8..=14 => 0.1,
                _ => 0.0,
            };
            (0.8 + bonus).min(1.0)
        }
        ThetaClassification::Negative => 0.5 * (1.0 - (decay_percentage / 100.0).min(1.0)),
    };

    StrategyThetaAnalysis {
        classification,
        net_decay,
        decay_percentage,
        holding_days,
        theta_score,
        legs: profiles,
    }
}
