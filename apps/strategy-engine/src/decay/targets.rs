//! Profit targets adjusted for time decay.

use serde::{Deserialize, Serialize};

use super::strategy::{StrategyThetaAnalysis, ThetaClassification};

const MIN_TARGET: f64 = 0.1;
const MAX_DECAY_REDUCTION: f64 = 0.15;
const MAX_DECAY_HURDLE: f64 = 0.5;

/// Target to reach by a given day of the holding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCheckpoint {
    /// Day of the holding period.
    pub day: u32,
    /// Share of the holding period elapsed.
    pub elapsed_pct: f64,
    /// Profit target (fraction of max profit) by that day.
    pub target_pct: f64,
}

/// Decay-adjusted profit targets, as fractions of max profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayAdjustedTargets {
    /// Target before adjustment.
    pub base_target_pct: f64,
    /// Target after adjustment.
    pub primary_target_pct: f64,
    /// Scaling tiers at 50/75/100% of the primary target.
    pub tiers: Vec<f64>,
    /// Checkpoints at 25/50/75/100% of the holding period.
    pub checkpoints: Vec<TargetCheckpoint>,
}

/// Adjust a base profit target for the position's decay profile.
///
/// Positions collecting decay take profit earlier: the target drops by
/// `min(0.15, decay% * 0.25)`, never below 0.1. Positions paying decay must
/// clear a higher hurdle: the target rises by `min(0.5, decay%)`.
#[must_use]
pub fn adjusted_targets(
    analysis: &StrategyThetaAnalysis,
    base_target: f64,
    holding_days: u32,
) -> DecayAdjustedTargets {
    let decay_fraction = analysis.decay_percentage / 100.0;
    let primary = match analysis.classification {
        ThetaClassification::Positive => {
            (base_target - (decay_fraction * 0.25).min(MAX_DECAY_REDUCTION)).max(MIN_TARGET)
        }
        ThetaClassification::Negative => base_target + decay_fraction.min(MAX_DECAY_HURDLE),
    };

    let tiers = [0.5, 0.75, 1.0].iter().map(|f| primary * f).collect();

    let holding = holding_days.max(1);
    let checkpoints = [0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|&elapsed| TargetCheckpoint {
            day: ((f64::from(holding) * elapsed).ceil() as u32).max(1),
            elapsed_pct: elapsed,
            target_pct: primary * elapsed,
        })
        .collect();

    DecayAdjustedTargets {
        base_target_pct: base_target,
        primary_target_pct: primary,
        tiers,
        checkpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(classification: ThetaClassification, decay_percentage: f64) -> StrategyThetaAnalysis {
        StrategyThetaAnalysis {
            classification,
            net_decay: 1.0,
            decay_percentage,
            holding_days: 20,
            theta_score: 0.8,
            legs: Vec::new(),
        }
    }

    #[test]
    fn test_positive_lowers_target() {
        let targets = adjusted_targets(&analysis(ThetaClassification::Positive, 40.0), 0.5, 20);
        assert!((targets.primary_target_pct - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_positive_reduction_capped_and_floored() {
        let targets = adjusted_targets(&analysis(ThetaClassification::Positive, 200.0), 0.5, 20);
        assert!((targets.primary_target_pct - 0.35).abs() < 1e-10);
        let targets = adjusted_targets(&analysis(ThetaClassification::Positive, 200.0), 0.2, 20);
        assert!((targets.primary_target_pct - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_negative_raises_hurdle() {
        let targets = adjusted_targets(&analysis(ThetaClassification::Negative, 30.0), 0.5, 20);
        assert!((targets.primary_target_pct - 0.8).abs() < 1e-10);
        let targets = adjusted_targets(&analysis(ThetaClassification::Negative, 90.0), 0.5, 20);
        assert!((targets.primary_target_pct - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_checkpoints_monotonic() {
        let targets = adjusted_targets(&analysis(ThetaClassification::Positive, 10.0), 0.5, 10);
        let days: Vec<u32> = targets.checkpoints.iter().map(|c| c.day).collect();
        assert_eq!(days, vec![3, 5, 8, 10]);
        assert!(
            targets
                .checkpoints
                .windows(2)
                .all(|w| w[0].target_pct <= w[1].target_pct)
        );
        assert_eq!(targets.tiers.len(), 3);
    }
}
