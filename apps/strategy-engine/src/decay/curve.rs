//! Theta decay projection for a single option.

use serde::{Deserialize, Serialize};

/// Acceleration multiplier once less than this share of the original DTE remains.
const LATE_STAGE_FRACTION: f64 = 0.3;
const LATE_STAGE_MULTIPLIER: f64 = 1.5;

/// One simulated day of decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayPoint {
    /// Day index, starting at 1.
    pub day: u32,
    /// Days to expiry at the start of the day.
    pub days_to_expiry: u32,
    /// Theta for the day after acceleration (signed as quoted).
    pub daily_theta: f64,
    /// Accumulated absolute decay.
    pub cumulative_decay: f64,
}

/// Projected decay over a holding period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThetaDecayProfile {
    /// One point per simulated day.
    pub curve: Vec<DecayPoint>,
    /// Sum of absolute daily decay.
    pub total_decay: f64,
    /// Decay as a percentage of premium.
    pub decay_percentage: f64,
    /// Decay per unit of spot.
    pub decay_per_spot: f64,
    /// Spot move (percent) needed to offset the decay.
    pub required_move_percent: f64,
    /// Days to expiry left after the holding period.
    pub final_days_to_expiry: u32,
    /// Risk from decay in `[0, 1]`.
    pub theta_risk_score: f64,
}

/// Project theta decay day by day.
///
/// Decay accelerates with `sqrt(dte / current_dte)` and by a further 1.5x in
/// the last 30% of the option's life. Simulation stops at expiry.
#[must_use]
pub fn decay_curve(theta: f64, premium: f64, dte: u32, holding_days: u32, spot: f64) -> ThetaDecayProfile {
    let theta = if theta.is_finite() { theta } else { 0.0 };
    let late_stage = f64::from(dte) * LATE_STAGE_FRACTION;

    let mut curve = Vec::with_capacity(holding_days.min(dte) as usize);
    let mut total_decay = 0.0;
    let mut current_dte = dte;

    for day in 0..holding_days {
        if current_dte == 0 {
            break;
        }
        let mut acceleration = (f64::from(dte) / f64::from(current_dte)).sqrt();
        if f64::from(current_dte) <= late_stage {
            acceleration *= LATE_STAGE_MULTIPLIER;
        }
        let daily_theta = theta * acceleration;
        total_decay += daily_theta.abs();

        curve.push(DecayPoint {
            day: day + 1,
            days_to_expiry: current_dte,
            daily_theta,
            cumulative_decay: total_decay,
        });
        current_dte -= 1;
    }

    let decay_percentage = if premium > 0.0 {
        total_decay / premium * 100.0
    } else {
        0.0
    };
    let (decay_per_spot, required_move_percent) = if spot > 0.0 {
        (total_decay / spot, total_decay / spot * 100.0)
    } else {
        (0.0, 0.0)
    };
    let theta_risk_score = ((decay_percentage / 100.0).min(0.5)
        + (0.5 - f64::from(current_dte) / 60.0).max(0.0))
    .clamp(0.0, 1.0);

    ThetaDecayProfile {
        curve,
        total_decay,
        decay_percentage,
        decay_per_spot,
        required_move_percent,
        final_days_to_expiry: current_dte,
        theta_risk_score,
    }
}
