//! Size reductions for near-dated or cheap-volatility positions.
//!
//! - DTE < 7: x0.5 (gamma and theta dominate)
//! - DTE < 30: x0.75 (elevated time decay)
//! - IV rank < 0.25: x0.75 (poor premium)
//!
//! Reductions compound, flooring after each step.

use serde::{Deserialize, Serialize};

/// One applied reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeAdjustment {
    /// Multiplier applied to the contract count.
    pub factor: f64,
    /// Why it applied.
    pub reason: String,
}

/// Reduction for days to expiry, if any.
#[must_use]
pub fn dte_adjustment(dte: u32) -> Option<SizeAdjustment> {
    let factor = match dte {
        0..=6 => 0.5,
        7..=29 => 0.75,
        _ => return None,
    };
    Some(SizeAdjustment {
        factor,
        reason: format!("{dte} DTE"),
    })
}

/// Reduction for IV rank in `[0, 1]`, if any.
#[must_use]
pub fn iv_adjustment(iv_rank: f64) -> Option<SizeAdjustment> {
    (iv_rank < 0.25).then(|| SizeAdjustment {
        factor: 0.75,
        reason: format!("IV rank {iv_rank:.2} below 0.25"),
    })
}

/// Apply reductions in order.
#[must_use]
pub fn apply_adjustments(contracts: u32, adjustments: &[SizeAdjustment]) -> u32 {
    adjustments.iter().fold(contracts, |size, adjustment| {
        (f64::from(size) * adjustment.factor).floor() as u32
    })
}

/// DTE then IV-rank reductions for a position.
#[must_use]
pub fn sizing_adjustments(dte: u32, iv_rank: f64) -> Vec<SizeAdjustment> {
    dte_adjustment(dte)
        .into_iter()
        .chain(iv_adjustment(iv_rank))
        .collect()
}
