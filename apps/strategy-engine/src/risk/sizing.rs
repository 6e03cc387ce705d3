//! Fixed-fractional contract sizing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::adjustments::{SizeAdjustment, apply_adjustments};
use crate::models::{PayoffBound, from_f64};

/// Contracts to trade and how they were derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    /// Contracts from the risk budget, hard limit and contract cap.
    pub contracts: u32,
    /// Contracts after DTE / IV-rank reductions.
    pub adjusted_contracts: u32,
    /// Capital the risk budget allows to lose.
    pub risk_amount: Decimal,
    /// Max loss of one contract, when bounded.
    pub max_loss_per_contract: Option<Decimal>,
    /// Reductions applied to reach `adjusted_contracts`.
    pub adjustments: Vec<SizeAdjustment>,
    /// Why the size is zero, when it is.
    pub reason: Option<String>,
}

impl PositionSize {
    fn zero(risk_amount: Decimal, max_loss: Option<Decimal>, reason: impl Into<String>) -> Self {
        Self {
            contracts: 0,
            adjusted_contracts: 0,
            risk_amount,
            max_loss_per_contract: max_loss,
            adjustments: Vec::new(),
            reason: Some(reason.into()),
        }
    }

    /// Apply size reductions.
    #[must_use]
    pub fn with_adjustments(mut self, adjustments: Vec<SizeAdjustment>) -> Self {
        self.adjusted_contracts = apply_adjustments(self.contracts, &adjustments);
        if self.adjusted_contracts == 0 && self.contracts > 0 {
            self.reason = Some("size reductions leave no contracts".to_string());
        }
        self.adjustments = adjustments;
        self
    }
}

fn whole_contracts(amount: Decimal, per_contract: Decimal) -> u32 {
    (amount / per_contract).floor().to_u32().unwrap_or(u32::MAX)
}

/// `min(floor(account * risk / max_loss), floor(hard_limit / max_loss), max_contracts)`.
///
/// Zero contracts, with a reason, when the loss is unbounded or not positive
/// or when the budget cannot cover one contract.
#[must_use]
pub fn position_size(
    max_loss: PayoffBound,
    account_size: Decimal,
    risk_per_trade: f64,
    hard_limit: Decimal,
    max_contracts: u32,
) -> PositionSize {
    let risk_amount = account_size * from_f64(risk_per_trade);
    let per_contract = match max_loss {
        PayoffBound::Unbounded => {
            return PositionSize::zero(risk_amount, None, "max loss is unbounded");
        }
        PayoffBound::Limited(amount) if amount <= Decimal::ZERO => {
            return PositionSize::zero(risk_amount, Some(amount), "max loss must be positive");
        }
        PayoffBound::Limited(amount) => amount,
    };

    let contracts = whole_contracts(risk_amount, per_contract)
        .min(whole_contracts(hard_limit, per_contract))
        .min(max_contracts);
    if contracts == 0 {
        return PositionSize::zero(
            risk_amount,
            Some(per_contract),
            format!("risk budget {risk_amount} below max loss {per_contract}"),
        );
    }

    PositionSize {
        contracts,
        adjusted_contracts: contracts,
        risk_amount,
        max_loss_per_contract: Some(per_contract),
        adjustments: Vec::new(),
        reason: None,
    }
}
