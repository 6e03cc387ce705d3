//! Option chain snapshot for one underlying and one expiry.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contract::{OptionContract, OptionType};
use crate::error::StrategyError;

/// Ordered collection of contracts for one symbol, spot and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChainSnapshot {
    /// Underlying symbol.
    pub symbol: String,
    /// Underlying spot price at snapshot time.
    pub spot_price: Decimal,
    /// Expiry of every contract in the snapshot.
    pub expiry: NaiveDate,
    /// Trading date the snapshot was taken on.
    pub as_of: NaiveDate,
    /// Contract lot size (shares per contract).
    pub lot_size: u32,
    /// Contracts, one per (strike, option_type).
    pub contracts: Vec<OptionContract>,
}

impl OptionChainSnapshot {
    /// Check the snapshot invariants.
    ///
    /// # Errors
    ///
    /// Returns `InvalidChain` on a non-positive spot, zero lot size, an expiry
    /// before the snapshot date, or a duplicate (strike, option_type) row.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.spot_price <= Decimal::ZERO {
            return Err(StrategyError::InvalidChain {
                message: format!("{}: spot price must be positive", self.symbol),
            });
        }
        if self.lot_size == 0 {
            return Err(StrategyError::InvalidChain {
                message: format!("{}: lot size must be positive", self.symbol),
            });
        }
        if self.expiry < self.as_of {
            return Err(StrategyError::InvalidChain {
                message: format!("{}: expiry {} precedes {}", self.symbol, self.expiry, self.as_of),
            });
        }

        let mut seen = HashSet::with_capacity(self.contracts.len());
        for contract in &self.contracts {
            if !seen.insert((contract.strike.normalize(), contract.option_type)) {
                return Err(StrategyError::InvalidChain {
                    message: format!(
                        "{}: duplicate {} at strike {}",
                        self.symbol, contract.option_type, contract.strike
                    ),
                });
            }
        }
        Ok(())
    }

    /// Calendar days until expiry.
    #[must_use]
    pub fn days_to_expiry(&self) -> u32 {
        u32::try_from((self.expiry - self.as_of).num_days()).unwrap_or(0)
    }

    /// Contracts of one type, in chain order.
    pub fn contracts_of(&self, option_type: OptionType) -> impl Iterator<Item = &OptionContract> {
        self.contracts
            .iter()
            .filter(move |c| c.option_type == option_type)
    }

    /// Look up a contract by strike and type.
    #[must_use]
    pub fn find(&self, strike: Decimal, option_type: OptionType) -> Option<&OptionContract> {
        self.contracts_of(option_type).find(|c| c.strike == strike)
    }

    /// Sorted, de-duplicated strikes of one type.
    #[must_use]
    pub fn strikes(&self, option_type: OptionType) -> Vec<Decimal> {
        let mut strikes: Vec<Decimal> = self.contracts_of(option_type).map(|c| c.strike).collect();
        strikes.sort();
        strikes.dedup();
        strikes
    }

    /// ATM implied volatility read from the chain itself: the mean IV of the
    /// call and put at the strike nearest spot.
    #[must_use]
    pub fn atm_iv(&self) -> Option<f64> {
        let strike = self
            .contracts
            .iter()
            .min_by_key(|c| (c.strike - self.spot_price).abs())?
            .strike;
        let ivs: Vec<f64> = self
            .contracts
            .iter()
            .filter(|c| c.strike == strike)
            .filter_map(|c| c.implied_volatility)
            .collect();
        if ivs.is_empty() {
            None
        } else {
            Some(ivs.iter().sum::<f64>() / ivs.len() as f64)
        }
    }
}
