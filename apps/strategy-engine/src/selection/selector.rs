//! Strike selection balancing proximity to a target price and liquidity.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::bands::MoneynessBand;
use super::targets::spread_targets;
use crate::config::{LiquidityConfig, SelectionConfig};
use crate::error::StrategyError;
use crate::liquidity::LiquidityScorer;
use crate::models::{MarketAnalysis, OptionChainSnapshot, OptionContract, OptionType, to_f64};
use crate::observability::record_strike_fallback;
use crate::strategies::StrategyKind;

/// Direction to search for a neighbouring strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeDirection {
    /// Next listed strike above.
    Above,
    /// Next listed strike below.
    Below,
}

impl std::fmt::Display for StrikeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Above => f.write_str("above"),
            Self::Below => f.write_str("below"),
        }
    }
}

/// Selected contracts for a vertical spread.
#[derive(Debug, Clone, Copy)]
pub struct SpreadLegs<'a> {
    /// Contract bought.
    pub long: &'a OptionContract,
    /// Contract sold.
    pub short: &'a OptionContract,
}

/// Finds real strikes for target prices.
#[derive(Debug, Clone, Default)]
pub struct StrikeSelector {
    config: SelectionConfig,
    scorer: LiquidityScorer,
}

impl StrikeSelector {
    /// Create a selector.
    #[must_use]
    pub const fn new(config: SelectionConfig, liquidity: LiquidityConfig) -> Self {
        Self {
            config,
            scorer: LiquidityScorer::new(liquidity),
        }
    }

    /// Liquidity scorer used for candidate ranking.
    #[must_use]
    pub const fn scorer(&self) -> &LiquidityScorer {
        &self.scorer
    }

    /// Liquidity score of a contract.
    #[must_use]
    pub fn liquidity(&self, contract: &OptionContract) -> f64 {
        self.scorer.score(contract)
    }

    /// Expected-move unit `m = one_sd_move * timeframe_multiplier`.
    #[must_use]
    pub fn move_unit(&self, analysis: &MarketAnalysis) -> Decimal {
        analysis.expected_moves().one_sd_move
            * self.config.timeframe_multiplier(&analysis.timeframe.duration)
    }

    fn is_liquid(&self, contract: &OptionContract) -> bool {
        contract.open_interest >= self.config.min_open_interest
            && contract.volume >= self.config.min_volume
    }

    /// Best strike of `option_type` for `target`.
    ///
    /// Candidates must pass the open-interest/volume filter; when none do, the
    /// filter is relaxed to every contract of the type (or the call fails with
    /// `NoLiquidStrikes` if relaxing is disabled).
    pub fn select<'a>(
        &self,
        target: Decimal,
        option_type: OptionType,
        chain: &'a OptionChainSnapshot,
    ) -> Result<&'a OptionContract, StrategyError> {
        let all: Vec<&OptionContract> = chain.contracts_of(option_type).collect();
        if all.is_empty() {
            return Err(StrategyError::NoStrikesAvailable { option_type });
        }

        let liquid: Vec<&OptionContract> =
            all.iter().copied().filter(|c| self.is_liquid(c)).collect();
        let candidates = if liquid.is_empty() {
            if self.config.require_liquid_strikes {
                return Err(StrategyError::NoLiquidStrikes { option_type });
            }
            warn!(
                symbol = %chain.symbol,
                %option_type,
                %target,
                "No liquid strikes, relaxing liquidity filter"
            );
            record_strike_fallback("illiquid");
            all
        } else {
            liquid
        };

        let selected = self
            .best_scored(target, &candidates)
            .ok_or(StrategyError::NoStrikesAvailable { option_type })?;

        debug!(
            symbol = %chain.symbol,
            %option_type,
            %target,
            strike = %selected.strike,
            candidates = candidates.len(),
            "Selected strike"
        );
        Ok(selected)
    }

    fn best_scored<'a>(
        &self,
        target: Decimal,
        candidates: &[&'a OptionContract],
    ) -> Option<&'a OptionContract> {
        let max_distance = candidates
            .iter()
            .map(|c| (c.strike - target).abs())
            .max()
            .map_or(0.0, to_f64);

        let mut best: Option<(f64, Decimal, &OptionContract)> = None;
        for contract in candidates {
            let distance = (contract.strike - target).abs();
            let proximity = if max_distance > 0.0 {
                1.0 - to_f64(distance) / max_distance
            } else {
                1.0
            };
            let score = self.config.proximity_weight * proximity
                + self.config.liquidity_weight * self.scorer.score(contract);

            let better = match best {
                None => true,
                Some((best_score, best_distance, best_contract)) => {
                    score > best_score + f64::EPSILON
                        || ((score - best_score).abs() <= f64::EPSILON
                            && (distance < best_distance
                                || (distance == best_distance
                                    && contract.strike < best_contract.strike)))
                }
            };
            if better {
                best = Some((score, distance, contract));
            }
        }
        best.map(|(_, _, contract)| contract)
    }

    /// Select a strike and enforce a moneyness band.
    ///
    /// Outside the band, falls back to the strike nearest `target` inside the
    /// band, else the strike nearest spot, ignoring liquidity.
    pub fn select_validated<'a>(
        &self,
        target: Decimal,
        option_type: OptionType,
        band: MoneynessBand,
        chain: &'a OptionChainSnapshot,
    ) -> Result<&'a OptionContract, StrategyError> {
        let spot = chain.spot_price;
        let selected = self.select(target, option_type, chain)?;
        if band.contains(selected.moneyness(spot)) {
            return Ok(selected);
        }

        let fallback = chain
            .contracts_of(option_type)
            .filter(|c| band.contains(c.moneyness(spot)))
            .min_by_key(|c| ((c.strike - target).abs(), c.strike))
            .or_else(|| {
                chain
                    .contracts_of(option_type)
                    .min_by_key(|c| ((c.strike - spot).abs(), c.strike))
            })
            .ok_or(StrategyError::NoStrikesAvailable { option_type })?;

        warn!(
            symbol = %chain.symbol,
            %option_type,
            rejected = %selected.strike,
            fallback = %fallback.strike,
            "Selected strike outside moneyness band, using fallback"
        );
        record_strike_fallback("moneyness_band");
        Ok(fallback)
    }

    /// Long and short contracts for a vertical spread.
    ///
    /// Legs that collapse onto one strike are separated by moving the leg
    /// that should sit further out to the adjacent listed strike.
    pub fn select_spread<'a>(
        &self,
        kind: StrategyKind,
        chain: &'a OptionChainSnapshot,
        analysis: &MarketAnalysis,
    ) -> Result<SpreadLegs<'a>, StrategyError> {
        let targets = spread_targets(kind, chain.spot_price, self.move_unit(analysis))
            .ok_or_else(|| {
                StrategyError::insufficient(format!("{kind} is not a vertical spread"))
            })?;
        let option_type = match kind {
            StrategyKind::BullCallSpread | StrategyKind::BearCallSpread => OptionType::Call,
            _ => OptionType::Put,
        };

        let mut long =
            self.select_validated(targets.long, option_type, MoneynessBand::SPREAD, chain)?;
        let mut short =
            self.select_validated(targets.short, option_type, MoneynessBand::SPREAD, chain)?;

        if long.strike == short.strike {
            let collapsed = long.strike;
            match kind {
                StrategyKind::BullCallSpread => {
                    short = adjacent_or_fail(chain, option_type, collapsed, StrikeDirection::Above)?;
                }
                StrategyKind::BearPutSpread => {
                    short = adjacent_or_fail(chain, option_type, collapsed, StrikeDirection::Below)?;
                }
                StrategyKind::BullPutSpread => {
                    long = adjacent_or_fail(chain, option_type, collapsed, StrikeDirection::Below)?;
                }
                _ => {
                    long = adjacent_or_fail(chain, option_type, collapsed, StrikeDirection::Above)?;
                }
            }
            debug!(
                symbol = %chain.symbol,
                strategy = %kind,
                %collapsed,
                long = %long.strike,
                short = %short.strike,
                "Separated collapsed spread legs"
            );
        }

        Ok(SpreadLegs { long, short })
    }
}

pub(crate) fn adjacent_or_fail(
    chain: &OptionChainSnapshot,
    option_type: OptionType,
    strike: Decimal,
    direction: StrikeDirection,
) -> Result<&OptionContract, StrategyError> {
    adjacent_strike(chain, option_type, strike, direction).ok_or_else(|| {
        StrategyError::ordering(format!(
            "no {option_type} strike listed {direction} {strike}"
        ))
    })
}

/// Next listed contract above or below `strike`.
#[must_use]
pub fn adjacent_strike(
    chain: &OptionChainSnapshot,
    option_type: OptionType,
    strike: Decimal,
    direction: StrikeDirection,
) -> Option<&OptionContract> {
    let contracts = chain.contracts_of(option_type);
    match direction {
        StrikeDirection::Above => contracts
            .filter(|c| c.strike > strike)
            .min_by_key(|c| c.strike),
        StrikeDirection::Below => contracts
            .filter(|c| c.strike < strike)
            .max_by_key(|c| c.strike),
    }
}

/// Strike nearest spot listed for both calls and puts.
#[must_use]
pub fn atm_strike(chain: &OptionChainSnapshot) -> Option<Decimal> {
    let puts = chain.strikes(OptionType::Put);
    chain
        .strikes(OptionType::Call)
        .into_iter()
        .filter(|strike| puts.binary_search(strike).is_ok())
        .min_by_key(|strike| ((*strike - chain.spot_price).abs(), *strike))
}

/// Contract of `option_type` nearest `target`, ignoring liquidity.
#[must_use]
pub fn nearest_contract(
    chain: &OptionChainSnapshot,
    option_type: OptionType,
    target: Decimal,
) -> Option<&OptionContract> {
    chain
        .contracts_of(option_type)
        .min_by_key(|c| ((c.strike - target).abs(), c.strike))
}
