//! Exit plan generation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::category::{ExitParams, StrategyCategory};
use super::conditions::{
    AdjustmentKind, AdjustmentTrigger, ExitConditionSet, Greek, GreekTrigger, MonitoringFrequency,
    MonitoringPlan, ProfitTarget, ProfitTargets, StopKind, StopLoss, TimeExit, TimeTrigger,
    TrailingRule,
};
use crate::config::ExitsConfig;
use crate::models::{MarketAnalysis, PayoffBound, StrategyResult, from_f64};
use crate::strategies::{MarketBias, StrategyKind, payoff_at};

const SCALING_LEVELS: [f64; 3] = [0.25, 0.50, 0.75];
const CHECKPOINTS: [f64; 3] = [0.25, 0.50, 0.75];
const TRAIL_ACTIVATION: Decimal = dec!(0.5);
const TRAIL_GIVEBACK: f64 = 0.25;
const UNBOUNDED_LOSS_MULTIPLE: Decimal = dec!(2);

/// Builds exit plans from per-category parameters.
#[derive(Debug, Clone, Default)]
pub struct ExitManager {
    config: ExitsConfig,
}

impl ExitManager {
    /// Create a manager.
    #[must_use]
    pub const fn new(config: ExitsConfig) -> Self {
        Self { config }
    }

    /// Parameters for a strategy.
    #[must_use]
    pub const fn params(&self, kind: StrategyKind) -> &ExitParams {
        self.config.params(kind.category())
    }

    /// Full exit plan for a constructed position.
    ///
    /// With expected moves available, single-leg directional positions measure
    /// their targets against the profit of a one-SD move when that is below
    /// the theoretical maximum.
    #[must_use]
    pub fn generate(
        &self,
        kind: StrategyKind,
        result: &StrategyResult,
        analysis: Option<&MarketAnalysis>,
    ) -> ExitConditionSet {
        let category = kind.category();
        let params = *self.params(kind);

        let profit_targets = profit_targets(kind, result, analysis, &params);
        debug!(
            strategy = %kind,
            %category,
            basis = %profit_targets.profit_basis,
            realistic = profit_targets.realistic,
            "Generated exit plan"
        );

        ExitConditionSet {
            strategy: kind,
            category,
            params,
            profit_targets,
            stop_losses: stop_losses(result, &params),
            time_exits: time_exits(category, result, &params),
            greek_triggers: greek_triggers(category, result, &params),
            adjustment_triggers: adjustment_playbook(kind),
            monitoring: monitoring_plan(category, result, &params),
        }
    }
}

/// Profit of a one-SD move in the strategy's favoured direction.
fn realistic_profit(
    kind: StrategyKind,
    result: &StrategyResult,
    analysis: &MarketAnalysis,
) -> Option<Decimal> {
    if !kind.is_single_leg_directional() || !analysis.has_expected_moves() {
        return None;
    }
    let one_sd = analysis.expected_moves().one_sd_move;
    let price = match kind.profile().bias {
        MarketBias::Bullish => result.spot_price + one_sd,
        MarketBias::Bearish => (result.spot_price - one_sd).max(Decimal::ZERO),
        MarketBias::Neutral => return None,
    };
    let scale = Decimal::from(result.position_details.lot_size)
        * Decimal::from(result.position_details.units);
    let profit = payoff_at(&result.legs, price) * scale;
    let below_max = match result.max_profit {
        PayoffBound::Unbounded => true,
        PayoffBound::Limited(max) => profit < max,
    };
    (profit > Decimal::ZERO && below_max).then_some(profit)
}

fn profit_targets(
    kind: StrategyKind,
    result: &StrategyResult,
    analysis: Option<&MarketAnalysis>,
    params: &ExitParams,
) -> ProfitTargets {
    let realistic = analysis.and_then(|a| realistic_profit(kind, result, a));

    let (basis, primary_pct, description) = match (realistic, result.max_profit) {
        (Some(profit), _) => (
            profit,
            params.profit_target_pct,
            format!(
                "Take {:.0}% of the one-SD move profit",
                params.profit_target_pct * 100.0
            ),
        ),
        (None, PayoffBound::Limited(max)) => (
            max,
            params.profit_target_pct,
            format!("Take {:.0}% of max profit", params.profit_target_pct * 100.0),
        ),
        (None, PayoffBound::Unbounded) => (
            result.premium_amount(),
            1.0,
            "Take profit at a 100% return on premium".to_string(),
        ),
    };

    let primary = ProfitTarget {
        target_pct: primary_pct,
        target_amount: basis * from_f64(primary_pct),
        close_fraction: 1.0,
        description,
    };
    let scaling = SCALING_LEVELS
        .iter()
        .map(|&level| ProfitTarget {
            target_pct: level,
            target_amount: basis * from_f64(level),
            close_fraction: 1.0 / 3.0,
            description: format!("Close a third at {:.0}% of the profit basis", level * 100.0),
        })
        .collect();

    ProfitTargets {
        profit_basis: basis,
        realistic: realistic.is_some(),
        primary,
        scaling,
        trailing: TrailingRule {
            activation_amount: basis * TRAIL_ACTIVATION,
            giveback_pct: TRAIL_GIVEBACK,
        },
    }
}

fn stop_losses(result: &StrategyResult, params: &ExitParams) -> Vec<StopLoss> {
    match result.max_loss {
        PayoffBound::Limited(max_loss) => vec![StopLoss {
            kind: StopKind::MaxLossPercent,
            level: max_loss * from_f64(params.stop_loss_pct),
            description: format!("Close at {:.0}% of max loss", params.stop_loss_pct * 100.0),
        }],
        PayoffBound::Unbounded => {
            let premium = result.premium_amount();
            let mut stops = vec![if result.is_credit() {
                StopLoss {
                    kind: StopKind::CreditMultiple,
                    level: premium * UNBOUNDED_LOSS_MULTIPLE,
                    description: "Close if the loss reaches 2x the credit received".to_string(),
                }
            } else {
                StopLoss {
                    kind: StopKind::DebitMultiple,
                    level: premium * UNBOUNDED_LOSS_MULTIPLE,
                    description: "Close if the loss reaches 2x the debit paid".to_string(),
                }
            }];
            stops.extend(result.breakevens.iter().map(|&breakeven| StopLoss {
                kind: StopKind::UnderlyingPrice,
                level: breakeven,
                description: format!("Close if the underlying crosses {breakeven}"),
            }));
            stops
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn time_exits(
    category: StrategyCategory,
    result: &StrategyResult,
    params: &ExitParams,
) -> Vec<TimeExit> {
    let action = match category {
        StrategyCategory::Directional => "Close the remaining position ahead of expiry gamma",
        StrategyCategory::Neutral => "Close or roll the structure",
        StrategyCategory::Volatility => "Close before decay accelerates",
        StrategyCategory::Income => "Roll out or accept assignment",
        StrategyCategory::Advanced => "Close or roll the short leg",
    };
    let mut exits = vec![TimeExit {
        trigger: TimeTrigger::DaysToExpiry {
            days: params.time_exit_dte,
        },
        action: action.to_string(),
    }];

    let dte = f64::from(result.days_to_expiry.max(1));
    exits.extend(CHECKPOINTS.iter().map(|&pct| TimeExit {
        trigger: TimeTrigger::Elapsed {
            pct,
            day: ((dte * pct).ceil() as u32).max(1),
        },
        action: format!(
            "Review: expect at least {:.0}% of the profit target",
            pct * 100.0
        ),
    }));
    exits
}

fn greek_triggers(
    category: StrategyCategory,
    result: &StrategyResult,
    params: &ExitParams,
) -> Vec<GreekTrigger> {
    let units = f64::from(result.position_details.units.max(1));
    let greeks = result.net_greeks.scale(1.0 / units);
    let trigger = |greek: Greek, threshold: f64, at_entry: f64, action: &str| GreekTrigger {
        greek,
        threshold,
        at_entry,
        action: action.to_string(),
    };

    let delta = trigger(
        Greek::Delta,
        params.delta_threshold,
        greeks.delta,
        "Rebalance or close when position delta exceeds the threshold",
    );
    let vega = trigger(
        Greek::Vega,
        params.vega_threshold,
        greeks.vega,
        "Review when vega exposure exceeds the threshold",
    );

    match category {
        StrategyCategory::Directional => vec![
            delta,
            trigger(
                Greek::Theta,
                greeks.theta.abs() * 2.0,
                greeks.theta,
                "Exit if daily decay doubles without price progress",
            ),
        ],
        StrategyCategory::Neutral => vec![
            delta,
            trigger(
                Greek::Gamma,
                greeks.gamma.abs() * 2.0,
                greeks.gamma,
                "Reduce size when gamma doubles near expiry",
            ),
            vega,
        ],
        StrategyCategory::Volatility => vec![
            delta,
            vega,
            trigger(
                Greek::Theta,
                greeks.theta.abs() * 1.5,
                greeks.theta,
                "Review when decay runs 50% above entry",
            ),
        ],
        StrategyCategory::Income => vec![trigger(
            Greek::Delta,
            params.assignment_threshold,
            greeks.delta,
            "Roll when the short option delta signals likely assignment",
        )],
        StrategyCategory::Advanced => vec![delta, vega],
    }
}

fn adjustment(kind: AdjustmentKind, condition: &str, action: &str) -> AdjustmentTrigger {
    AdjustmentTrigger {
        kind,
        condition: condition.to_string(),
        action: action.to_string(),
    }
}

/// Playbook per strategy.
fn adjustment_playbook(kind: StrategyKind) -> Vec<AdjustmentTrigger> {
    use AdjustmentKind::{Defensive, Morphing, Offensive, Rolling};

    match kind {
        StrategyKind::IronCondor => vec![
            adjustment(
                Rolling,
                "One side tested",
                "Roll the untested side toward price for a credit",
            ),
            adjustment(Defensive, "Short strike breached", "Close the tested spread"),
        ],
        StrategyKind::IronButterfly => vec![adjustment(
            Morphing,
            "Price leaves the body",
            "Widen the tested wing into an iron condor",
        )],
        StrategyKind::Butterfly => vec![adjustment(
            Rolling,
            "Price drifts from the body",
            "Roll the body toward price",
        )],
        StrategyKind::ShortStraddle | StrategyKind::ShortStrangle => vec![adjustment(
            Defensive,
            "One side tested",
            "Buy a protective option on the tested side or roll the untested side",
        )],
        StrategyKind::LongStraddle | StrategyKind::LongStrangle => vec![adjustment(
            Offensive,
            "Large move in either direction",
            "Sell the winning leg and hold the other",
        )],
        StrategyKind::BullPutSpread | StrategyKind::BearCallSpread => vec![adjustment(
            Rolling,
            "Short strike tested",
            "Roll the spread away from price and out in time for a credit",
        )],
        StrategyKind::BullCallSpread | StrategyKind::BearPutSpread => vec![adjustment(
            Morphing,
            "Price beyond the short strike early",
            "Sell a further spread to convert into a butterfly",
        )],
        StrategyKind::LongCall | StrategyKind::LongPut => vec![adjustment(
            Offensive,
            "Position up 50%",
            "Sell a further OTM option against it to lock gains in a vertical",
        )],
        StrategyKind::ShortCall | StrategyKind::ShortPut => vec![adjustment(
            Rolling,
            "Short strike tested",
            "Roll out in time for a credit",
        )],
        StrategyKind::CallRatioSpread => vec![adjustment(
            Defensive,
            "Price through the short strike",
            "Buy a higher call to cap the upside risk",
        )],
        StrategyKind::PutRatioSpread => vec![adjustment(
            Defensive,
            "Price through the short strike",
            "Buy a lower put to cap the downside risk",
        )],
        StrategyKind::CalendarSpread | StrategyKind::DiagonalSpread => vec![adjustment(
            Rolling,
            "Near leg expiring",
            "Roll the short leg to the next expiry",
        )],
        StrategyKind::CashSecuredPut => vec![adjustment(
            Rolling,
            "Put in the money near expiry",
            "Roll down and out, or take assignment and sell covered calls",
        )],
        StrategyKind::CoveredCall => vec![adjustment(
            Rolling,
            "Call in the money near expiry",
            "Roll up and out for a credit",
        )],
    }
}

fn monitoring_plan(
    category: StrategyCategory,
    result: &StrategyResult,
    params: &ExitParams,
) -> MonitoringPlan {
    let frequency = match category {
        StrategyCategory::Volatility => MonitoringFrequency::Intraday,
        StrategyCategory::Income => MonitoringFrequency::Weekly,
        StrategyCategory::Directional | StrategyCategory::Neutral | StrategyCategory::Advanced => {
            MonitoringFrequency::Daily
        }
    };
    let mut alerts: Vec<String> = result
        .breakevens
        .iter()
        .map(|breakeven| format!("Underlying crosses breakeven {breakeven}"))
        .collect();
    alerts.push(format!(
        "Position delta beyond {:.2} per unit",
        params.delta_threshold
    ));
    alerts.push(format!("{} days to expiry", params.time_exit_dte));
    MonitoringPlan { frequency, alerts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::{analysis, chain, with_ctx};
    use crate::strategies::{
        IronCondor, SingleLeg, Straddle, StrategyArchetype, VerticalSpread,
    };

    #[test]
    fn test_long_call_uses_realistic_profit() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(10));
        let result = with_ctx(&chain, &analysis, |ctx| SingleLeg::LONG_CALL.construct(ctx)).unwrap();
        let plan = ExitManager::default().generate(StrategyKind::LongCall, &result, Some(&analysis));

        // Spot + 1 SD = 110
        let leg = &result.legs[0];
        assert!(leg.strike < dec!(110));
        let expected = (dec!(110) - leg.strike - leg.premium) * dec!(100);
        assert!(plan.profit_targets.realistic);
        assert_eq!(plan.profit_targets.profit_basis, expected);
        assert_eq!(
            plan.profit_targets.primary.target_amount,
            expected * from_f64(0.75)
        );
    }

    #[test]
    fn test_long_call_without_analysis_uses_premium_narrative() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| SingleLeg::LONG_CALL.construct(ctx)).unwrap();
        let plan = ExitManager::default().generate(StrategyKind::LongCall, &result, None);
        assert!(!plan.profit_targets.realistic);
        assert_eq!(plan.profit_targets.profit_basis, result.premium_amount());
        assert!((plan.profit_targets.primary.target_pct - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_limited_profit_targets() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| IronCondor.construct(ctx)).unwrap();
        let plan = ExitManager::default().generate(StrategyKind::IronCondor, &result, Some(&analysis));
        let max = result.max_profit.amount().unwrap();
        assert_eq!(plan.category, StrategyCategory::Neutral);
        assert_eq!(plan.profit_targets.primary.target_amount, max * dec!(0.5));
        assert_eq!(plan.profit_targets.scaling.len(), 3);
        assert_eq!(plan.stop_losses[0].kind, StopKind::MaxLossPercent);
        assert!(
            plan.adjustment_triggers
                .iter()
                .any(|a| a.kind == AdjustmentKind::Rolling)
        );
    }

    #[test]
    fn test_unbounded_credit_stop() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| Straddle::SHORT.construct(ctx)).unwrap();
        let plan = ExitManager::default().generate(StrategyKind::ShortStraddle, &result, Some(&analysis));
        assert_eq!(plan.stop_losses[0].kind, StopKind::CreditMultiple);
        assert_eq!(plan.stop_losses[0].level, result.premium_amount() * dec!(2));
        // Breakeven stops on both sides
        assert_eq!(
            plan.stop_losses
                .iter()
                .filter(|s| s.kind == StopKind::UnderlyingPrice)
                .count(),
            2
        );
        assert_eq!(plan.monitoring.frequency, MonitoringFrequency::Intraday);
    }

    #[test]
    fn test_time_exits_and_checkpoints() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result = with_ctx(&chain, &analysis, |ctx| VerticalSpread::BULL_PUT.construct(ctx)).unwrap();
        let plan = ExitManager::default().generate(StrategyKind::BullPutSpread, &result, Some(&analysis));
        assert_eq!(plan.time_exits.len(), 4);
        assert_eq!(
            plan.time_exits[0].trigger,
            TimeTrigger::DaysToExpiry { days: 7 }
        );
        let days: Vec<u32> = plan.time_exits[1..]
            .iter()
            .filter_map(|e| match e.trigger {
                TimeTrigger::Elapsed { day, .. } => Some(day),
                TimeTrigger::DaysToExpiry { .. } => None,
            })
            .collect();
        assert_eq!(days, vec![8, 15, 23]);
    }

    #[test]
    fn test_income_gates_greeks_to_assignment() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let result =
            with_ctx(&chain, &analysis, |ctx| crate::strategies::CashSecuredPut.construct(ctx)).unwrap();
        let plan = ExitManager::default().generate(StrategyKind::CashSecuredPut, &result, Some(&analysis));
        assert_eq!(plan.greek_triggers.len(), 1);
        assert!((plan.greek_triggers[0].threshold - 0.6).abs() < 1e-10);
    }
}
