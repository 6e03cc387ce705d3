//! Assembles a [`StrategyResult`] from constructed legs.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::context::ConstructionContext;
use super::kind::StrategyKind;
use super::payoff::{PayoffSummary, expiry_payoff};
use crate::error::StrategyError;
use crate::models::{
    Greeks, IncomeMetrics, PayoffBound, PositionDetails, PositionSide, StrategyLeg,
    StrategyResult, to_f64,
};

/// Builder shared by every archetype.
///
/// Payoffs are computed per share and scaled by `lot_size * units` at build
/// time. Unless overridden, the payoff is the expiry payoff of the legs.
#[derive(Debug, Clone)]
pub struct StrategyResultBuilder<'a> {
    ctx: ConstructionContext<'a>,
    kind: StrategyKind,
    legs: Vec<StrategyLeg>,
    payoff: Option<PayoffSummary>,
    probability: f64,
    units: u32,
    capital_per_share: Option<Decimal>,
    income_base: Option<Decimal>,
    stock_delta: f64,
}

impl<'a> StrategyResultBuilder<'a> {
    /// Start a result for `kind` with its legs.
    #[must_use]
    pub fn new(ctx: &ConstructionContext<'a>, kind: StrategyKind, legs: Vec<StrategyLeg>) -> Self {
        Self {
            ctx: *ctx,
            kind,
            legs,
            payoff: None,
            probability: 0.5,
            units: 1,
            capital_per_share: None,
            income_base: None,
            stock_delta: 0.0,
        }
    }

    /// Override the expiry payoff (time spreads, stock-backed positions).
    #[must_use]
    pub fn payoff(mut self, payoff: PayoffSummary) -> Self {
        self.payoff = Some(payoff);
        self
    }

    /// Probability of profit; clamped to `[0, 1]`, NaN becomes 0.5.
    #[must_use]
    pub const fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Number of strategy units.
    #[must_use]
    pub const fn units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Capital tied up per share of one unit.
    #[must_use]
    pub const fn capital_per_share(mut self, capital: Decimal) -> Self {
        self.capital_per_share = Some(capital);
        self
    }

    /// Attach return-on-cash metrics measured against `base` per share.
    #[must_use]
    pub const fn income(mut self, base: Decimal) -> Self {
        self.income_base = Some(base);
        self
    }

    /// Add one share of stock per unit share to the position delta.
    #[must_use]
    pub const fn covered_by_stock(mut self) -> Self {
        self.stock_delta = 1.0;
        self
    }

    /// Finish the result.
    pub fn build(self) -> Result<StrategyResult, StrategyError> {
        let expected = self.kind.profile().leg_count;
        if self.legs.len() != expected {
            return Err(StrategyError::insufficient(format!(
                "{} needs {expected} legs, got {}",
                self.kind,
                self.legs.len()
            )));
        }
        if self.units == 0 {
            return Err(StrategyError::insufficient(format!(
                "{} sized to zero units",
                self.kind
            )));
        }

        let chain = self.ctx.chain;
        let lot = Decimal::from(chain.lot_size);
        let units = Decimal::from(self.units);
        let scale = lot * units;

        let payoff = self.payoff.unwrap_or_else(|| expiry_payoff(&self.legs));
        let net_premium: Decimal = self.legs.iter().map(StrategyLeg::net_premium).sum();
        let per_unit_greeks = self
            .legs
            .iter()
            .fold(Greeks::new(self.stock_delta, 0.0, 0.0, 0.0), |acc, leg| {
                acc.add(&leg.total_greeks())
            });

        let max_profit = payoff.max_profit.scale(scale);
        let max_loss = payoff.max_loss.scale(scale);
        let capital_required = match (self.capital_per_share, max_loss) {
            (Some(per_share), _) => per_share * scale,
            (None, PayoffBound::Limited(amount)) => amount,
            (None, PayoffBound::Unbounded) => short_notional(&self.legs) * scale,
        };

        let income = self.income_base.map(|base| {
            let premium = net_premium.max(Decimal::ZERO);
            let return_on_cash_pct = if base > Decimal::ZERO {
                to_f64(premium / base) * 100.0
            } else {
                0.0
            };
            let dte = chain.days_to_expiry();
            let annualized_return_pct = if dte > 0 {
                return_on_cash_pct * 365.0 / f64::from(dte)
            } else {
                0.0
            };
            IncomeMetrics {
                return_on_cash_pct,
                annualized_return_pct,
                capital_required,
            }
        });

        let probability_of_profit = if self.probability.is_nan() {
            0.5
        } else {
            self.probability.clamp(0.0, 1.0)
        };

        Ok(StrategyResult {
            id: Uuid::new_v4(),
            strategy: self.kind,
            strategy_name: self.kind.name().to_string(),
            symbol: chain.symbol.clone(),
            spot_price: chain.spot_price,
            days_to_expiry: chain.days_to_expiry(),
            max_profit,
            max_loss,
            breakevens: payoff.breakevens,
            net_premium,
            net_greeks: per_unit_greeks.scale(f64::from(self.units)),
            probability_of_profit,
            position_details: PositionDetails {
                lot_size: chain.lot_size,
                units: self.units,
                premium_per_unit: net_premium * lot,
                total_premium: net_premium * scale,
                capital_required,
            },
            income,
            created_at: Utc::now(),
            legs: self.legs,
        })
    }
}

/// Assignment notional of the short legs, per share.
fn short_notional(legs: &[StrategyLeg]) -> Decimal {
    legs.iter()
        .filter(|leg| leg.position == PositionSide::Short)
        .map(|leg| leg.strike * Decimal::from(leg.quantity))
        .sum()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::strategies::test_support::{analysis, chain, with_ctx};

    fn straddle_legs(ctx: &ConstructionContext<'_>) -> Vec<StrategyLeg> {
        let call = ctx.chain.find(dec!(100), crate::models::OptionType::Call).unwrap();
        let put = ctx.chain.find(dec!(100), crate::models::OptionType::Put).unwrap();
        vec![
            ctx.leg(call, PositionSide::Long, 1),
            ctx.leg(put, PositionSide::Long, 1),
        ]
    }

    #[test]
    fn test_build_scales_by_lot_size() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        with_ctx(&chain, &analysis, |ctx| {
            let legs = straddle_legs(ctx);
            let result = StrategyResultBuilder::new(ctx, StrategyKind::LongStraddle, legs)
                .probability(0.4)
                .build()
                .unwrap();
            let per_share = result.legs.iter().map(|l| l.premium).sum::<Decimal>();
            assert_eq!(result.max_profit, PayoffBound::Unbounded);
            assert_eq!(result.max_loss, PayoffBound::Limited(per_share * dec!(100)));
            assert_eq!(result.net_premium, -per_share);
            assert_eq!(result.position_details.capital_required, per_share * dec!(100));
            assert!(result.income.is_none());
        });
    }

    #[test]
    fn test_build_rejects_wrong_leg_count() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        with_ctx(&chain, &analysis, |ctx| {
            let legs = straddle_legs(ctx);
            let err = StrategyResultBuilder::new(ctx, StrategyKind::IronCondor, legs)
                .build()
                .unwrap_err();
            assert!(matches!(err, StrategyError::InsufficientData { .. }));
        });
    }

    #[test]
    fn test_probability_sanitized() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        with_ctx(&chain, &analysis, |ctx| {
            let legs = straddle_legs(ctx);
            let result = StrategyResultBuilder::new(ctx, StrategyKind::LongStraddle, legs)
                .probability(f64::NAN)
                .build()
                .unwrap();
            assert_eq!(result.probability_of_profit, 0.5);
        });
    }

    #[test]
    fn test_units_scale_greeks() {
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        with_ctx(&chain, &analysis, |ctx| {
            let one = StrategyResultBuilder::new(ctx, StrategyKind::LongStraddle, straddle_legs(ctx))
                .build()
                .unwrap();
            let three = StrategyResultBuilder::new(ctx, StrategyKind::LongStraddle, straddle_legs(ctx))
                .units(3)
                .build()
                .unwrap();
            assert!((three.net_greeks.vega - one.net_greeks.vega * 3.0).abs() < 1e-10);
            assert_eq!(three.position_details.total_premium, one.position_details.total_premium * dec!(3));
        });
    }
}
