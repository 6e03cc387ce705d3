//! Synthetic chains and analyses for archetype tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::context::ConstructionContext;
use crate::config::StrategiesConfig;
use crate::models::{
    ExpectedMoves, IvAnalysis, IvEnvironment, MarketAnalysis, MarketDirection, OptionChainSnapshot,
    OptionContract, OptionType, PriceLevels, Timeframe, from_f64, to_f64,
};
use crate::selection::StrikeSelector;

pub(crate) fn contract(strike: Decimal, option_type: OptionType, spot: Decimal) -> OptionContract {
    let distance = to_f64(strike - spot);
    let time_value = 3.0 * (-(distance / 10.0).powi(2)).exp() + 0.2;
    let intrinsic = match option_type {
        OptionType::Call => (spot - strike).max(Decimal::ZERO),
        OptionType::Put => (strike - spot).max(Decimal::ZERO),
    };
    let premium = (intrinsic + from_f64(time_value)).round_dp(2);
    let call_delta = (0.5 - distance / 50.0).clamp(0.02, 0.98);
    let delta = match option_type {
        OptionType::Call => call_delta,
        OptionType::Put => call_delta - 1.0,
    };
    OptionContract {
        strike,
        option_type,
        bid: premium - dec!(0.05),
        ask: premium + dec!(0.05),
        last_price: premium,
        open_interest: 1_000,
        volume: 100,
        implied_volatility: Some(25.0),
        delta: Some(delta),
        gamma: Some(0.03),
        theta: Some(-0.05),
        vega: Some(0.10),
    }
}

/// Strikes 75 to 125 every 2.5, both types, 30 days to expiry, lot 100.
pub(crate) fn chain(spot: Decimal) -> OptionChainSnapshot {
    chain_with_dte(spot, 30)
}

pub(crate) fn chain_with_dte(spot: Decimal, dte: i64) -> OptionChainSnapshot {
    let as_of = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let mut contracts = Vec::new();
    let mut strike = dec!(75);
    while strike <= dec!(125) {
        contracts.push(contract(strike, OptionType::Call, spot));
        contracts.push(contract(strike, OptionType::Put, spot));
        strike += dec!(2.5);
    }
    OptionChainSnapshot {
        symbol: "TEST".to_string(),
        spot_price: spot,
        expiry: as_of + chrono::Duration::days(dte),
        as_of,
        lot_size: 100,
        contracts,
    }
}

/// Neutral analysis, "10-20 days" timeframe, ATM IV 25.
pub(crate) fn analysis(one_sd_move: Decimal) -> MarketAnalysis {
    MarketAnalysis {
        direction: MarketDirection::Neutral,
        confidence: 0.6,
        timeframe: Timeframe::new("10-20 days"),
        price_levels: PriceLevels {
            expected_moves: ExpectedMoves {
                one_sd_move,
                two_sd_move: one_sd_move * dec!(2),
            },
        },
        iv_analysis: IvAnalysis {
            iv_environment: IvEnvironment::Normal,
            atm_iv: 25.0,
            iv_percentile: 50.0,
        },
    }
}

pub(crate) fn with_ctx<R>(
    chain: &OptionChainSnapshot,
    analysis: &MarketAnalysis,
    f: impl FnOnce(&ConstructionContext<'_>) -> R,
) -> R {
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let ctx = ConstructionContext::new(chain, analysis, &selector, &config);
    f(&ctx)
}
