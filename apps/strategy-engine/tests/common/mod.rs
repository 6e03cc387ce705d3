//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use strategy_engine::models::{
    ExpectedMoves, IvAnalysis, IvEnvironment, MarketAnalysis, MarketDirection, OptionChainSnapshot,
    OptionContract, OptionType, PriceLevels, Timeframe, from_f64, to_f64,
};

/// Contract priced off a bell-shaped time value; 3.00 time value at the money.
pub fn contract(strike: Decimal, option_type: OptionType, spot: Decimal) -> OptionContract {
    let distance = to_f64(strike - spot);
    let time_value = 2.8 * (-(distance / 10.0).powi(2)).exp() + 0.2;
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
        open_interest: 2_000,
        volume: 300,
        implied_volatility: Some(22.0),
        delta: Some(delta),
        gamma: Some(0.04),
        theta: Some(-0.06),
        vega: Some(0.12),
    }
}

/// Strikes 80 to 120 every 2.5 around `spot`, lot 100.
pub fn chain(symbol: &str, spot: Decimal, dte: i64) -> OptionChainSnapshot {
    let as_of = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
    let mut contracts = Vec::new();
    let mut strike = dec!(80);
    while strike <= dec!(120) {
        contracts.push(contract(strike, OptionType::Call, spot));
        contracts.push(contract(strike, OptionType::Put, spot));
        strike += dec!(2.5);
    }
    OptionChainSnapshot {
        symbol: symbol.to_string(),
        spot_price: spot,
        expiry: as_of + chrono::Duration::days(dte),
        as_of,
        lot_size: 100,
        contracts,
    }
}

/// Analysis with a "10-20 days" timeframe.
pub fn analysis(direction: MarketDirection, one_sd_move: Decimal, atm_iv: f64) -> MarketAnalysis {
    MarketAnalysis {
        direction,
        confidence: 0.65,
        timeframe: Timeframe::new("10-20 days"),
        price_levels: PriceLevels {
            expected_moves: ExpectedMoves {
                one_sd_move,
                two_sd_move: one_sd_move * dec!(2),
            },
        },
        iv_analysis: IvAnalysis {
            iv_environment: IvEnvironment::Normal,
            atm_iv,
            iv_percentile: 50.0,
        },
    }
}

/// Replace the delta of one contract.
pub fn set_delta(chain: &mut OptionChainSnapshot, strike: Decimal, option_type: OptionType, delta: f64) {
    let contract = chain
        .contracts
        .iter_mut()
        .find(|c| c.strike == strike && c.option_type == option_type)
        .unwrap();
    contract.delta = Some(delta);
}

/// Multiply every quote in the chain, e.g. to stand in for a later expiry.
pub fn scale_premiums(chain: &mut OptionChainSnapshot, factor: Decimal) {
    for contract in &mut chain.contracts {
        contract.bid = (contract.bid * factor).round_dp(2);
        contract.ask = (contract.ask * factor).round_dp(2);
        contract.last_price = (contract.last_price * factor).round_dp(2);
    }
}
