//! End-to-end construction scenarios against a synthetic chain.

#![allow(clippy::unwrap_used)]

mod common;

use rust_decimal_macros::dec;

use strategy_engine::config::StrategiesConfig;
use strategy_engine::decay::decay_curve;
use strategy_engine::models::{AccountContext, MarketDirection, OptionType, PayoffBound};
use strategy_engine::{
    ConstructionContext, ErrorCode, StrategyCatalog, StrategyError, StrategyKind, StrikeSelector,
};

use common::{analysis, chain, scale_premiums, set_delta};

#[test]
fn test_long_call_selects_strike_nearest_target() {
    let chain = chain("SPY", dec!(100), 30);
    let analysis = analysis(MarketDirection::Bullish, dec!(5), 22.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config);

    let result = StrategyCatalog::new()
        .construct(StrategyKind::LongCall, &ctx)
        .unwrap();

    // target = 100 + 5 * 0.75 * 0.8 = 103
    assert_eq!(result.legs.len(), 1);
    assert_eq!(result.legs[0].strike, dec!(102.5));
    assert_eq!(result.legs[0].option_type, OptionType::Call);
    assert!(result.max_profit.is_unbounded());
}

#[test]
fn test_short_call_rejected_when_iv_low() {
    let chain = chain("SPY", dec!(100), 30);
    let analysis = analysis(MarketDirection::Bearish, dec!(5), 10.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config);

    let err = StrategyCatalog::new()
        .construct(StrategyKind::ShortCall, &ctx)
        .unwrap_err();

    assert!(matches!(err, StrategyError::IvTooLow { .. }));
    assert_eq!(err.code(), ErrorCode::IvOutOfBand);
    assert_eq!(err.reason(), "IV too low for attractive premium collection");
}

#[test]
fn test_bull_put_spread_credit_probability() {
    let mut chain = chain("SPY", dec!(100), 30);
    let analysis = analysis(MarketDirection::Bullish, dec!(5), 22.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let catalog = StrategyCatalog::new();

    let first = {
        let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config);
        catalog.construct(StrategyKind::BullPutSpread, &ctx).unwrap()
    };
    let long_strike = first.legs[0].strike;
    let short_strike = first.legs[1].strike;
    assert!(long_strike < short_strike);

    set_delta(&mut chain, short_strike, OptionType::Put, -0.30);
    set_delta(&mut chain, long_strike, OptionType::Put, -0.15);
    let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config);
    let result = catalog.construct(StrategyKind::BullPutSpread, &ctx).unwrap();

    assert!(result.is_credit());
    assert!((result.probability_of_profit - 0.70).abs() < 1e-10);
}

#[test]
fn test_theta_decay_below_premium() {
    let profile = decay_curve(-5.0, 100.0, 30, 10, 100.0);

    assert!(profile.total_decay > 0.0);
    assert!(profile.total_decay < 100.0);
    assert!(profile.decay_percentage < 100.0);
    assert_eq!(profile.curve.len(), 10);
    assert_eq!(profile.final_days_to_expiry, 20);
}

#[test]
fn test_long_straddle_breakevens() {
    let chain = chain("SPY", dec!(100), 30);
    let analysis = analysis(MarketDirection::Neutral, dec!(5), 22.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config);

    let result = StrategyCatalog::new()
        .construct(StrategyKind::LongStraddle, &ctx)
        .unwrap();

    assert!(result.legs.iter().all(|leg| leg.strike == dec!(100)));
    assert!(result.legs.iter().all(|leg| leg.premium == dec!(3)));
    assert_eq!(result.breakevens, vec![dec!(94), dec!(106)]);
    assert_eq!(result.max_loss, PayoffBound::Limited(dec!(600)));
    assert_eq!(result.max_profit, PayoffBound::Unbounded);
}

#[test]
fn test_iron_condor_strike_ordering() {
    let chain = chain("SPY", dec!(100), 30);
    let analysis = analysis(MarketDirection::Neutral, dec!(5), 22.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config);

    let result = StrategyCatalog::new()
        .construct(StrategyKind::IronCondor, &ctx)
        .unwrap();

    let strikes: Vec<_> = result.legs.iter().map(|leg| leg.strike).collect();
    assert!(strikes[0] < strikes[1]);
    assert!(strikes[1] < dec!(100));
    assert!(dec!(100) < strikes[2]);
    assert!(strikes[2] < strikes[3]);
    assert!(result.is_credit());
}

#[test]
fn test_cash_secured_put_sized_by_capital() {
    let chain = chain("SPY", dec!(100), 30);
    let analysis = analysis(MarketDirection::Bullish, dec!(5), 22.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let account = AccountContext::new(dec!(1000));
    let ctx = ConstructionContext::new(&chain, &analysis, &selector, &config)
        .with_account(Some(&account));

    let err = StrategyCatalog::new()
        .construct(StrategyKind::CashSecuredPut, &ctx)
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InsufficientCapital);
}

#[test]
fn test_calendar_uses_far_chain() {
    let near = chain("SPY", dec!(100), 30);
    let mut far = chain("SPY", dec!(100), 60);
    scale_premiums(&mut far, dec!(1.4));
    let analysis = analysis(MarketDirection::Neutral, dec!(5), 22.0);
    let selector = StrikeSelector::default();
    let config = StrategiesConfig::default();
    let ctx = ConstructionContext::new(&near, &analysis, &selector, &config)
        .with_far_chain(Some(&far));

    let result = StrategyCatalog::new()
        .construct(StrategyKind::CalendarSpread, &ctx)
        .unwrap();

    assert_eq!(result.legs.len(), 2);
    assert_eq!(result.legs[0].strike, result.legs[1].strike);
    assert_eq!(result.legs[1].days_to_expiry, 60);
    assert!(!result.is_credit());
}
