//! Registry of archetypes keyed by [`StrategyKind`].

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info_span};

use super::archetype::StrategyArchetype;
use super::calendar::{CalendarSpread, DiagonalSpread};
use super::condor::{Butterfly, IronButterfly, IronCondor};
use super::context::ConstructionContext;
use super::directional::SingleLeg;
use super::income::{CashSecuredPut, CoveredCall};
use super::kind::StrategyKind;
use super::ratio::RatioSpread;
use super::vertical::VerticalSpread;
use super::volatility::{Straddle, Strangle};
use crate::error::StrategyError;
use crate::models::{MarketAnalysis, StrategyResult};
use crate::observability::{record_construction, record_strategy_build};

/// Every archetype, looked up by kind.
#[derive(Debug)]
pub struct StrategyCatalog {
    archetypes: BTreeMap<StrategyKind, Box<dyn StrategyArchetype>>,
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyCatalog {
    /// Catalog with all built-in archetypes registered.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        catalog.register(Box::new(SingleLeg::LONG_CALL));
        catalog.register(Box::new(SingleLeg::LONG_PUT));
        catalog.register(Box::new(SingleLeg::SHORT_CALL));
        catalog.register(Box::new(SingleLeg::SHORT_PUT));
        catalog.register(Box::new(VerticalSpread::BULL_CALL));
        catalog.register(Box::new(VerticalSpread::BEAR_PUT));
        catalog.register(Box::new(VerticalSpread::BULL_PUT));
        catalog.register(Box::new(VerticalSpread::BEAR_CALL));
        catalog.register(Box::new(IronCondor));
        catalog.register(Box::new(IronButterfly));
        catalog.register(Box::new(Butterfly));
        catalog.register(Box::new(Straddle::LONG));
        catalog.register(Box::new(Straddle::SHORT));
        catalog.register(Box::new(Strangle::LONG));
        catalog.register(Box::new(Strangle::SHORT));
        catalog.register(Box::new(RatioSpread::CALL));
        catalog.register(Box::new(RatioSpread::PUT));
        catalog.register(Box::new(CalendarSpread));
        catalog.register(Box::new(DiagonalSpread));
        catalog.register(Box::new(CashSecuredPut));
        catalog.register(Box::new(CoveredCall));
        catalog
    }

    /// Catalog with nothing registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            archetypes: BTreeMap::new(),
        }
    }

    /// Register an archetype, replacing any previous one of the same kind.
    pub fn register(&mut self, archetype: Box<dyn StrategyArchetype>) {
        self.archetypes.insert(archetype.kind(), archetype);
    }

    /// Archetype for a kind.
    #[must_use]
    pub fn get(&self, kind: StrategyKind) -> Option<&dyn StrategyArchetype> {
        self.archetypes.get(&kind).map(Box::as_ref)
    }

    /// Registered kinds in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = StrategyKind> + '_ {
        self.archetypes.keys().copied()
    }

    /// Construct one archetype.
    ///
    /// Every outcome is counted in `strategy_constructions_total`.
    pub fn construct(
        &self,
        kind: StrategyKind,
        ctx: &ConstructionContext<'_>,
    ) -> Result<StrategyResult, StrategyError> {
        let span = info_span!("construct", symbol = %ctx.chain.symbol, strategy = %kind);
        let _guard = span.enter();

        let archetype = self.get(kind).ok_or_else(|| {
            StrategyError::insufficient(format!("{kind} is not registered"))
        })?;

        let start = Instant::now();
        let outcome = archetype.construct(ctx);
        record_strategy_build(kind.name(), start.elapsed().as_secs_f64());

        match &outcome {
            Ok(result) => {
                record_construction(kind.name(), "success");
                debug!(
                    legs = result.legs.len(),
                    net_premium = %result.net_premium,
                    probability = result.probability_of_profit,
                    "Strategy constructed"
                );
            }
            Err(e) => {
                record_construction(kind.name(), e.code().as_str());
                debug!(code = %e.code(), reason = %e, "Strategy skipped");
            }
        }
        outcome
    }

    /// Enabled kinds suited to the analysis: the archetype's bias matches the
    /// direction and its IV preference accepts the IV environment.
    #[must_use]
    pub fn candidates(&self, analysis: &MarketAnalysis, enabled: &[StrategyKind]) -> Vec<StrategyKind> {
        self.archetypes
            .values()
            .filter(|archetype| enabled.contains(&archetype.kind()))
            .filter(|archetype| archetype.market_bias().matches(analysis.direction))
            .filter(|archetype| {
                archetype
                    .iv_preference()
                    .accepts(analysis.iv_analysis.iv_environment)
            })
            .map(|archetype| archetype.kind())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{IvEnvironment, MarketDirection};
    use crate::strategies::test_support::{analysis, chain, with_ctx};

    #[test]
    fn test_all_kinds_registered() {
        let catalog = StrategyCatalog::new();
        let kinds: Vec<StrategyKind> = catalog.kinds().collect();
        assert_eq!(kinds.len(), StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            let archetype = catalog.get(kind).unwrap();
            assert_eq!(archetype.kind(), kind);
            assert_eq!(archetype.leg_count(), kind.profile().leg_count);
        }
    }

    #[test]
    fn test_every_archetype_builds_on_a_healthy_chain() {
        let catalog = StrategyCatalog::new();
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        with_ctx(&chain, &analysis, |ctx| {
            for kind in StrategyKind::ALL {
                match catalog.construct(kind, ctx) {
                    Ok(result) => {
                        assert_eq!(result.strategy, kind);
                        assert_eq!(result.legs.len(), kind.profile().leg_count);
                        assert!((0.0..=1.0).contains(&result.probability_of_profit));
                    }
                    Err(e) => panic!("{kind} failed: {e}"),
                }
            }
        });
    }

    #[test]
    fn test_unregistered_kind() {
        let catalog = StrategyCatalog::empty();
        let chain = chain(dec!(100));
        let analysis = analysis(dec!(5));
        let err = with_ctx(&chain, &analysis, |ctx| catalog.construct(StrategyKind::LongCall, ctx))
            .unwrap_err();
        assert!(matches!(err, StrategyError::InsufficientData { .. }));
    }

    #[test]
    fn test_candidates_filter_bias_and_iv() {
        let catalog = StrategyCatalog::new();
        let mut analysis = analysis(dec!(5));
        analysis.direction = MarketDirection::Bullish;
        analysis.iv_analysis.iv_environment = IvEnvironment::High;
        let candidates = catalog.candidates(&analysis, &StrategyKind::ALL);
        assert!(candidates.contains(&StrategyKind::BullPutSpread));
        assert!(candidates.contains(&StrategyKind::CashSecuredPut));
        assert!(!candidates.contains(&StrategyKind::LongCall));
        assert!(!candidates.contains(&StrategyKind::BearCallSpread));

        let only = catalog.candidates(&analysis, &[StrategyKind::ShortPut]);
        assert_eq!(only, vec![StrategyKind::ShortPut]);
    }
}
