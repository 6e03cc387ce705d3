//! The construction seam every archetype implements.

use super::context::ConstructionContext;
use super::kind::{IvPreference, MarketBias, StrategyKind};
use crate::error::StrategyError;
use crate::models::StrategyResult;

/// A strategy archetype that can build a position from a chain.
///
/// Implementations are stateless and shared across threads by the catalog.
pub trait StrategyArchetype: Send + Sync + std::fmt::Debug {
    /// Which archetype this is.
    fn kind(&self) -> StrategyKind;

    /// Build the position, or explain why it cannot be built.
    fn construct(&self, ctx: &ConstructionContext<'_>) -> Result<StrategyResult, StrategyError>;

    /// Market view the archetype expresses.
    fn market_bias(&self) -> MarketBias {
        self.kind().profile().bias
    }

    /// IV regime the archetype prefers.
    fn iv_preference(&self) -> IvPreference {
        self.kind().profile().iv_preference
    }

    /// Number of legs in a constructed position.
    fn leg_count(&self) -> usize {
        self.kind().profile().leg_count
    }
}
