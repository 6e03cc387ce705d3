//! Per-symbol orchestration of construction and analysis.
//!
//! For each symbol the pipeline validates the chain, picks the enabled
//! archetypes whose bias and IV preference fit the analysis, constructs them,
//! attaches decay, risk, sizing and exit analyses, and ranks the results.
//! Construction failures are kept in the report next to the successes.
//!
//! Batches fan out over (symbol, strategy) jobs with Rayon.

mod error;
mod executor;
mod types;

pub use error::PipelineError;
pub use executor::StrategyPipeline;
pub use types::{PipelineReport, StrategyRecommendation, SymbolInput, rank_score};
