// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Strategy Engine - Rust Core Library
//!
//! Deterministic options strategy decision core for the Cream trading system.
//!
//! # Stages
//!
//! Each stage turns immutable inputs into a new immutable output:
//!
//! - **Liquidity**: `LiquidityScorer` rates a contract from open interest,
//!   volume and bid/ask spread
//! - **Selection**: `StrikeSelector` maps expected-move targets onto listed
//!   strikes, balancing proximity and liquidity inside moneyness bands
//! - **Strategies**: `StrategyCatalog` holds 21 archetypes that build
//!   `StrategyResult` positions or fail with a `StrategyError`
//! - **Probability**: delta-based, volatility-based and market-aware
//!   probability of profit
//! - **Decay**: theta projection and decay-adjusted profit targets
//! - **Risk**: risk rating and fixed-fractional position sizing
//! - **Exits**: profit targets, stops, time exits, greek triggers and
//!   adjustment playbooks per strategy category
//! - **Pipeline**: `StrategyPipeline` runs every stage for a symbol and ranks
//!   the candidates; batches fan out with Rayon
//!
//! Inputs (chain snapshots, market analysis) come from external collaborators.
//! Nothing inside the core performs I/O or caches across calls; the lot-size
//! cache in [`data`] belongs to the calling data layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Caches owned by the calling data layer.
pub mod data;

/// Theta decay projection.
pub mod decay;

/// Construction errors and failure records.
pub mod error;

/// Exit planning.
pub mod exits;

/// Contract liquidity scoring.
pub mod liquidity;

/// Chain, analysis and result records.
pub mod models;

/// Metrics and logging setup.
pub mod observability;

/// Per-symbol orchestration.
pub mod pipeline;

/// Probability of profit estimates.
pub mod probability;

/// Risk rating and position sizing.
pub mod risk;

/// Strike selection.
pub mod selection;

/// Strategy archetypes and the catalog.
pub mod strategies;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use data::LotSizeCache;
pub use error::{ErrorCode, StrategyError, StrategyFailure};
pub use exits::{ExitConditionSet, ExitManager, StrategyCategory};
pub use liquidity::{LiquidityRating, LiquidityScorer};
pub use models::{
    AccountContext, MarketAnalysis, OptionChainSnapshot, OptionContract, OptionType, PayoffBound,
    StrategyLeg, StrategyResult,
};
pub use pipeline::{PipelineReport, StrategyPipeline, StrategyRecommendation, SymbolInput};
pub use risk::{RiskAssessment, RiskManager, RiskRating};
pub use selection::StrikeSelector;
pub use strategies::{ConstructionContext, StrategyArchetype, StrategyCatalog, StrategyKind};
