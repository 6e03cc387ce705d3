//! Pipeline inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::decay::{DecayAdjustedTargets, StrategyThetaAnalysis};
use crate::error::StrategyFailure;
use crate::exits::ExitConditionSet;
use crate::models::{AccountContext, MarketAnalysis, OptionChainSnapshot, StrategyResult};
use crate::risk::{PositionSize, RiskAssessment};

const POP_WEIGHT: f64 = 0.4;
const THETA_WEIGHT: f64 = 0.3;
const RISK_WEIGHT: f64 = 0.3;

/// Everything the pipeline needs for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInput {
    /// Near-expiry chain.
    pub chain: OptionChainSnapshot,
    /// Upstream market view.
    pub analysis: MarketAnalysis,
    /// Later-expiry chain for time spreads.
    #[serde(default)]
    pub far_chain: Option<OptionChainSnapshot>,
    /// Capital for sizing.
    #[serde(default)]
    pub account: Option<AccountContext>,
}

impl SymbolInput {
    /// Input without a far chain or account.
    #[must_use]
    pub const fn new(chain: OptionChainSnapshot, analysis: MarketAnalysis) -> Self {
        Self {
            chain,
            analysis,
            far_chain: None,
            account: None,
        }
    }

    /// Attach a later-expiry chain.
    #[must_use]
    pub fn with_far_chain(mut self, far_chain: OptionChainSnapshot) -> Self {
        self.far_chain = Some(far_chain);
        self
    }

    /// Attach account capital.
    #[must_use]
    pub fn with_account(mut self, account: AccountContext) -> Self {
        self.account = Some(account);
        self
    }

    /// Underlying symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.chain.symbol
    }
}

/// A constructed strategy with its analyses attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    /// Constructed position.
    pub result: StrategyResult,
    /// Net decay over the holding period.
    pub theta: StrategyThetaAnalysis,
    /// Profit targets adjusted for decay.
    pub targets: DecayAdjustedTargets,
    /// Risk verdict.
    pub risk: RiskAssessment,
    /// Suggested size.
    pub position_size: PositionSize,
    /// Exit plan.
    pub exits: ExitConditionSet,
    /// Ranking score in `[0, 1]`, higher is better.
    pub rank_score: f64,
}

/// Outcome of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Underlying symbol.
    pub symbol: String,
    /// Successful constructions, best first.
    pub recommendations: Vec<StrategyRecommendation>,
    /// Skipped constructions.
    pub failures: Vec<StrategyFailure>,
}

impl PipelineReport {
    /// Highest-ranked recommendation.
    #[must_use]
    pub fn best(&self) -> Option<&StrategyRecommendation> {
        self.recommendations.first()
    }
}

/// `0.4 * PoP + 0.3 * theta_score + 0.3 * (1 - risk_score)`, clamped to `[0, 1]`.
#[must_use]
pub fn rank_score(probability_of_profit: f64, theta_score: f64, risk_score: f64) -> f64 {
    let score = POP_WEIGHT * probability_of_profit
        + THETA_WEIGHT * theta_score
        + RISK_WEIGHT * (1.0 - risk_score.min(1.0));
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
