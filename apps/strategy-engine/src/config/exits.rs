//! Exit parameter overrides per strategy category.

use serde::{Deserialize, Serialize};

use crate::exits::{ExitParams, StrategyCategory};

/// Exit parameters per strategy category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitsConfig {
    /// Directional strategies.
    #[serde(default = "directional")]
    pub directional: ExitParams,
    /// Neutral premium-selling structures.
    #[serde(default = "neutral")]
    pub neutral: ExitParams,
    /// Straddles and strangles.
    #[serde(default = "volatility")]
    pub volatility: ExitParams,
    /// Cash-secured puts and covered calls.
    #[serde(default = "income")]
    pub income: ExitParams,
    /// Ratio and time spreads.
    #[serde(default = "advanced")]
    pub advanced: ExitParams,
}

impl ExitsConfig {
    /// Parameters for a category.
    #[must_use]
    pub const fn params(&self, category: StrategyCategory) -> &ExitParams {
        match category {
            StrategyCategory::Directional => &self.directional,
            StrategyCategory::Neutral => &self.neutral,
            StrategyCategory::Volatility => &self.volatility,
            StrategyCategory::Income => &self.income,
            StrategyCategory::Advanced => &self.advanced,
        }
    }

    /// All categories with their parameters.
    pub fn by_category(&self) -> impl Iterator<Item = (StrategyCategory, &ExitParams)> {
        StrategyCategory::ALL
            .into_iter()
            .map(move |category| (category, self.params(category)))
    }
}

impl Default for ExitsConfig {
    fn default() -> Self {
        Self {
            directional: directional(),
            neutral: neutral(),
            volatility: volatility(),
            income: income(),
            advanced: advanced(),
        }
    }
}

fn directional() -> ExitParams {
    ExitParams::defaults_for(StrategyCategory::Directional)
}

fn neutral() -> ExitParams {
    ExitParams::defaults_for(StrategyCategory::Neutral)
}

fn volatility() -> ExitParams {
    ExitParams::defaults_for(StrategyCategory::Volatility)
}

fn income() -> ExitParams {
    ExitParams::defaults_for(StrategyCategory::Income)
}

fn advanced() -> ExitParams {
    ExitParams::defaults_for(StrategyCategory::Advanced)
}
