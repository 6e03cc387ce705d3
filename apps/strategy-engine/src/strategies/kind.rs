//! Strategy archetype identifiers and their static profiles.
//!
//! Classification (category, bias, IV preference) is data on the enum rather
//! than matching on display names.

use serde::{Deserialize, Serialize};

use crate::exits::StrategyCategory;
use crate::models::{IvEnvironment, MarketDirection};

/// Market view an archetype expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketBias {
    /// Profits from a rise.
    Bullish,
    /// Profits from a fall.
    Bearish,
    /// Profits from a range or a volatility change.
    Neutral,
}

impl MarketBias {
    /// Whether the bias matches an analysis direction.
    #[must_use]
    pub const fn matches(&self, direction: MarketDirection) -> bool {
        matches!(
            (self, direction),
            (Self::Bullish, MarketDirection::Bullish)
                | (Self::Bearish, MarketDirection::Bearish)
                | (Self::Neutral, MarketDirection::Neutral)
        )
    }
}

/// Implied-volatility regime an archetype prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IvPreference {
    /// Buys premium; avoid high-IV regimes.
    Low,
    /// Sells premium; avoid low-IV regimes.
    High,
    /// Indifferent.
    Any,
}

impl IvPreference {
    /// Whether the preference tolerates an IV environment.
    #[must_use]
    pub const fn accepts(&self, environment: IvEnvironment) -> bool {
        match self {
            Self::Low => !matches!(environment, IvEnvironment::High),
            Self::High => !matches!(environment, IvEnvironment::Low),
            Self::Any => true,
        }
    }
}

/// Static description of an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyProfile {
    /// Display name.
    pub name: &'static str,
    /// Exit-management family.
    pub category: StrategyCategory,
    /// Market view.
    pub bias: MarketBias,
    /// Preferred IV regime.
    pub iv_preference: IvPreference,
    /// Number of legs in a constructed position.
    pub leg_count: usize,
}

const fn profile(
    name: &'static str,
    category: StrategyCategory,
    bias: MarketBias,
    iv_preference: IvPreference,
    leg_count: usize,
) -> StrategyProfile {
    StrategyProfile {
        name,
        category,
        bias,
        iv_preference,
        leg_count,
    }
}

/// Strategy archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    /// Buy a call.
    LongCall,
    /// Buy a put.
    LongPut,
    /// Sell a call.
    ShortCall,
    /// Sell a put.
    ShortPut,
    /// Debit call vertical.
    BullCallSpread,
    /// Debit put vertical.
    BearPutSpread,
    /// Credit put vertical.
    BullPutSpread,
    /// Credit call vertical.
    BearCallSpread,
    /// Short strangle with long wings.
    IronCondor,
    /// Short ATM straddle with long wings.
    IronButterfly,
    /// Long call butterfly.
    Butterfly,
    /// Buy ATM call and put.
    LongStraddle,
    /// Sell ATM call and put.
    ShortStraddle,
    /// Buy OTM call and put.
    LongStrangle,
    /// Sell OTM call and put.
    ShortStrangle,
    /// 1 long ATM call, 2 short OTM calls.
    CallRatioSpread,
    /// 1 long ATM put, 2 short OTM puts.
    PutRatioSpread,
    /// Same-strike near/far call time spread.
    CalendarSpread,
    /// Different-strike near/far call time spread.
    DiagonalSpread,
    /// Short put secured by cash.
    CashSecuredPut,
    /// Short call against owned shares.
    CoveredCall,
}

impl StrategyKind {
    /// Every archetype.
    pub const ALL: [Self; 21] = [
        Self::LongCall,
        Self::LongPut,
        Self::ShortCall,
        Self::ShortPut,
        Self::BullCallSpread,
        Self::BearPutSpread,
        Self::BullPutSpread,
        Self::BearCallSpread,
        Self::IronCondor,
        Self::IronButterfly,
        Self::Butterfly,
        Self::LongStraddle,
        Self::ShortStraddle,
        Self::LongStrangle,
        Self::ShortStrangle,
        Self::CallRatioSpread,
        Self::PutRatioSpread,
        Self::CalendarSpread,
        Self::DiagonalSpread,
        Self::CashSecuredPut,
        Self::CoveredCall,
    ];

    /// Static profile.
    #[must_use]
    pub const fn profile(&self) -> StrategyProfile {
        use IvPreference::{Any, High, Low};
        use MarketBias::{Bearish, Bullish, Neutral};
        use StrategyCategory as C;

        match self {
            Self::LongCall => profile("Long Call", C::Directional, Bullish, Low, 1),
            Self::LongPut => profile("Long Put", C::Directional, Bearish, Low, 1),
            Self::ShortCall => profile("Short Call", C::Directional, Bearish, High, 1),
            Self::ShortPut => profile("Short Put", C::Directional, Bullish, High, 1),
            Self::BullCallSpread => profile("Bull Call Spread", C::Directional, Bullish, Any, 2),
            Self::BearPutSpread => profile("Bear Put Spread", C::Directional, Bearish, Any, 2),
            Self::BullPutSpread => profile("Bull Put Spread", C::Directional, Bullish, High, 2),
            Self::BearCallSpread => profile("Bear Call Spread", C::Directional, Bearish, High, 2),
            Self::IronCondor => profile("Iron Condor", C::Neutral, Neutral, High, 4),
            Self::IronButterfly => profile("Iron Butterfly", C::Neutral, Neutral, High, 4),
            Self::Butterfly => profile("Butterfly Spread", C::Neutral, Neutral, Any, 3),
            Self::LongStraddle => profile("Long Straddle", C::Volatility, Neutral, Low, 2),
            Self::ShortStraddle => profile("Short Straddle", C::Volatility, Neutral, High, 2),
            Self::LongStrangle => profile("Long Strangle", C::Volatility, Neutral, Low, 2),
            Self::ShortStrangle => profile("Short Strangle", C::Volatility, Neutral, High, 2),
            Self::CallRatioSpread => profile("Call Ratio Spread", C::Advanced, Bullish, High, 2),
            Self::PutRatioSpread => profile("Put Ratio Spread", C::Advanced, Bearish, High, 2),
            Self::CalendarSpread => profile("Calendar Spread", C::Advanced, Neutral, Low, 2),
            Self::DiagonalSpread => profile("Diagonal Spread", C::Advanced, Bullish, Low, 2),
            Self::CashSecuredPut => profile("Cash-Secured Put", C::Income, Bullish, High, 1),
            Self::CoveredCall => profile("Covered Call", C::Income, Neutral, High, 1),
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.profile().name
    }

    /// Exit-management family.
    #[must_use]
    pub const fn category(&self) -> StrategyCategory {
        self.profile().category
    }

    /// Whether the archetype is a single option leg bought or sold outright.
    #[must_use]
    pub const fn is_single_leg_directional(&self) -> bool {
        matches!(
            self,
            Self::LongCall | Self::LongPut | Self::ShortCall | Self::ShortPut
        )
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_unique() {
        let names: HashSet<&str> = StrategyKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), StrategyKind::ALL.len());
    }

    #[test]
    fn test_leg_counts() {
        assert_eq!(StrategyKind::IronCondor.profile().leg_count, 4);
        assert_eq!(StrategyKind::Butterfly.profile().leg_count, 3);
        assert_eq!(StrategyKind::CoveredCall.profile().leg_count, 1);
    }

    #[test]
    fn test_categories() {
        assert_eq!(StrategyKind::BullPutSpread.category(), StrategyCategory::Directional);
        assert_eq!(StrategyKind::ShortStrangle.category(), StrategyCategory::Volatility);
        assert_eq!(StrategyKind::PutRatioSpread.category(), StrategyCategory::Advanced);
        assert_eq!(StrategyKind::CashSecuredPut.category(), StrategyCategory::Income);
        assert_eq!(StrategyKind::Butterfly.category(), StrategyCategory::Neutral);
    }

    #[test]
    fn test_iv_preference_accepts() {
        assert!(IvPreference::High.accepts(IvEnvironment::Normal));
        assert!(!IvPreference::High.accepts(IvEnvironment::Low));
        assert!(!IvPreference::Low.accepts(IvEnvironment::High));
        assert!(IvPreference::Any.accepts(IvEnvironment::High));
    }

    #[test]
    fn test_bias_matches_direction() {
        assert!(MarketBias::Bullish.matches(MarketDirection::Bullish));
        assert!(!MarketBias::Neutral.matches(MarketDirection::Bearish));
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&StrategyKind::CashSecuredPut).unwrap();
        assert_eq!(json, "\"CASH_SECURED_PUT\"");
    }
}
