use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an organization's share on a route or vessel type over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// The indicator family that produced a `MarketSignal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    SmaCrossover,
    Rsi,
    BollingerBreakout,
    SupportResistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    Strong,
    Moderate,
    Weak,
}

/// Overall trend derived from the latest fast/slow SMA relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Supply/demand state of a region or of the whole market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BalanceClassification {
    Tight,
    #[default]
    Balanced,
    Oversupplied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Which scan produced an `ArbitrageOpportunity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    RateDifferential,
    Triangulation,
    BallastBonus,
}

// Display mirrors the serde tags so tables and descriptions read the same as JSON output.
macro_rules! display_as {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = match self {
                    $(Self::$variant => $text,)+
                };
                f.write_str(text)
            }
        }
    };
}

display_as!(ShareTrend { Increasing => "increasing", Decreasing => "decreasing", Stable => "stable" });
display_as!(SignalType {
    SmaCrossover => "sma_crossover",
    Rsi => "rsi",
    BollingerBreakout => "bollinger_breakout",
    SupportResistance => "support_resistance",
});
display_as!(SignalDirection { Bullish => "bullish", Bearish => "bearish" });
display_as!(SignalStrength { Strong => "strong", Moderate => "moderate", Weak => "weak" });
display_as!(MarketTrend { Bullish => "bullish", Bearish => "bearish", Neutral => "neutral" });
display_as!(BalanceClassification {
    Tight => "tight",
    Balanced => "balanced",
    Oversupplied => "oversupplied",
});
display_as!(RiskLevel { Low => "low", Medium => "medium", High => "high" });
display_as!(OpportunityKind {
    RateDifferential => "rate_differential",
    Triangulation => "triangulation",
    BallastBonus => "ballast_bonus",
});
