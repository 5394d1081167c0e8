pub mod dates;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use dates::{PeriodKey, parse_observation_date};
pub use enums::{
    BalanceClassification, MarketTrend, OpportunityKind, RiskLevel, ShareTrend, SignalDirection,
    SignalStrength, SignalType,
};
pub use error::CoreError;
pub use structs::{
    ArbitrageOpportunity, ArbitrageResult, FixtureCountEntry, HeatmapSnapshot, MarketBalance,
    MarketDataBundle, MarketFixtureEntry, MarketIntelligenceReport, MarketShareResult,
    MarketSignal, RateDataPoint, RegionBalance, RouteRate, RouteShare, TonnageSupplyDemandResult,
    TurningPointResult, VesselTypeShare,
};
