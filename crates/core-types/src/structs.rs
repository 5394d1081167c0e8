use crate::dates::observation_date;
use crate::enums::{
    BalanceClassification, MarketTrend, OpportunityKind, RiskLevel, ShareTrend, SignalDirection,
    SignalStrength, SignalType,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// ==============================================================================
// Input records
// ==============================================================================

/// An organization's own fixture count for one route, vessel type and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCountEntry {
    pub route: String,
    pub vessel_type: String,
    pub count: u64,
    /// `YYYY-MM` or an ISO date.
    pub period: String,
}

/// Total market fixture count for the same dimensions as `FixtureCountEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFixtureEntry {
    pub route: String,
    pub vessel_type: String,
    pub total_count: u64,
    pub period: String,
}

/// One observation of a freight rate index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDataPoint {
    #[serde(with = "observation_date")]
    pub date: DateTime<Utc>,
    pub value: Decimal,
}

/// Vessels available (`supply`) and open cargoes (`demand`) in a region for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapSnapshot {
    pub region: String,
    pub supply: u64,
    pub demand: u64,
    pub period: String,
}

/// An observed freight rate for a named route such as `"Santos - Qingdao"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRate {
    pub route: String,
    pub rate: Decimal,
    pub vessel_type: String,
    /// Nautical miles. Carried for callers; no calculation depends on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<Decimal>,
}

/// Everything the four components consume, as fetched by a host in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketDataBundle {
    pub own_fixtures: Vec<FixtureCountEntry>,
    pub market_fixtures: Vec<MarketFixtureEntry>,
    pub rate_data: Vec<RateDataPoint>,
    pub heatmap: Vec<HeatmapSnapshot>,
    pub route_rates: Vec<RouteRate>,
}

// ==============================================================================
// Output records
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteShare {
    pub route: String,
    /// Percentage in [0, 100].
    pub share: Decimal,
    pub trend: ShareTrend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselTypeShare {
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub share: Decimal,
    pub trend: ShareTrend,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketShareResult {
    pub overall: Decimal,
    pub by_route: Vec<RouteShare>,
    pub by_vessel_type: Vec<VesselTypeShare>,
}

/// A directional signal emitted by one of the turning-point indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSignal {
    #[serde(with = "observation_date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub direction: SignalDirection,
    pub strength: SignalStrength,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurningPointResult {
    pub signals: Vec<MarketSignal>,
    pub current_trend: MarketTrend,
    /// Latest RSI in [0, 100].
    pub rsi: Decimal,
    /// Where the latest value sits between the Bollinger bands, in [0, 1].
    pub bollinger_position: Decimal,
}

impl TurningPointResult {
    /// The result reported when the series is too short to analyse.
    pub fn neutral() -> Self {
        Self {
            signals: Vec::new(),
            current_trend: MarketTrend::Neutral,
            rsi: dec!(50),
            bollinger_position: dec!(0.5),
        }
    }
}

impl Default for TurningPointResult {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBalance {
    pub region: String,
    pub supply: Decimal,
    pub demand: Decimal,
    /// `supply - demand`; positive means surplus tonnage.
    pub balance: Decimal,
    pub classification: BalanceClassification,
    /// In [-100, 100]; positive means upward pressure on rates.
    pub rate_pressure: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBalance {
    pub total_supply: Decimal,
    pub total_demand: Decimal,
    pub balance: Decimal,
    pub classification: BalanceClassification,
    pub rate_pressure: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonnageSupplyDemandResult {
    pub regions: Vec<RegionBalance>,
    pub overall_market: MarketBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageOpportunity {
    pub kind: OpportunityKind,
    pub description: String,
    pub routes: Vec<String>,
    pub differential: Decimal,
    pub estimated_profit: Decimal,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArbitrageResult {
    pub opportunities: Vec<ArbitrageOpportunity>,
}

/// The output of running all four components over one `MarketDataBundle`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIntelligenceReport {
    pub market_share: MarketShareResult,
    pub turning_points: TurningPointResult,
    pub tonnage: TonnageSupplyDemandResult,
    pub arbitrage: ArbitrageResult,
}
