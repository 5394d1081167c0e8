//! # Market Intelligence Analytics
//!
//! This crate turns raw fixture, rate and capacity observations into decision-support
//! signals: market share, trend turning points, tonnage balance and arbitrage opportunities.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O and knows nothing
//!   about where its inputs come from. It depends only on `core-types` and `configuration`.
//! - **Stateless Calculation:** Every component is a function of its inputs and parameters.
//!   Results are built fresh on each call, so the components can run in any order or in
//!   parallel with the same outcome.
//! - **No Failure Modes:** Degenerate input (empty sequences, zero denominators, short
//!   series) has an explicit default result. The only error is rejecting invalid
//!   parameters when a `MarketIntelligence` engine is built.
//!
//! ## Public API
//!
//! - `calculate_market_share`, `detect_market_turning_points`,
//!   `calculate_tonnage_supply_demand`, `identify_arbitrage_opportunities`: the four
//!   components with reference parameters.
//! - `MarketIntelligence`: the same components over a validated `AnalyticsConfig`, plus
//!   `full_report` for a whole `MarketDataBundle`.
//! - `AnalyticsError`: the specific error type that can be returned from this crate.

pub mod arbitrage;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod market_share;
pub mod math;
pub mod tonnage;
pub mod turning_points;

pub use arbitrage::parse_route;
pub use engine::MarketIntelligence;
pub use error::AnalyticsError;
pub use tonnage::{classify_balance, rate_pressure};

use configuration::{ArbitrageParams, MarketShareParams, TonnageParams, TurningPointParams};
use core_types::{
    ArbitrageResult, FixtureCountEntry, HeatmapSnapshot, MarketFixtureEntry, MarketShareResult,
    RateDataPoint, RouteRate, TonnageSupplyDemandResult, TurningPointResult,
};

/// Own fixture counts as a percentage of the market, overall, per route and per
/// vessel type, using the reference trend tolerance.
pub fn calculate_market_share(
    own_fixtures: &[FixtureCountEntry],
    market_fixtures: &[MarketFixtureEntry],
) -> MarketShareResult {
    market_share::calculate_market_share(own_fixtures, market_fixtures, &MarketShareParams::default())
}

/// SMA crossover, RSI, Bollinger and support/resistance signals over a rate series,
/// using the reference windows and thresholds.
pub fn detect_market_turning_points(rate_data: &[RateDataPoint]) -> TurningPointResult {
    turning_points::detect_market_turning_points(rate_data, &TurningPointParams::default())
}

/// Regional and overall supply/demand balance using the reference tight/oversupplied bands.
pub fn calculate_tonnage_supply_demand(snapshots: &[HeatmapSnapshot]) -> TonnageSupplyDemandResult {
    tonnage::calculate_tonnage_supply_demand(snapshots, &TonnageParams::default())
}

/// Rate differentials, triangulations and ballast bonuses using the reference thresholds.
pub fn identify_arbitrage_opportunities(rates: &[RouteRate]) -> ArbitrageResult {
    arbitrage::identify_arbitrage_opportunities(rates, &ArbitrageParams::default())
}
