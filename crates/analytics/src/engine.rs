use crate::arbitrage::identify_arbitrage_opportunities;
use crate::error::AnalyticsError;
use crate::market_share::calculate_market_share;
use crate::tonnage::calculate_tonnage_supply_demand;
use crate::turning_points::detect_market_turning_points;
use configuration::AnalyticsConfig;
use core_types::{
    ArbitrageResult, FixtureCountEntry, HeatmapSnapshot, MarketDataBundle, MarketFixtureEntry,
    MarketIntelligenceReport, MarketShareResult, RateDataPoint, RouteRate, TonnageSupplyDemandResult,
    TurningPointResult,
};

/// A stateless calculator bundling the four market intelligence components
/// with one validated set of parameters.
///
/// Every method is pure: inputs are borrowed, never modified, and each call
/// builds a fresh result.
#[derive(Debug, Clone, Default)]
pub struct MarketIntelligence {
    config: AnalyticsConfig,
}

impl MarketIntelligence {
    /// Creates an engine with custom parameters, rejecting degenerate ones.
    pub fn new(config: AnalyticsConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn market_share(
        &self,
        own_fixtures: &[FixtureCountEntry],
        market_fixtures: &[MarketFixtureEntry],
    ) -> MarketShareResult {
        calculate_market_share(own_fixtures, market_fixtures, &self.config.market_share)
    }

    pub fn turning_points(&self, rate_data: &[RateDataPoint]) -> TurningPointResult {
        detect_market_turning_points(rate_data, &self.config.turning_points)
    }

    pub fn tonnage_balance(&self, snapshots: &[HeatmapSnapshot]) -> TonnageSupplyDemandResult {
        calculate_tonnage_supply_demand(snapshots, &self.config.tonnage)
    }

    pub fn arbitrage(&self, rates: &[RouteRate]) -> ArbitrageResult {
        identify_arbitrage_opportunities(rates, &self.config.arbitrage)
    }

    /// Runs all four components over one bundle.
    ///
    /// The components share nothing, so they run in parallel on the rayon pool;
    /// the report is identical to running them one after another.
    #[tracing::instrument(name = "market_intelligence_report", skip_all)]
    pub fn full_report(&self, bundle: &MarketDataBundle) -> MarketIntelligenceReport {
        let ((market_share, turning_points), (tonnage, arbitrage)) = rayon::join(
            || {
                rayon::join(
                    || self.market_share(&bundle.own_fixtures, &bundle.market_fixtures),
                    || self.turning_points(&bundle.rate_data),
                )
            },
            || {
                rayon::join(
                    || self.tonnage_balance(&bundle.heatmap),
                    || self.arbitrage(&bundle.route_rates),
                )
            },
        );

        tracing::info!(
            overall_share = %market_share.overall,
            trend = %turning_points.current_trend,
            signals = turning_points.signals.len(),
            market = %tonnage.overall_market.classification,
            opportunities = arbitrage.opportunities.len(),
            "Market intelligence report ready."
        );

        MarketIntelligenceReport {
            market_share,
            turning_points,
            tonnage,
            arbitrage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut config = AnalyticsConfig::default();
        config.turning_points.rsi_overbought = dec!(20);
        assert!(matches!(
            MarketIntelligence::new(config),
            Err(AnalyticsError::InvalidParameters(_))
        ));
    }

    #[test]
    fn custom_parameters_change_results() {
        let mut config = AnalyticsConfig::default();
        config.tonnage.tight_ratio = dec!(0.4);
        let engine = MarketIntelligence::new(config).unwrap();

        let snapshots = [HeatmapSnapshot {
            region: "West Africa".to_string(),
            supply: 50,
            demand: 100,
            period: "2025-01".to_string(),
        }];
        let result = engine.tonnage_balance(&snapshots);
        assert_eq!(result.regions[0].classification, core_types::BalanceClassification::Balanced);
    }

    #[test]
    fn empty_bundle_gives_default_report() {
        let report = MarketIntelligence::default().full_report(&MarketDataBundle::default());
        assert_eq!(report, MarketIntelligenceReport::default());
    }
}
