use analytics::{
    calculate_market_share, calculate_tonnage_supply_demand, detect_market_turning_points,
    identify_arbitrage_opportunities, MarketIntelligence,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{
    BalanceClassification, FixtureCountEntry, HeatmapSnapshot, MarketDataBundle, MarketFixtureEntry,
    MarketTrend, OpportunityKind, RateDataPoint, RiskLevel, RouteRate, ShareTrend, SignalDirection,
    SignalStrength, SignalType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap() + Duration::days(offset)
}

fn series(values: &[Decimal]) -> Vec<RateDataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| RateDataPoint { date: day(i as i64), value: *value })
        .collect()
}

fn own(route: &str, count: u64, period: &str) -> FixtureCountEntry {
    FixtureCountEntry {
        route: route.to_string(),
        vessel_type: "Supramax".to_string(),
        count,
        period: period.to_string(),
    }
}

fn market(route: &str, total_count: u64, period: &str) -> MarketFixtureEntry {
    MarketFixtureEntry {
        route: route.to_string(),
        vessel_type: "Supramax".to_string(),
        total_count,
        period: period.to_string(),
    }
}

fn snapshot(region: &str, supply: u64, demand: u64) -> HeatmapSnapshot {
    HeatmapSnapshot {
        region: region.to_string(),
        supply,
        demand,
        period: "2025-01".to_string(),
    }
}

fn route_rate(route: &str, rate: Decimal, vessel_type: &str) -> RouteRate {
    RouteRate {
        route: route.to_string(),
        rate,
        vessel_type: vessel_type.to_string(),
        distance: None,
        duration_days: None,
    }
}

/// A choppy series long enough for every indicator window.
fn choppy_series() -> Vec<RateDataPoint> {
    let values: Vec<Decimal> = (0..90i64)
        .map(|i| {
            let swing = Decimal::from((i * 37) % 23) - dec!(11);
            dec!(12000) + Decimal::from(i * 15) + swing * dec!(40)
        })
        .collect();
    series(&values)
}

fn sample_bundle() -> MarketDataBundle {
    MarketDataBundle {
        own_fixtures: vec![own("ECSA - China", 4, "2025-01"), own("ECSA - China", 9, "2025-02")],
        market_fixtures: vec![market("ECSA - China", 40, "2025-01"), market("ECSA - China", 45, "2025-02")],
        rate_data: choppy_series(),
        heatmap: vec![snapshot("Far East", 80, 120), snapshot("Atlantic", 130, 100)],
        route_rates: vec![
            route_rate("Santos - Qingdao", dec!(21000), "Kamsarmax"),
            route_rate("Qingdao - Newcastle", dec!(17000), "Kamsarmax"),
            route_rate("Newcastle - Santos", dec!(15000), "Kamsarmax"),
            route_rate("US Gulf to Rotterdam", dec!(14000), "Kamsarmax"),
        ],
    }
}

// ==============================================================================
// Market share
// ==============================================================================

#[test]
fn market_share_single_route_scenario() {
    let result = calculate_market_share(&[own("A", 10, "2025-01")], &[market("A", 100, "2025-01")]);
    assert_eq!(result.overall, dec!(10));
    assert_eq!(result.by_route.len(), 1);
    assert_eq!(result.by_route[0].route, "A");
    assert_eq!(result.by_route[0].share, dec!(10));
    assert_eq!(result.by_route[0].trend, ShareTrend::Stable);
}

#[test]
fn market_share_is_zero_when_either_side_is_empty() {
    assert_eq!(calculate_market_share(&[], &[market("A", 100, "2025-01")]).overall, Decimal::ZERO);
    assert_eq!(calculate_market_share(&[own("A", 10, "2025-01")], &[]).overall, Decimal::ZERO);
}

#[test]
fn market_share_full_coverage_is_one_hundred() {
    let result = calculate_market_share(&[own("A", 25, "2025-01")], &[market("A", 25, "2025-01")]);
    assert_eq!(result.overall, dec!(100));
}

#[test]
fn market_share_stays_within_percentage_domain() {
    let result = calculate_market_share(
        &[own("A", 30, "2025-01"), own("B", 500, "2025-01"), own("C", 1, "2025-02")],
        &[market("A", 70, "2025-01"), market("B", 100, "2025-01"), market("C", 3, "2025-02")],
    );
    let shares = std::iter::once(result.overall)
        .chain(result.by_route.iter().map(|r| r.share))
        .chain(result.by_vessel_type.iter().map(|v| v.share));
    for share in shares {
        assert!(share >= Decimal::ZERO && share <= dec!(100), "share {share} out of range");
    }
}

// ==============================================================================
// Turning points
// ==============================================================================

#[test]
fn five_point_series_keeps_neutral_readings() {
    let result = detect_market_turning_points(&series(&[dec!(100), dec!(105), dec!(98), dec!(150), dec!(80)]));
    assert_eq!(result.current_trend, MarketTrend::Neutral);
    assert_eq!(result.rsi, dec!(50));
    assert_eq!(result.bollinger_position, dec!(0.5));

    // Strict neighbours make 105 and 150 resistance levels and 98 a support level.
    let levels: Vec<(DateTime<Utc>, SignalType, SignalDirection, SignalStrength)> = result
        .signals
        .iter()
        .map(|s| (s.date, s.signal_type, s.direction, s.strength))
        .collect();
    assert_eq!(
        levels,
        vec![
            (day(1), SignalType::SupportResistance, SignalDirection::Bearish, SignalStrength::Weak),
            (day(2), SignalType::SupportResistance, SignalDirection::Bullish, SignalStrength::Weak),
            (day(3), SignalType::SupportResistance, SignalDirection::Bearish, SignalStrength::Weak),
        ]
    );
    assert!(result.signals[0].description.contains("105"));
    assert!(result.signals[1].description.contains("98"));
    assert!(result.signals[2].description.contains("150"));
}

#[test]
fn fewer_than_five_points_is_the_neutral_default() {
    let result = detect_market_turning_points(&series(&[dec!(100), dec!(105), dec!(98), dec!(150)]));
    assert!(result.signals.is_empty());
    assert_eq!(result.current_trend, MarketTrend::Neutral);
    assert_eq!(result.rsi, dec!(50));
    assert_eq!(result.bollinger_position, dec!(0.5));
}

#[test]
fn rising_series_is_bullish() {
    let values: Vec<Decimal> = (0..60i64).map(|i| dec!(9000) + Decimal::from(i * 25)).collect();
    let result = detect_market_turning_points(&series(&values));
    assert_eq!(result.current_trend, MarketTrend::Bullish);
    assert_eq!(result.rsi, dec!(100));
}

#[test]
fn readings_stay_within_their_domains() {
    let result = detect_market_turning_points(&choppy_series());
    assert!(result.rsi >= Decimal::ZERO && result.rsi <= dec!(100));
    assert!(result.bollinger_position >= Decimal::ZERO && result.bollinger_position <= Decimal::ONE);
    assert!(result.signals.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

// ==============================================================================
// Tonnage balance
// ==============================================================================

#[test]
fn tight_region_scenario() {
    let result = calculate_tonnage_supply_demand(&[snapshot("West Africa", 50, 100)]);
    let region = &result.regions[0];
    assert_eq!(region.balance, dec!(-50));
    assert_eq!(region.classification, BalanceClassification::Tight);
    assert_eq!(region.rate_pressure, dec!(50));
}

#[test]
fn regions_are_ordered_by_rate_pressure() {
    let result = calculate_tonnage_supply_demand(&[
        snapshot("Atlantic", 130, 100),
        snapshot("Far East", 80, 120),
        snapshot("Indian Ocean", 100, 100),
        snapshot("Baltic", 10, 90),
    ]);
    assert!(result.regions.windows(2).all(|pair| pair[0].rate_pressure >= pair[1].rate_pressure));
    for region in &result.regions {
        let tight = region.demand > Decimal::ZERO && region.supply / region.demand < dec!(0.85);
        assert_eq!(region.classification == BalanceClassification::Tight, tight);
    }
}

// ==============================================================================
// Arbitrage
// ==============================================================================

#[test]
fn pairwise_scenario_is_low_risk() {
    let result = identify_arbitrage_opportunities(&[
        route_rate("Route 1", dec!(100), "Handysize"),
        route_rate("Route 2", dec!(140), "Handysize"),
    ]);
    assert_eq!(result.opportunities.len(), 1);
    assert_eq!(result.opportunities[0].kind, OpportunityKind::RateDifferential);
    assert_eq!(result.opportunities[0].differential, dec!(40));
    assert_eq!(result.opportunities[0].risk_level, RiskLevel::Low);
}

#[test]
fn opportunities_are_ordered_by_estimated_profit() {
    let result = identify_arbitrage_opportunities(&sample_bundle().route_rates);
    assert!(!result.opportunities.is_empty());
    assert!(result
        .opportunities
        .windows(2)
        .all(|pair| pair[0].estimated_profit >= pair[1].estimated_profit));
}

// ==============================================================================
// Idempotence and the combined report
// ==============================================================================

#[test]
fn repeated_calls_give_identical_output() {
    let bundle = sample_bundle();
    let untouched = bundle.clone();
    let engine = MarketIntelligence::default();

    let first = engine.full_report(&bundle);
    let second = engine.full_report(&bundle);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(bundle, untouched);
}

#[test]
fn full_report_matches_individual_components() {
    let bundle = sample_bundle();
    let report = MarketIntelligence::default().full_report(&bundle);

    assert_eq!(report.market_share, calculate_market_share(&bundle.own_fixtures, &bundle.market_fixtures));
    assert_eq!(report.turning_points, detect_market_turning_points(&bundle.rate_data));
    assert_eq!(report.tonnage, calculate_tonnage_supply_demand(&bundle.heatmap));
    assert_eq!(report.arbitrage, identify_arbitrage_opportunities(&bundle.route_rates));
}
