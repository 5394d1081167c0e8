//! Terminal tables for the `--format table` output.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{
    ArbitrageResult, MarketIntelligenceReport, MarketShareResult, TonnageSupplyDemandResult,
    TurningPointResult,
};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn market_share(result: &MarketShareResult) -> String {
    let mut routes = table(vec!["Route", "Share %", "Trend"]);
    for route in &result.by_route {
        routes.add_row(vec![route.route.clone(), route.share.to_string(), route.trend.to_string()]);
    }

    let mut vessel_types = table(vec!["Vessel Type", "Share %", "Trend"]);
    for vessel_type in &result.by_vessel_type {
        vessel_types.add_row(vec![
            vessel_type.vessel_type.clone(),
            vessel_type.share.to_string(),
            vessel_type.trend.to_string(),
        ]);
    }

    format!("Overall market share: {}%\n{routes}\n{vessel_types}", result.overall)
}

pub fn turning_points(result: &TurningPointResult) -> String {
    let mut signals = table(vec!["Date", "Type", "Direction", "Strength", "Description"]);
    for signal in &result.signals {
        signals.add_row(vec![
            signal.date.format("%Y-%m-%d").to_string(),
            signal.signal_type.to_string(),
            signal.direction.to_string(),
            signal.strength.to_string(),
            signal.description.clone(),
        ]);
    }

    format!(
        "Trend: {} | RSI: {} | Bollinger position: {}\n{signals}",
        result.current_trend, result.rsi, result.bollinger_position
    )
}

pub fn tonnage(result: &TonnageSupplyDemandResult) -> String {
    let mut regions = table(vec!["Region", "Supply", "Demand", "Balance", "Classification", "Rate Pressure"]);
    for region in &result.regions {
        regions.add_row(vec![
            region.region.clone(),
            region.supply.to_string(),
            region.demand.to_string(),
            region.balance.to_string(),
            region.classification.to_string(),
            region.rate_pressure.to_string(),
        ]);
    }

    let overall = &result.overall_market;
    regions.add_row(vec![
        "TOTAL".to_string(),
        overall.total_supply.to_string(),
        overall.total_demand.to_string(),
        overall.balance.to_string(),
        overall.classification.to_string(),
        overall.rate_pressure.to_string(),
    ]);
    regions.to_string()
}

pub fn arbitrage(result: &ArbitrageResult) -> String {
    let mut opportunities = table(vec!["Kind", "Routes", "Differential", "Est. Profit", "Risk", "Description"]);
    for opportunity in &result.opportunities {
        opportunities.add_row(vec![
            opportunity.kind.to_string(),
            opportunity.routes.join(" | "),
            opportunity.differential.to_string(),
            opportunity.estimated_profit.to_string(),
            opportunity.risk_level.to_string(),
            opportunity.description.clone(),
        ]);
    }
    opportunities.to_string()
}

pub fn report(report: &MarketIntelligenceReport) -> String {
    [
        format!("== Market Share ==\n{}", market_share(&report.market_share)),
        format!("== Turning Points ==\n{}", turning_points(&report.turning_points)),
        format!("== Tonnage Balance ==\n{}", tonnage(&report.tonnage)),
        format!("== Arbitrage ==\n{}", arbitrage(&report.arbitrage)),
    ]
    .join("\n\n")
}
