use crate::math::{clamp, mean, round2, HUNDRED};
use configuration::TonnageParams;
use core_types::{
    BalanceClassification, HeatmapSnapshot, MarketBalance, RegionBalance, TonnageSupplyDemandResult,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Averages each region's snapshots into a supply/demand balance, classifies it
/// and scores the resulting pressure on freight rates.
///
/// Regions come back with the highest rate pressure first. The overall market
/// is the sum of the per-region averages, scored with the same formulas.
pub fn calculate_tonnage_supply_demand(
    snapshots: &[HeatmapSnapshot],
    params: &TonnageParams,
) -> TonnageSupplyDemandResult {
    if snapshots.is_empty() {
        return TonnageSupplyDemandResult::default();
    }

    // Region name -> (supplies, demands), in first-encounter order.
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, (Vec<Decimal>, Vec<Decimal>)> = HashMap::new();
    for snapshot in snapshots {
        let entry = grouped.entry(snapshot.region.as_str()).or_insert_with(|| {
            order.push(snapshot.region.as_str());
            (Vec::new(), Vec::new())
        });
        entry.0.push(Decimal::from(snapshot.supply));
        entry.1.push(Decimal::from(snapshot.demand));
    }

    let mut regions: Vec<RegionBalance> = order
        .iter()
        .filter_map(|region| grouped.get(region).map(|obs| (*region, obs)))
        .map(|(region, (supplies, demands))| {
            let supply = round2(mean(supplies));
            let demand = round2(mean(demands));
            RegionBalance {
                region: region.to_string(),
                supply,
                demand,
                balance: round2(supply - demand),
                classification: classify_balance(supply, demand, params),
                rate_pressure: rate_pressure(supply, demand),
            }
        })
        .collect();

    let total_supply = round2(regions.iter().map(|r| r.supply).sum());
    let total_demand = round2(regions.iter().map(|r| r.demand).sum());

    // Stable: regions with equal pressure keep first-encounter order.
    regions.sort_by(|a, b| b.rate_pressure.cmp(&a.rate_pressure));

    let overall_market = MarketBalance {
        total_supply,
        total_demand,
        balance: round2(total_supply - total_demand),
        classification: classify_balance(total_supply, total_demand, params),
        rate_pressure: rate_pressure(total_supply, total_demand),
    };

    tracing::debug!(
        regions = regions.len(),
        classification = %overall_market.classification,
        pressure = %overall_market.rate_pressure,
        "Tonnage balance computed."
    );

    TonnageSupplyDemandResult {
        regions,
        overall_market,
    }
}

/// Classifies by the supply/demand ratio. The band edges themselves are `balanced`.
pub fn classify_balance(supply: Decimal, demand: Decimal, params: &TonnageParams) -> BalanceClassification {
    if demand.is_zero() {
        return if supply > Decimal::ZERO {
            BalanceClassification::Oversupplied
        } else {
            BalanceClassification::Balanced
        };
    }

    let ratio = supply / demand;
    if ratio < params.tight_ratio {
        BalanceClassification::Tight
    } else if ratio > params.oversupplied_ratio {
        BalanceClassification::Oversupplied
    } else {
        BalanceClassification::Balanced
    }
}

/// Relative excess of demand over supply in [-100, 100]; positive pushes rates up.
pub fn rate_pressure(supply: Decimal, demand: Decimal) -> Decimal {
    let larger = supply.max(demand);
    if larger.is_zero() {
        return Decimal::ZERO;
    }
    round2(clamp((demand - supply) / larger * HUNDRED, -HUNDRED, HUNDRED))
}
