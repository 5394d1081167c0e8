use crate::math::{mean, percentage, round2, sample_std_dev, HUNDRED};
use configuration::ArbitrageParams;
use core_types::{ArbitrageOpportunity, ArbitrageResult, OpportunityKind, RiskLevel, RouteRate};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Separator characters between the two ends of a route name.
const ROUTE_SEPARATORS: [char; 5] = ['-', '–', '—', '>', '→'];

/// Scans route rates for three kinds of opportunity: large differentials
/// between routes of the same vessel type, closed three-leg triangles that
/// out-earn their best single leg per day, and rates far enough above their
/// vessel-type mean to justify a ballast leg.
///
/// Opportunities come back ordered by estimated profit, highest first.
pub fn identify_arbitrage_opportunities(rates: &[RouteRate], params: &ArbitrageParams) -> ArbitrageResult {
    if rates.len() < 2 {
        return ArbitrageResult::default();
    }

    let by_vessel_type = group_by_vessel_type(rates);

    let mut opportunities = Vec::new();
    rate_differentials(&by_vessel_type, params, &mut opportunities);
    let differential_count = opportunities.len();
    triangulations(rates, params, &mut opportunities);
    let triangle_count = opportunities.len() - differential_count;
    ballast_bonuses(&by_vessel_type, params, &mut opportunities);

    tracing::debug!(
        rates = rates.len(),
        vessel_types = by_vessel_type.len(),
        differentials = differential_count,
        triangles = triangle_count,
        ballast = opportunities.len() - differential_count - triangle_count,
        "Arbitrage scan complete."
    );

    opportunities.sort_by(|a, b| b.estimated_profit.cmp(&a.estimated_profit));
    ArbitrageResult { opportunities }
}

/// Rates grouped by vessel type, in first-encounter order.
fn group_by_vessel_type(rates: &[RouteRate]) -> Vec<(&str, Vec<&RouteRate>)> {
    let mut groups: Vec<(&str, Vec<&RouteRate>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for rate in rates {
        let slot = *index.entry(rate.vessel_type.as_str()).or_insert_with(|| {
            groups.push((rate.vessel_type.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(rate);
    }
    groups
}

/// The route's voyage duration, if it is known and positive.
fn known_duration(rate: &RouteRate) -> Option<Decimal> {
    rate.duration_days.filter(|days| *days > Decimal::ZERO)
}

fn duration_or_default(rate: &RouteRate, params: &ArbitrageParams) -> Decimal {
    known_duration(rate).unwrap_or(params.default_duration_days)
}

// ==============================================================================
// 1. Rate differentials within a vessel type
// ==============================================================================

fn rate_differentials(
    by_vessel_type: &[(&str, Vec<&RouteRate>)],
    params: &ArbitrageParams,
    opportunities: &mut Vec<ArbitrageOpportunity>,
) {
    for (vessel_type, type_rates) in by_vessel_type {
        if type_rates.len() < 2 {
            continue;
        }

        let mut sorted = type_rates.clone();
        sorted.sort_by(|a, b| b.rate.cmp(&a.rate));

        for (i, high) in sorted.iter().enumerate() {
            for low in &sorted[i + 1..] {
                if low.rate <= Decimal::ZERO {
                    continue;
                }
                let differential = round2(high.rate - low.rate);
                let diff_pct = round2(differential / low.rate * HUNDRED);
                if diff_pct <= params.pairwise_min_pct {
                    continue;
                }

                let durations: Vec<Decimal> = [known_duration(high), known_duration(low)]
                    .into_iter()
                    .flatten()
                    .collect();
                let voyage_days = if durations.is_empty() {
                    params.default_duration_days
                } else {
                    mean(&durations)
                };

                let risk_level = if diff_pct > params.pairwise_low_risk_pct {
                    RiskLevel::Low
                } else if diff_pct > params.pairwise_medium_risk_pct {
                    RiskLevel::Medium
                } else {
                    RiskLevel::High
                };

                opportunities.push(ArbitrageOpportunity {
                    kind: OpportunityKind::RateDifferential,
                    description: format!(
                        "Rate differential: {} ({}) vs {} ({}) for {}: {}% premium",
                        high.route,
                        round2(high.rate),
                        low.route,
                        round2(low.rate),
                        vessel_type,
                        diff_pct
                    ),
                    routes: vec![high.route.clone(), low.route.clone()],
                    differential,
                    estimated_profit: round2(differential * voyage_days),
                    risk_level,
                });
            }
        }
    }
}

// ==============================================================================
// 2. Triangulation
// ==============================================================================

/// Splits a route name into lower-cased `(origin, destination)`.
///
/// Accepts a dash, en/em dash, `>` or arrow between the ends, or the word
/// "to" (any case). Anything that does not leave exactly two non-empty ends
/// is rejected.
pub fn parse_route(route: &str) -> Option<(String, String)> {
    let mut ends = Vec::new();
    for piece in route.split(ROUTE_SEPARATORS.as_slice()) {
        let mut words: Vec<&str> = Vec::new();
        for word in piece.split_whitespace() {
            if word.eq_ignore_ascii_case("to") {
                ends.push(words.join(" "));
                words.clear();
            } else {
                words.push(word);
            }
        }
        ends.push(words.join(" "));
    }

    let mut ends = ends
        .into_iter()
        .map(|end| end.trim().to_lowercase())
        .filter(|end| !end.is_empty());

    match (ends.next(), ends.next(), ends.next()) {
        (Some(origin), Some(destination), None) => Some((origin, destination)),
        _ => None,
    }
}

/// A parsed route leg.
struct Leg<'a> {
    origin: String,
    destination: String,
    rate: &'a RouteRate,
}

fn triangulations(rates: &[RouteRate], params: &ArbitrageParams, opportunities: &mut Vec<ArbitrageOpportunity>) {
    // One leg per route name: the last observation wins, the first position is kept.
    let mut legs: Vec<Leg> = Vec::new();
    for rate in rates {
        let Some((origin, destination)) = parse_route(&rate.route) else {
            tracing::debug!(route = %rate.route, "Route name has no origin/destination pair; skipped for triangulation.");
            continue;
        };
        let leg = Leg { origin, destination, rate };
        match legs.iter().position(|existing| existing.rate.route == rate.route) {
            Some(slot) => legs[slot] = leg,
            None => legs.push(leg),
        }
    }

    let uplift = Decimal::ONE + params.triangulation_min_uplift_pct / HUNDRED;

    for (a, leg_a) in legs.iter().enumerate() {
        for (b, leg_b) in legs.iter().enumerate() {
            if a == b || leg_a.destination != leg_b.origin {
                continue;
            }
            for (c, leg_c) in legs.iter().enumerate() {
                if c == a || c == b || leg_b.destination != leg_c.origin || leg_c.destination != leg_a.origin {
                    continue;
                }

                let triangle = [leg_a.rate, leg_b.rate, leg_c.rate];
                let total_rate: Decimal = triangle.iter().map(|r| r.rate).sum();
                let total_days: Decimal = triangle.iter().map(|r| duration_or_default(r, params)).sum();
                let triangle_per_day = total_rate / total_days;

                // First leg carrying the highest rate; its own duration sets the single-leg yield.
                let best = triangle
                    .iter()
                    .copied()
                    .fold(triangle[0], |best, leg| if leg.rate > best.rate { leg } else { best });
                let single_per_day = best.rate / duration_or_default(best, params);

                if triangle_per_day <= single_per_day * uplift {
                    continue;
                }

                let differential = round2(triangle_per_day - single_per_day);
                opportunities.push(ArbitrageOpportunity {
                    kind: OpportunityKind::Triangulation,
                    description: format!(
                        "Triangulation: {} -> {} -> {} yields {}/day vs {}/day single route",
                        leg_a.rate.route,
                        leg_b.rate.route,
                        leg_c.rate.route,
                        round2(triangle_per_day),
                        round2(single_per_day)
                    ),
                    routes: triangle.iter().map(|r| r.route.clone()).collect(),
                    differential,
                    estimated_profit: round2(differential * total_days),
                    risk_level: RiskLevel::Medium,
                });
            }
        }
    }
}

// ==============================================================================
// 3. Ballast bonus outliers
// ==============================================================================

fn ballast_bonuses(
    by_vessel_type: &[(&str, Vec<&RouteRate>)],
    params: &ArbitrageParams,
    opportunities: &mut Vec<ArbitrageOpportunity>,
) {
    for (vessel_type, type_rates) in by_vessel_type {
        if type_rates.len() < params.outlier_min_observations {
            continue;
        }

        let values: Vec<Decimal> = type_rates.iter().map(|r| r.rate).collect();
        let avg_rate = mean(&values);
        let std_dev = sample_std_dev(&values);
        if std_dev.is_zero() {
            continue;
        }
        let threshold = avg_rate + params.outlier_std_devs * std_dev;
        let ballast_cost = round2(avg_rate * params.ballast_cost_ratio);

        for rate in type_rates.iter().filter(|r| r.rate > threshold) {
            let premium = round2(rate.rate - avg_rate);
            let premium_pct = round2(percentage(premium, avg_rate));
            let net_profit = round2(premium - ballast_cost);
            if net_profit <= Decimal::ZERO {
                tracing::trace!(route = %rate.route, %premium, %ballast_cost, "Outlier premium does not cover the ballast leg.");
                continue;
            }

            let risk_level = if premium_pct > params.ballast_low_risk_pct {
                RiskLevel::Low
            } else if premium_pct > params.ballast_medium_risk_pct {
                RiskLevel::Medium
            } else {
                RiskLevel::High
            };

            opportunities.push(ArbitrageOpportunity {
                kind: OpportunityKind::BallastBonus,
                description: format!(
                    "Ballast bonus opportunity: {} ({}) at {}, {}% above market avg ({}). Net after estimated ballast: {}",
                    rate.route,
                    vessel_type,
                    round2(rate.rate),
                    premium_pct,
                    round2(avg_rate),
                    net_profit
                ),
                routes: vec![rate.route.clone()],
                differential: premium,
                estimated_profit: round2(net_profit * duration_or_default(rate, params)),
                risk_level,
            });
        }
    }
}
