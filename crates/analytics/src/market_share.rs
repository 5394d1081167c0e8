use crate::math::{clamp, mean, percentage, round2, HUNDRED};
use configuration::MarketShareParams;
use core_types::{
    FixtureCountEntry, MarketFixtureEntry, MarketShareResult, PeriodKey, RouteShare, ShareTrend,
    VesselTypeShare,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Compares an organization's fixture counts to the whole market, overall,
/// per route and per vessel type.
///
/// Either input being empty yields the zero result. Dimension lists are
/// sorted by share, highest first.
pub fn calculate_market_share(
    own_fixtures: &[FixtureCountEntry],
    market_fixtures: &[MarketFixtureEntry],
    params: &MarketShareParams,
) -> MarketShareResult {
    if own_fixtures.is_empty() || market_fixtures.is_empty() {
        return MarketShareResult::default();
    }

    tracing::debug!(
        own = own_fixtures.len(),
        market = market_fixtures.len(),
        "Calculating market share."
    );

    let total_own: Decimal = own_fixtures.iter().map(|e| Decimal::from(e.count)).sum();
    let total_market: Decimal = market_fixtures.iter().map(|e| Decimal::from(e.total_count)).sum();
    let overall = share_pct(total_own, total_market);

    let by_route = DimensionTable::build(
        own_fixtures.iter().map(|e| (e.route.as_str(), e.period.as_str(), e.count)),
        market_fixtures.iter().map(|e| (e.route.as_str(), e.period.as_str(), e.total_count)),
    )
    .shares(params)
    .into_iter()
    .map(|(route, share, trend)| RouteShare { route, share, trend })
    .collect();

    let by_vessel_type = DimensionTable::build(
        own_fixtures.iter().map(|e| (e.vessel_type.as_str(), e.period.as_str(), e.count)),
        market_fixtures.iter().map(|e| (e.vessel_type.as_str(), e.period.as_str(), e.total_count)),
    )
    .shares(params)
    .into_iter()
    .map(|(vessel_type, share, trend)| VesselTypeShare { vessel_type, share, trend })
    .collect();

    MarketShareResult {
        overall,
        by_route,
        by_vessel_type,
    }
}

/// Rounded share in percent, kept inside [0, 100].
fn share_pct(own: Decimal, market: Decimal) -> Decimal {
    clamp(round2(percentage(own, market)), Decimal::ZERO, HUNDRED)
}

/// Own and market counts for one dimension value, per period.
#[derive(Debug, Default)]
struct PeriodCounts {
    own: Decimal,
    market: Decimal,
}

/// Dimension values in first-encounter order, each with a chronological period map.
#[derive(Debug, Default)]
struct DimensionTable {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    periods: Vec<BTreeMap<PeriodKey, PeriodCounts>>,
}

impl DimensionTable {
    fn build<'a>(
        own: impl Iterator<Item = (&'a str, &'a str, u64)>,
        market: impl Iterator<Item = (&'a str, &'a str, u64)>,
    ) -> Self {
        let mut table = Self::default();
        for (key, period, count) in own {
            table.entry(key, period).own += Decimal::from(count);
        }
        for (key, period, count) in market {
            table.entry(key, period).market += Decimal::from(count);
        }
        table
    }

    fn entry(&mut self, key: &str, period: &str) -> &mut PeriodCounts {
        let slot = match self.index.get(key) {
            Some(slot) => *slot,
            None => {
                self.keys.push(key.to_string());
                self.periods.push(BTreeMap::new());
                self.index.insert(key.to_string(), self.keys.len() - 1);
                self.keys.len() - 1
            }
        };
        self.periods[slot].entry(PeriodKey::parse(period)).or_default()
    }

    /// `(key, share, trend)` per dimension value, sorted by share descending.
    fn shares(self, params: &MarketShareParams) -> Vec<(String, Decimal, ShareTrend)> {
        let mut shares: Vec<_> = self
            .keys
            .into_iter()
            .zip(self.periods)
            .map(|(key, periods)| {
                let own: Decimal = periods.values().map(|c| c.own).sum();
                let market: Decimal = periods.values().map(|c| c.market).sum();
                let series: Vec<Decimal> = periods
                    .values()
                    .map(|c| percentage(c.own, c.market))
                    .collect();
                (key, share_pct(own, market), detect_share_trend(&series, params))
            })
            .collect();

        // Stable: equal shares keep first-encounter order.
        shares.sort_by(|a, b| b.1.cmp(&a.1));
        shares
    }
}

/// Compares the latest period's share to the mean of all earlier periods.
fn detect_share_trend(series: &[Decimal], params: &MarketShareParams) -> ShareTrend {
    let Some((latest, prior)) = series.split_last() else {
        return ShareTrend::Stable;
    };
    if prior.is_empty() {
        return ShareTrend::Stable;
    }

    let prior_mean = mean(prior);
    let tolerance = params.trend_tolerance_pct / HUNDRED;
    if *latest > prior_mean * (Decimal::ONE + tolerance) {
        ShareTrend::Increasing
    } else if *latest < prior_mean * (Decimal::ONE - tolerance) {
        ShareTrend::Decreasing
    } else {
        ShareTrend::Stable
    }
}
