use crate::indicators::{local_extremes, rsi_series, sma_series, BollingerBand};
use crate::math::{clamp, round2, round_dp};
use chrono::{DateTime, Utc};
use configuration::TurningPointParams;
use core_types::{
    MarketSignal, MarketTrend, RateDataPoint, SignalDirection, SignalStrength, SignalType,
    TurningPointResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Runs the SMA crossover, RSI, Bollinger breakout and support/resistance
/// indicators over a rate series and collects their signals.
///
/// Input order does not matter; points are sorted by date first and every
/// index below refers to that order. Series shorter than
/// `params.min_points` produce [`TurningPointResult::neutral`].
pub fn detect_market_turning_points(
    rate_data: &[RateDataPoint],
    params: &TurningPointParams,
) -> TurningPointResult {
    if rate_data.len() < params.min_points {
        return TurningPointResult::neutral();
    }

    let mut sorted: Vec<&RateDataPoint> = rate_data.iter().collect();
    sorted.sort_by_key(|point| point.date);
    let series = Series {
        values: sorted.iter().map(|p| p.value).collect(),
        dates: sorted.iter().map(|p| p.date).collect(),
    };

    tracing::debug!(points = series.len(), "Detecting market turning points.");

    let sma_fast = sma_series(&series.values, params.sma_fast_period);
    let sma_slow = sma_series(&series.values, params.sma_slow_period);
    let rsi = rsi_series(&series.values, params.rsi_period);

    // Emission order matters: the final date sort is stable.
    let mut signals = Vec::new();
    sma_crossover_signals(&series, &sma_fast, &sma_slow, params, &mut signals);
    rsi_signals(&series, &rsi, params, &mut signals);
    bollinger_signals(&series, params, &mut signals);
    support_resistance_signals(&series, params, &mut signals);
    signals.sort_by_key(|signal| signal.date);

    let current_trend = match (sma_fast.last().copied().flatten(), sma_slow.last().copied().flatten()) {
        (Some(fast), Some(slow)) if fast > slow => MarketTrend::Bullish,
        (Some(fast), Some(slow)) if fast < slow => MarketTrend::Bearish,
        _ => MarketTrend::Neutral,
    };

    let latest_rsi = rsi.iter().rev().find_map(|value| *value).unwrap_or(dec!(50));

    tracing::debug!(
        signals = signals.len(),
        trend = %current_trend,
        rsi = %latest_rsi,
        "Turning point detection complete."
    );

    TurningPointResult {
        signals,
        current_trend,
        rsi: clamp(latest_rsi, Decimal::ZERO, Decimal::ONE_HUNDRED),
        bollinger_position: bollinger_position(&series.values, params),
    }
}

/// Chronologically sorted values with their dates.
struct Series {
    values: Vec<Decimal>,
    dates: Vec<DateTime<Utc>>,
}

impl Series {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn signal(
        &self,
        index: usize,
        signal_type: SignalType,
        direction: SignalDirection,
        strength: SignalStrength,
        description: String,
    ) -> MarketSignal {
        tracing::trace!(%signal_type, %direction, %strength, index, "Signal emitted.");
        MarketSignal {
            date: self.dates[index],
            signal_type,
            direction,
            strength,
            description,
        }
    }
}

/// Golden and death crosses: only the bar where the relationship flips emits.
fn sma_crossover_signals(
    series: &Series,
    fast: &[Option<Decimal>],
    slow: &[Option<Decimal>],
    params: &TurningPointParams,
    signals: &mut Vec<MarketSignal>,
) {
    for i in 1..series.len() {
        let (Some(prev_fast), Some(curr_fast), Some(prev_slow), Some(curr_slow)) =
            (fast[i - 1], fast[i], slow[i - 1], slow[i])
        else {
            continue;
        };

        if prev_fast <= prev_slow && curr_fast > curr_slow {
            signals.push(series.signal(
                i,
                SignalType::SmaCrossover,
                SignalDirection::Bullish,
                SignalStrength::Strong,
                format!(
                    "Golden Cross: {}-period SMA ({}) crossed above {}-period SMA ({})",
                    params.sma_fast_period,
                    round2(curr_fast),
                    params.sma_slow_period,
                    round2(curr_slow)
                ),
            ));
        }

        if prev_fast >= prev_slow && curr_fast < curr_slow {
            signals.push(series.signal(
                i,
                SignalType::SmaCrossover,
                SignalDirection::Bearish,
                SignalStrength::Strong,
                format!(
                    "Death Cross: {}-period SMA ({}) crossed below {}-period SMA ({})",
                    params.sma_fast_period,
                    round2(curr_fast),
                    params.sma_slow_period,
                    round2(curr_slow)
                ),
            ));
        }
    }
}

/// Signals on the bar where RSI enters overbought or oversold territory.
fn rsi_signals(
    series: &Series,
    rsi: &[Option<Decimal>],
    params: &TurningPointParams,
    signals: &mut Vec<MarketSignal>,
) {
    for i in 1..series.len() {
        let (Some(prev), Some(curr)) = (rsi[i - 1], rsi[i]) else {
            continue;
        };

        if curr > params.rsi_overbought && prev <= params.rsi_overbought {
            let strength = if curr > params.rsi_extreme_overbought {
                SignalStrength::Strong
            } else {
                SignalStrength::Moderate
            };
            signals.push(series.signal(
                i,
                SignalType::Rsi,
                SignalDirection::Bearish,
                strength,
                format!("RSI overbought at {curr}: potential bearish reversal"),
            ));
        }

        if curr < params.rsi_oversold && prev >= params.rsi_oversold {
            let strength = if curr < params.rsi_extreme_oversold {
                SignalStrength::Strong
            } else {
                SignalStrength::Moderate
            };
            signals.push(series.signal(
                i,
                SignalType::Rsi,
                SignalDirection::Bullish,
                strength,
                format!("RSI oversold at {curr}: potential bullish reversal"),
            ));
        }
    }
}

/// Breakouts beyond the trailing band. The previous value is judged against
/// the current bar's band.
fn bollinger_signals(series: &Series, params: &TurningPointParams, signals: &mut Vec<MarketSignal>) {
    let period = params.bb_period;
    if period == 0 {
        return;
    }

    for i in (period - 1).max(1)..series.len() {
        let band = BollingerBand::over(&series.values[i + 1 - period..=i], params.bb_std_dev);
        let (value, prev) = (series.values[i], series.values[i - 1]);
        let strong_offset = params.bb_strong_std_dev * band.std_dev;

        if value > band.upper && prev <= band.upper {
            let strength = if value > band.middle + strong_offset {
                SignalStrength::Strong
            } else {
                SignalStrength::Moderate
            };
            signals.push(series.signal(
                i,
                SignalType::BollingerBreakout,
                SignalDirection::Bearish,
                strength,
                format!(
                    "Upper Bollinger Band breakout at {} (band: {})",
                    round2(value),
                    round2(band.upper)
                ),
            ));
        }

        if value < band.lower && prev >= band.lower {
            let strength = if value < band.middle - strong_offset {
                SignalStrength::Strong
            } else {
                SignalStrength::Moderate
            };
            signals.push(series.signal(
                i,
                SignalType::BollingerBreakout,
                SignalDirection::Bullish,
                strength,
                format!(
                    "Lower Bollinger Band breakout at {} (band: {})",
                    round2(value),
                    round2(band.lower)
                ),
            ));
        }
    }
}

/// The most recent local minima (support) and maxima (resistance).
fn support_resistance_signals(
    series: &Series,
    params: &TurningPointParams,
    signals: &mut Vec<MarketSignal>,
) {
    let extremes = local_extremes(&series.values);
    let keep = params.support_resistance_levels;

    for &i in most_recent(&extremes.minima, keep) {
        signals.push(series.signal(
            i,
            SignalType::SupportResistance,
            SignalDirection::Bullish,
            SignalStrength::Weak,
            format!("Support level identified at {}", round2(series.values[i])),
        ));
    }

    for &i in most_recent(&extremes.maxima, keep) {
        signals.push(series.signal(
            i,
            SignalType::SupportResistance,
            SignalDirection::Bearish,
            SignalStrength::Weak,
            format!("Resistance level identified at {}", round2(series.values[i])),
        ));
    }
}

fn most_recent(indices: &[usize], keep: usize) -> &[usize] {
    &indices[indices.len().saturating_sub(keep)..]
}

/// Position of the latest value inside the final window's band, in [0, 1].
fn bollinger_position(values: &[Decimal], params: &TurningPointParams) -> Decimal {
    let period = params.bb_period;
    let (Some(last), true) = (values.last(), period > 0 && values.len() >= period) else {
        return dec!(0.5);
    };

    let band = BollingerBand::over(&values[values.len() - period..], params.bb_std_dev);
    match band.position(*last) {
        Some(position) => round_dp(clamp(position, Decimal::ZERO, Decimal::ONE), 3),
        None => dec!(0.5),
    }
}
