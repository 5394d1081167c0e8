//! Indicator series over a chronologically sorted value slice.
//!
//! Every series has the same length as its input; `None` marks positions where
//! the indicator is not yet defined.

use crate::math::{mean, round2, sample_std_dev, HUNDRED};
use rust_decimal::Decimal;

/// Simple moving average; defined from index `window - 1` onwards.
pub fn sma_series(values: &[Decimal], window: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; values.len()];
    if window == 0 {
        return result;
    }

    let divisor = Decimal::from(window);
    let mut running = Decimal::ZERO;
    for (i, value) in values.iter().enumerate() {
        running += *value;
        if i >= window {
            running -= values[i - window];
        }
        if i + 1 >= window {
            result[i] = Some(running / divisor);
        }
    }
    result
}

/// Relative Strength Index with Wilder smoothing, rounded to 2 decimals.
///
/// The first `period` day-over-day changes seed the average gain and loss, so
/// the first value sits at index `period`. When the average loss is zero the
/// RSI is reported as exactly 100.
pub fn rsi_series(values: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return result;
    }

    let n = Decimal::from(period);
    let smoothing = Decimal::from(period - 1);
    let mut avg_gain = Decimal::ZERO;
    let mut avg_loss = Decimal::ZERO;

    for (i, pair) in values.windows(2).enumerate() {
        let change = pair[1] - pair[0];
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);

        if i < period {
            avg_gain += gain;
            avg_loss += loss;
            if i + 1 < period {
                continue;
            }
            avg_gain /= n;
            avg_loss /= n;
        } else {
            avg_gain = (avg_gain * smoothing + gain) / n;
            avg_loss = (avg_loss * smoothing + loss) / n;
        }

        result[i + 1] = Some(relative_strength_index(avg_gain, avg_loss));
    }
    result
}

fn relative_strength_index(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        return HUNDRED;
    }
    let rs = avg_gain / avg_loss;
    round2(HUNDRED - HUNDRED / (Decimal::ONE + rs))
}

/// A mean +/- k sigma envelope over one trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BollingerBand {
    pub middle: Decimal,
    pub std_dev: Decimal,
    pub upper: Decimal,
    pub lower: Decimal,
}

impl BollingerBand {
    /// Builds the band over `window` using the sample standard deviation.
    pub fn over(window: &[Decimal], width: Decimal) -> Self {
        let middle = mean(window);
        let std_dev = sample_std_dev(window);
        Self {
            middle,
            std_dev,
            upper: middle + width * std_dev,
            lower: middle - width * std_dev,
        }
    }

    /// Fractional position of `value` between the bands, if the band has width.
    pub fn position(&self, value: Decimal) -> Option<Decimal> {
        let width = self.upper - self.lower;
        if width <= Decimal::ZERO {
            return None;
        }
        Some((value - self.lower) / width)
    }
}

/// Indices of strict local minima and maxima (first and last points never qualify).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalExtremes {
    pub minima: Vec<usize>,
    pub maxima: Vec<usize>,
}

pub fn local_extremes(values: &[Decimal]) -> LocalExtremes {
    let mut extremes = LocalExtremes::default();
    for (offset, triple) in values.windows(3).enumerate() {
        let (prev, current, next) = (triple[0], triple[1], triple[2]);
        if current < prev && current < next {
            extremes.minima.push(offset + 1);
        }
        if current > prev && current > next {
            extremes.maxima.push(offset + 1);
        }
    }
    extremes
}
