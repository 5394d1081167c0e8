//! Numeric helpers shared by every component.
//!
//! All rounding in the crate goes through [`round_dp`] so the components cannot
//! drift apart on midpoint handling.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

pub(crate) const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds half away from zero to `dp` decimal places.
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the 2 decimal places used by every reported figure.
pub fn round2(value: Decimal) -> Decimal {
    round_dp(value, 2)
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let count = Decimal::from(values.len());
    match checked_sum(values.iter().copied()) {
        Some(total) => total / count,
        // Dividing first keeps every partial sum below the largest input.
        None => values.iter().map(|v| *v / count).sum(),
    }
}

/// Sample standard deviation (divides by n - 1); zero with fewer than 2 values.
pub fn sample_std_dev(values: &[Decimal]) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }
    let avg = mean(values);
    let degrees = Decimal::from(values.len() - 1);

    let squares = checked_sum(values.iter().map(|v| {
        let deviation = *v - avg;
        deviation.checked_mul(deviation).unwrap_or(Decimal::MAX)
    }))
    .filter(|total| *total < Decimal::MAX);

    // A non-negative variance always has a root; zero keeps callers on their no-band paths.
    match squares {
        Some(total) => (total / degrees).sqrt().unwrap_or(Decimal::ZERO),
        None => rescaled_std_dev(values, avg, degrees),
    }
}

/// Standard deviation for series whose squared deviations overflow `Decimal`.
///
/// Deviations are divided by the largest one, so every square is at most 1,
/// and the root is scaled back up.
fn rescaled_std_dev(values: &[Decimal], avg: Decimal, degrees: Decimal) -> Decimal {
    let scale = values.iter().map(|v| (*v - avg).abs()).max().unwrap_or(Decimal::ZERO);
    if scale.is_zero() {
        return Decimal::ZERO;
    }
    let unit_squares: Decimal = values
        .iter()
        .map(|v| {
            let unit = (*v - avg) / scale;
            unit * unit
        })
        .sum();
    (unit_squares / degrees)
        .sqrt()
        .and_then(|root| scale.checked_mul(root))
        .unwrap_or(Decimal::ZERO)
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
}

/// `100 * part / whole`, or zero when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part / whole * HUNDRED
}

pub fn clamp(value: Decimal, lower: Decimal, upper: Decimal) -> Decimal {
    value.max(lower).min(upper)
}
