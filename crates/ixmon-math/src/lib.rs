//! Deterministic percentage and average helpers.
//!
//! Every helper rounds to the nearest whole unit with ties going away from
//! zero (`f64::round`), never truncating.

#![forbid(unsafe_code)]

/// Round a non-negative floating point value to the nearest whole unit.
///
/// Negative and non-finite inputs collapse to zero.
#[must_use]
pub fn round_whole(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round() as u64
}

/// Percentage of `numer` over `denom`, with the denominator floored at 1.
///
/// `floored_pct(x, 0)` is `round(x * 100)`, so an empty population with an
/// empty numerator reports 0 without special-casing the output.
#[must_use]
pub fn floored_pct(numer: usize, denom: usize) -> u32 {
    let pct = numer as f64 / denom.max(1) as f64 * 100.0;
    round_whole(pct).min(u64::from(u32::MAX)) as u32
}

/// Mean of `sum` over `count` items, with the count floored at 1.
#[must_use]
pub fn floored_avg(sum: u64, count: usize) -> u64 {
    round_whole(sum as f64 / count.max(1) as f64)
}

/// Share of `count` within `total` as a whole percentage.
///
/// Returns `None` when `total` is zero: there is nothing to take a share of.
#[must_use]
pub fn share_pct(count: usize, total: usize) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let pct = count as f64 / total as f64 * 100.0;
    Some(round_whole(pct).min(u64::from(u32::MAX)) as u32)
}
