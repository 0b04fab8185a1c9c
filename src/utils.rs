//! Shared utility functions.
//!
//! Tolerance-based floating-point comparison helpers and NaN counters, used by
//! the test suites and exposed for callers that need to compare derived
//! series.

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point
/// operations (long EMA chains, Wilder smoothing).
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN (so undefined lookback prefixes compare equal).
///
/// # Example
///
/// ```
/// use streakline::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-12, EPSILON));
/// assert!(!approx_eq(1.0, 2.0, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Relative approximate equality check for floating-point values.
///
/// More appropriate than absolute tolerance when comparing values of varying
/// magnitudes.
#[inline]
#[must_use]
pub fn approx_eq_relative<T: SeriesElement>(a: T, b: T, rel_tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }

    let diff = (a - b).abs();
    let max_abs = a.abs().max(b.abs());

    if max_abs == T::zero() {
        return diff == T::zero();
    }

    diff / max_abs < rel_tolerance
}

/// Count the number of NaN values in a slice.
#[inline]
#[must_use]
pub fn count_nans<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Count the NaN values at the start of a slice (the lookback prefix).
///
/// # Example
///
/// ```
/// use streakline::utils::count_nan_prefix;
///
/// let data = vec![f64::NAN, f64::NAN, 1.0, f64::NAN];
/// assert_eq!(count_nan_prefix(&data), 2);
/// ```
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}
