//! Exponential Moving Average (EMA) indicator.
//!
//! The Exponential Moving Average weights recent prices more heavily than a
//! Simple Moving Average, so it responds faster to price changes.
//!
//! # Algorithm
//!
//! O(n) iterative recurrence:
//!
//! 1. The first valid EMA value (at index `window - 1`) is the SMA of the
//!    first `window` elements
//! 2. Subsequent values use `EMA[i] = w × Price[i] + (1 - w) × EMA[i-1]`
//!    where `w = smoothing / (window + 1)`
//!
//! The default smoothing factor is 2.0, giving the standard
//! `w = 2 / (window + 1)`. [`ema_with_smoothing`] exposes the factor for
//! callers that want a heavier or lighter weighting of recent data.
//!
//! # Formula
//!
//! ```text
//! EMA[0..window-2] = NaN (insufficient lookback)
//! EMA[window-1]    = SMA(data[0..window])
//! EMA[i]           = w × Price[i] + (1 - w) × EMA[i-1]
//! ```
//!
//! # Example
//!
//! ```
//! use streakline::indicators::{ema, ema_with_smoothing};
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//!
//! // Standard smoothing factor of 2.0: w = 2/(3+1) = 0.5
//! let result = ema(&data, 3).unwrap();
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10); // SMA seed
//! assert!((result[3] - 3.0).abs() < 1e-10);
//!
//! // Custom smoothing factor
//! let heavy = ema_with_smoothing(&data, 3, 3.0).unwrap();
//! assert!((heavy[3] - 3.5).abs() < 1e-10); // w = 3/4
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_window, SeriesElement};

/// Returns the lookback period for EMA.
///
/// The lookback is the number of NaN values at the start of the output.
#[inline]
#[must_use]
pub const fn ema_lookback(window: usize) -> usize {
    if window == 0 {
        0
    } else {
        window - 1
    }
}

/// Returns the minimum input length required for EMA.
#[inline]
#[must_use]
pub const fn ema_min_len(window: usize) -> usize {
    window
}

/// Computes the Exponential Moving Average with the standard smoothing
/// factor of 2.0 (`w = 2 / (window + 1)`).
///
/// # Arguments
///
/// * `data` - The input price series
/// * `window` - The number of periods for the EMA calculation
///
/// # Returns
///
/// A `Result` containing a `Vec<T>` the same length as the input. The first
/// `window - 1` values are NaN.
///
/// # Errors
///
/// Returns [`Error::Parameter`](crate::error::Error::Parameter) if `window`
/// is zero or exceeds the series length.
///
/// # Performance
///
/// O(n) time, O(n) space for the output vector. The recurrence is iterative;
/// no point is ever re-derived from its whole window.
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    ema_with_smoothing(data, window, T::two())
}

/// Computes the Exponential Moving Average with a caller-supplied smoothing
/// factor (`w = smoothing / (window + 1)`).
///
/// # Arguments
///
/// * `data` - The input price series
/// * `window` - The number of periods for the initial SMA seed
/// * `smoothing` - The smoothing factor; 2.0 is the standard choice
///
/// # Errors
///
/// Returns [`Error::Parameter`](crate::error::Error::Parameter) if:
/// - `smoothing` is not greater than zero (NaN included)
/// - `window` is zero or exceeds the series length
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema_with_smoothing<T: SeriesElement>(
    data: &[T],
    window: usize,
    smoothing: T,
) -> Result<Vec<T>> {
    if smoothing.is_nan() || smoothing <= T::zero() {
        return Err(Error::Parameter {
            name: "smoothing",
            value: smoothing.to_f64().unwrap_or(f64::NAN),
            constraint: "must be greater than 0".to_string(),
        });
    }
    validate_window(data, window)?;

    let alpha = smoothing / T::from_usize(window + 1);
    let one_minus_alpha = T::one() - alpha;

    let mut out = vec![T::nan(); data.len()];

    // SMA seed over the first window
    let mut sum = T::zero();
    let mut seed_has_nan = false;
    for &value in data.iter().take(window) {
        if value.is_nan() {
            seed_has_nan = true;
        } else {
            sum = sum + value;
        }
    }

    let mut prev = if seed_has_nan {
        T::nan()
    } else {
        let seed = sum / T::from_usize(window);
        out[window - 1] = seed;
        seed
    };

    // EMA[i] = w × Price[i] + (1 - w) × EMA[i-1]
    for i in window..data.len() {
        let value = data[i];
        if prev.is_nan() || value.is_nan() {
            prev = T::nan();
        } else {
            prev = alpha * value + one_minus_alpha * prev;
            out[i] = prev;
        }
    }

    Ok(out)
}
