//! Relative Strength Index (RSI) indicator.
//!
//! The RSI is a momentum oscillator that measures the speed and magnitude of
//! price movements on a scale of 0 to 100.
//!
//! # Algorithm
//!
//! O(n) using Wilder's smoothing:
//!
//! 1. Per-step differences `Change[i] = Price[i] - Price[i-1]`
//! 2. Over the first `window` differences, average gain = mean of positive
//!    changes, average loss = mean of negated negative changes
//! 3. Each later difference updates the averages with Wilder's recurrence:
//!    `Avg[i] = (Avg[i-1] × (window-1) + Current) / window`
//! 4. `RS = Avg Gain / Avg Loss`, `RSI = 100 - 100/(1 + RS)`
//!
//! # Boundary Conditions
//!
//! - All gains (average loss = 0): RSI = 100 exactly
//! - All losses (average gain = 0): RSI = 0
//!
//! # Example
//!
//! ```
//! use streakline::indicators::rsi;
//!
//! let data = vec![44.0_f64, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 43.5, 43.25, 43.0];
//! let result = rsi(&data, 5).unwrap();
//!
//! // First `window` values are NaN
//! assert!(result[4].is_nan());
//! assert!(!result[5].is_nan());
//! assert!(result[5] >= 0.0 && result[5] <= 100.0);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_min_len, SeriesElement};

/// Returns the lookback period for RSI.
///
/// The first `window` output values are NaN: one observation is consumed
/// forming the first difference, and `window` differences seed the averages.
#[inline]
#[must_use]
pub const fn rsi_lookback(window: usize) -> usize {
    window
}

/// Returns the minimum input length required for RSI.
#[inline]
#[must_use]
pub const fn rsi_min_len(window: usize) -> usize {
    window + 1
}

/// Computes the Relative Strength Index using Wilder's smoothing.
///
/// # Arguments
///
/// * `data` - The input price series
/// * `window` - The number of differences in the smoothing period (commonly 14)
///
/// # Returns
///
/// A `Result` containing a `Vec<T>` the same length as the input. The first
/// `window` values are NaN; all defined values lie in [0, 100].
///
/// # Errors
///
/// Returns [`Error::Parameter`](crate::error::Error::Parameter) if:
/// - `window` is zero
/// - the series is shorter than `window + 1`
///
/// # Performance
///
/// O(n) time, O(n) space for the output vector.
#[must_use = "this returns a Result with the RSI values, which should be used"]
pub fn rsi<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    if window < 1 {
        return Err(Error::Parameter {
            name: "window",
            value: window as f64,
            constraint: "must be at least 1".to_string(),
        });
    }
    validate_min_len(data, "window", window, rsi_min_len(window))?;

    let n = data.len();
    let mut out = vec![T::nan(); n];
    let window_t = T::from_usize(window);
    let window_minus_one = T::from_usize(window - 1);

    // Seed: plain means of the first `window` gains and losses.
    let mut gain_sum = T::zero();
    let mut loss_sum = T::zero();
    let mut seed_has_nan = false;
    for i in 1..=window {
        let diff = data[i] - data[i - 1];
        if diff.is_nan() {
            seed_has_nan = true;
        } else if diff > T::zero() {
            gain_sum = gain_sum + diff;
        } else {
            loss_sum = loss_sum - diff;
        }
    }

    let (mut avg_gain, mut avg_loss) = if seed_has_nan {
        (T::nan(), T::nan())
    } else {
        (gain_sum / window_t, loss_sum / window_t)
    };
    out[window] = rsi_value(avg_gain, avg_loss);

    // Wilder smoothing for every later difference.
    for i in (window + 1)..n {
        let diff = data[i] - data[i - 1];
        if diff.is_nan() {
            avg_gain = T::nan();
            avg_loss = T::nan();
        } else {
            let gain = if diff > T::zero() { diff } else { T::zero() };
            let loss = if diff < T::zero() { -diff } else { T::zero() };
            avg_gain = (avg_gain * window_minus_one + gain) / window_t;
            avg_loss = (avg_loss * window_minus_one + loss) / window_t;
        }
        out[i] = rsi_value(avg_gain, avg_loss);
    }

    Ok(out)
}

/// RSI from smoothed averages, handling the zero-loss boundary exactly.
fn rsi_value<T: SeriesElement>(avg_gain: T, avg_loss: T) -> T {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return T::nan();
    }
    if avg_loss == T::zero() {
        return T::hundred();
    }
    let rs = avg_gain / avg_loss;
    T::hundred() - T::hundred() / (T::one() + rs)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::utils::{approx_eq, EPSILON, LOOSE_EPSILON};

    // ==================== Basic Tests ====================

    #[test]
    fn test_rsi_output_shape() {
        let data = vec![44.0_f64, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 43.5];
        let result = rsi(&data, 5).unwrap();

        assert_eq!(result.len(), data.len());
        for i in 0..5 {
            assert!(result[i].is_nan(), "index {i} should be in the lookback");
        }
        for i in 5..data.len() {
            assert!(!result[i].is_nan(), "index {i} should be defined");
        }
    }

    #[test]
    fn test_rsi_bounds() {
        let data = vec![
            50.0_f64, 51.0, 49.5, 52.0, 53.0, 51.5, 50.0, 52.5, 54.0, 53.0, 52.0, 55.0,
        ];
        let result = rsi(&data, 4).unwrap();
        for &v in &result {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI {v} out of bounds");
            }
        }
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let result = rsi(&data, 4).unwrap();
        for i in 4..data.len() {
            assert!(approx_eq(result[i], 100.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let data: Vec<f64> = (1..=10).rev().map(|x| x as f64).collect();
        let result = rsi(&data, 4).unwrap();
        for i in 4..data.len() {
            assert!(approx_eq(result[i], 0.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_flat_series_is_100() {
        // No movement means average loss = 0, which the zero-loss branch
        // pins at 100 rather than dividing by zero.
        let data = vec![5.0_f64; 8];
        let result = rsi(&data, 3).unwrap();
        for i in 3..8 {
            assert!(approx_eq(result[i], 100.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_seed_value_manual() {
        // window 3, diffs: +1, -2, +3 → avg gain = 4/3, avg loss = 2/3
        let data = vec![10.0_f64, 11.0, 9.0, 12.0];
        let result = rsi(&data, 3).unwrap();

        let avg_gain = 4.0 / 3.0;
        let avg_loss = 2.0 / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!(approx_eq(result[3], expected, EPSILON));
    }

    #[test]
    fn test_rsi_wilder_recurrence_manual() {
        // Continue the seed case by one step: diff = -1
        let data = vec![10.0_f64, 11.0, 9.0, 12.0, 11.0];
        let result = rsi(&data, 3).unwrap();

        let avg_gain = (4.0 / 3.0 * 2.0 + 0.0) / 3.0;
        let avg_loss = (2.0 / 3.0 * 2.0 + 1.0) / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!(approx_eq(result[4], expected, EPSILON));
    }

    #[test]
    fn test_rsi_balanced_alternation_near_50() {
        // Equal-magnitude up/down alternation keeps gains ≈ losses
        let mut data = vec![100.0_f64];
        for i in 0..20 {
            let last = *data.last().unwrap();
            data.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        let result = rsi(&data, 4).unwrap();
        let last = *result.last().unwrap();
        assert!((last - 50.0).abs() < 20.0, "expected near-neutral RSI, got {last}");
    }

    #[test]
    fn test_rsi_f32() {
        let data = vec![10.0_f32, 11.0, 9.0, 12.0, 11.5];
        let result = rsi(&data, 3).unwrap();
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
        assert!(result[3] >= 0.0 && result[3] <= 100.0);
    }

    #[test]
    fn test_rsi_window_one() {
        let data = vec![1.0_f64, 2.0, 1.5, 3.0];
        let result = rsi(&data, 1).unwrap();
        assert!(result[0].is_nan());
        // Single-diff windows put RSI at the rails
        assert!(approx_eq(result[1], 100.0, LOOSE_EPSILON));
        assert!(approx_eq(result[2], 0.0, LOOSE_EPSILON));
        assert!(approx_eq(result[3], 100.0, LOOSE_EPSILON));
    }

    // ==================== NaN Handling Tests ====================

    #[test]
    fn test_rsi_nan_poisons_smoothing() {
        let data = vec![10.0_f64, 11.0, 12.0, f64::NAN, 13.0, 14.0];
        let result = rsi(&data, 2).unwrap();
        assert!(!result[2].is_nan());
        // Differences touching the NaN, and everything after, are undefined
        // because the smoothed averages depend on the full history.
        for i in 3..6 {
            assert!(result[i].is_nan());
        }
    }

    // ==================== Error Handling Tests ====================

    #[test]
    fn test_rsi_zero_window() {
        let data = vec![1.0_f64, 2.0, 3.0];
        assert!(matches!(
            rsi(&data, 0),
            Err(Error::Parameter { name: "window", .. })
        ));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let data = vec![1.0_f64, 2.0, 3.0];
        // window 3 needs 4 points
        assert!(matches!(
            rsi(&data, 3),
            Err(Error::Parameter { name: "window", .. })
        ));
    }

    #[test]
    fn test_rsi_exact_minimum_length() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0];
        let result = rsi(&data, 3).unwrap();
        assert!(!result[3].is_nan());
    }

    // ==================== Lookback Tests ====================

    #[test]
    fn test_rsi_lookback_and_min_len() {
        assert_eq!(rsi_lookback(14), 14);
        assert_eq!(rsi_min_len(14), 15);
    }
}
