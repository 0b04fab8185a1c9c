//! Simple Moving Average (SMA) indicator.
//!
//! The Simple Moving Average is the arithmetic mean of the last `window`
//! closes ending at each index.
//!
//! # Algorithm
//!
//! This implementation computes SMA with O(n) time complexity using a rolling
//! sum: each step adds the entering value and subtracts the value that left
//! the window, rather than re-averaging the whole window per point.
//!
//! # Formula
//!
//! ```text
//! SMA[0..window-2] = NaN (insufficient lookback)
//! SMA[i] = mean(data[i-window+1 ..= i])
//! ```
//!
//! # Example
//!
//! ```
//! use streakline::indicators::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! assert!((result[4] - 4.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::traits::{validate_window, SeriesElement};

/// Returns the lookback period for SMA.
///
/// The lookback is the number of NaN values at the start of the output.
#[inline]
#[must_use]
pub const fn sma_lookback(window: usize) -> usize {
    if window == 0 {
        0
    } else {
        window - 1
    }
}

/// Returns the minimum input length required for SMA.
///
/// This is the smallest input size that will produce at least one valid
/// output.
#[inline]
#[must_use]
pub const fn sma_min_len(window: usize) -> usize {
    window
}

/// Computes the Simple Moving Average.
///
/// # Arguments
///
/// * `data` - The input price series
/// * `window` - The number of trailing points to average
///
/// # Returns
///
/// A `Result` containing a `Vec<T>` the same length as the input. The first
/// `window - 1` values are NaN. A NaN inside the input keeps every window it
/// touches undefined without poisoning later windows.
///
/// # Errors
///
/// Returns [`Error::Parameter`](crate::error::Error::Parameter) if:
/// - `window` is zero
/// - `window` exceeds the series length
///
/// # Performance
///
/// O(n) time, O(n) space for the output vector.
#[must_use = "this returns a Result with the SMA values, which should be used"]
pub fn sma<T: SeriesElement>(data: &[T], window: usize) -> Result<Vec<T>> {
    validate_window(data, window)?;

    let mut out = vec![T::nan(); data.len()];
    let window_t = T::from_usize(window);

    // Rolling sum over the trailing window; NaN entries are tracked by count
    // so they mark their windows undefined without corrupting the sum.
    let mut sum = T::zero();
    let mut nans_in_window = 0usize;

    for i in 0..data.len() {
        let entering = data[i];
        if entering.is_nan() {
            nans_in_window += 1;
        } else {
            sum = sum + entering;
        }

        if i >= window {
            let leaving = data[i - window];
            if leaving.is_nan() {
                nans_in_window -= 1;
            } else {
                sum = sum - leaving;
            }
        }

        if i + 1 >= window && nans_in_window == 0 {
            out[i] = sum / window_t;
        }
    }

    Ok(out)
}
