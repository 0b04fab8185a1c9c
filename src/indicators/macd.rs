//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! MACD tracks the gap between a fast and a slow EMA of the closes, plus an
//! EMA of that gap (the signal line) and their difference (the histogram).
//!
//! # Algorithm
//!
//! 1. `macd_line = ema(close, fast) - ema(close, slow)`, defined from index
//!    `slow - 1` onward
//! 2. `signal_line = ema(macd_line from its first defined index, signal)`,
//!    left-padded with NaN to stay index-aligned with the input
//! 3. `histogram = macd_line - signal_line`
//!
//! # Example
//!
//! ```
//! use streakline::indicators::macd;
//!
//! let data: Vec<f64> = (1..=40).map(|x| x as f64 + (x as f64 * 0.7).sin()).collect();
//! let out = macd(&data, 12, 26, 9).unwrap();
//!
//! assert_eq!(out.macd.len(), data.len());
//! assert!(out.macd[24].is_nan());
//! assert!(!out.macd[25].is_nan());
//! // histogram = macd - signal wherever both are defined
//! assert!((out.histogram[35] - (out.macd[35] - out.signal[35])).abs() < 1e-10);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_min_len, SeriesElement};

use super::ema::ema;

/// The three parallel MACD output series, each the same length as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T: SeriesElement> {
    /// Fast EMA minus slow EMA.
    pub macd: Vec<T>,
    /// EMA of the MACD line over the signal window.
    pub signal: Vec<T>,
    /// MACD line minus signal line.
    pub histogram: Vec<T>,
}

/// Returns the lookback of the MACD line: `slow - 1`.
#[inline]
#[must_use]
pub const fn macd_line_lookback(slow: usize) -> usize {
    if slow == 0 {
        0
    } else {
        slow - 1
    }
}

/// Returns the lookback of the signal line (and histogram):
/// `slow + signal - 2`.
#[inline]
#[must_use]
pub const fn macd_signal_lookback(slow: usize, signal: usize) -> usize {
    macd_line_lookback(slow) + signal.saturating_sub(1)
}

/// Returns the minimum input length required for MACD.
#[inline]
#[must_use]
pub const fn macd_min_len(slow: usize, signal: usize) -> usize {
    slow + signal
}

/// Computes MACD line, signal line, and histogram.
///
/// # Arguments
///
/// * `data` - The input price series
/// * `fast` - Window of the fast EMA (commonly 12)
/// * `slow` - Window of the slow EMA (commonly 26); must exceed `fast`
/// * `signal` - Window of the EMA applied to the MACD line (commonly 9)
///
/// # Returns
///
/// A `Result` containing a [`MacdOutput`] whose three series are all the same
/// length as the input. The MACD line is NaN before index `slow - 1`; the
/// signal line and histogram are NaN before index `slow + signal - 2`.
///
/// # Errors
///
/// Returns [`Error::Parameter`](crate::error::Error::Parameter) if:
/// - any of `fast`, `slow`, `signal` is zero
/// - `fast >= slow`
/// - the series is shorter than `slow + signal`
#[must_use = "this returns a Result with the MACD output, which should be used"]
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdOutput<T>> {
    for (name, value) in [("fast", fast), ("slow", slow), ("signal", signal)] {
        if value < 1 {
            return Err(Error::Parameter {
                name,
                value: value as f64,
                constraint: "must be at least 1".to_string(),
            });
        }
    }
    if fast >= slow {
        return Err(Error::Parameter {
            name: "fast",
            value: fast as f64,
            constraint: format!("must be less than slow period {slow}"),
        });
    }
    validate_min_len(data, "slow", slow, macd_min_len(slow, signal))?;

    let fast_ema = ema(data, fast)?;
    let slow_ema = ema(data, slow)?;

    // NaN lookbacks propagate through the subtraction, so the MACD line is
    // defined exactly where the slow EMA is.
    let macd_line: Vec<T> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(&f, &s)| f - s)
        .collect();

    // The signal EMA runs over the defined suffix of the MACD line, then is
    // left-padded back to the input's index space.
    let first_valid = macd_line_lookback(slow);
    let suffix_signal = ema(&macd_line[first_valid..], signal)?;
    let mut signal_line = vec![T::nan(); first_valid];
    signal_line.extend(suffix_signal);

    let histogram: Vec<T> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&m, &s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}
