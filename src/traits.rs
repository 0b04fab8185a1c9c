//! Core traits for streakline numeric operations.
//!
//! The primary trait is [`SeriesElement`], which provides a common interface
//! for numeric operations on price series, abstracting over `f32` and `f64`.
//! The module also provides the shared input validators used by every engine.
//!
//! # Example
//!
//! ```
//! use streakline::traits::{SeriesElement, validate_window};
//!
//! fn window_mean<T: SeriesElement>(data: &[T], window: usize) -> streakline::Result<T> {
//!     validate_window(data, window)?;
//!
//!     let sum = data.iter().take(window).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / T::from_usize(window))
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0];
//! assert!((window_mean(&data, 3).unwrap() - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a price series.
///
/// Extends `num_traits::Float` with the conversion helpers and constants the
/// indicator engines need. Undefined values (lookback prefixes, alignment
/// gaps) are represented as `Self::nan()`.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// Used for converting window parameters into the element type.
    #[inline]
    #[must_use]
    fn from_usize(value: usize) -> Self {
        // Safe unwrap: usize is always representable in Float types
        <Self as NumCast>::from(value).unwrap()
    }

    /// Creates a series element from an `f64` value.
    #[inline]
    #[must_use]
    fn from_f64(value: f64) -> Self {
        // Safe unwrap: f64 always converts to Float types (possibly losing precision)
        <Self as NumCast>::from(value).unwrap()
    }

    /// Returns the constant 2 as this type (the standard EMA smoothing numerator).
    #[inline]
    #[must_use]
    fn two() -> Self {
        // Safe unwrap: 2 is always representable in Float types
        <Self as NumCast>::from(2).unwrap()
    }

    /// Returns the constant 100 as this type (percentage scaling for RSI and returns).
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        // Safe unwrap: 100 is always representable in Float types
        <Self as NumCast>::from(100).unwrap()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Validates a lookback window against the data it will slide over.
///
/// # Errors
///
/// Returns [`Error::Parameter`] naming the `window` field when the window is
/// zero or longer than the data.
#[inline]
pub fn validate_window<T: SeriesElement>(data: &[T], window: usize) -> Result<()> {
    if window < 1 {
        return Err(Error::Parameter {
            name: "window",
            value: window as f64,
            constraint: "must be at least 1".to_string(),
        });
    }
    if data.len() < window {
        return Err(Error::Parameter {
            name: "window",
            value: window as f64,
            constraint: format!("exceeds series length {}", data.len()),
        });
    }
    Ok(())
}

/// Validates that the data can support at least `required` points for the
/// named parameter.
///
/// Used where an engine needs more than `window` points (RSI needs one extra
/// observation to form the first difference).
///
/// # Errors
///
/// Returns [`Error::Parameter`] when `data.len() < required`.
#[inline]
pub fn validate_min_len<T: SeriesElement>(
    data: &[T],
    name: &'static str,
    value: usize,
    required: usize,
) -> Result<()> {
    if data.len() < required {
        return Err(Error::Parameter {
            name,
            value: value as f64,
            constraint: format!(
                "requires at least {} points, series has {}",
                required,
                data.len()
            ),
        });
    }
    Ok(())
}
