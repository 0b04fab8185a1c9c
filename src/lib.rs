//! streakline: indicator computation and streak detection for daily price series
//!
//! This crate computes standard technical indicators over dated close-price
//! series and finds the longest noise-tolerant up/down streaks in the
//! resulting daily returns.
//!
//! # Features
//!
//! - **Performance**: O(n) iterative recurrences throughout, never a
//!   per-point re-derivation
//! - **Alignment**: every output stays index-aligned with its dates; lookback
//!   positions are NaN rather than dropped
//! - **Generics**: works with both `f32` and `f64` data types
//! - **Safety**: typed errors for every parameter-domain violation, no
//!   clamping or best-effort partial results
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use streakline::prelude::*;
//!
//! let dates: Vec<NaiveDate> = (1..=30)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let closes: Vec<f64> = (1..=30).map(|i| 100.0 + f64::from(i)).collect();
//! let series = Series::new(dates, closes).unwrap();
//!
//! // Compute an indicator through the registry
//! let registry = Registry::standard();
//! let series = registry.apply(series, "dailyr", &[]).unwrap();
//!
//! // Find the longest streaks in the daily returns
//! let returns = series.column("DailyR").unwrap();
//! let summary = streaks(returns, 1, 0.5).unwrap();
//! assert_eq!(summary.up.length, 29);
//! ```
//!
//! # Components
//!
//! - [`series`]: the [`Series`](series::Series) data model plus the
//!   preprocessing boundary (column validation, sort/deduplicate, alignment)
//! - [`indicators`]: SMA, EMA, RSI, MACD, daily returns, and the optimal
//!   single-trade window
//! - [`streak`]: tolerance- and threshold-aware longest-run detection
//! - [`dispatch`]: the closed indicator registry and idempotent `apply`
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](error::Result):
//!
//! ```
//! use streakline::indicators::sma;
//!
//! let short_data = vec![1.0_f64, 2.0];
//! assert!(sma(&short_data, 10).is_err());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod dispatch;
pub mod error;
pub mod indicators;
pub mod prelude;
pub mod series;
pub mod streak;
pub mod traits;
pub mod utils;

pub use error::{Error, Result};
