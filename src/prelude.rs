//! Commonly used types and functions for convenient importing.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use streakline::prelude::*;
//!
//! let dates: Vec<NaiveDate> = (1..=10)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let closes: Vec<f64> = (1..=10).map(f64::from).collect();
//! let series = Series::new(dates, closes).unwrap();
//!
//! let sma_result = sma(series.close(), 3).unwrap();
//! let trade = max_profit_window(&series);
//! assert!(trade.is_trade());
//! # let _ = sma_result;
//! ```
//!
//! # Contents
//!
//! - [`Error`] / [`Result`]: the crate-wide error type and alias
//! - [`SeriesElement`]: the numeric trait every engine is generic over
//! - [`Series`] / [`PricePoint`]: the data model, with the preprocessing
//!   helpers [`validate_columns`], [`sort_and_deduplicate`], and [`align`]
//! - The indicator engines and their output types
//! - [`streaks`] / [`streaks_with_dates`] and the streak result types
//! - [`Registry`] and the dispatch parameter types

pub use crate::dispatch::{
    EmaParams, IndicatorKind, IndicatorSpec, MacdParams, Params, Registry, RsiParams, SmaParams,
};
pub use crate::error::{Error, Result};
pub use crate::indicators::{
    daily_return_pct, ema, ema_lookback, ema_min_len, ema_with_smoothing, macd,
    macd_line_lookback, macd_min_len, macd_signal_lookback, max_profit_window, rsi, rsi_lookback,
    rsi_min_len, sma, sma_lookback, sma_min_len, MacdOutput, TradeWindow,
};
pub use crate::series::{align, sort_and_deduplicate, validate_columns, PricePoint, Series};
pub use crate::streak::{
    streaks, streaks_with_dates, StreakReport, StreakResult, StreakSpan, StreakSummary,
};
pub use crate::traits::SeriesElement;
