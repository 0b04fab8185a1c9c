//! Indicator engines.
//!
//! Pure, synchronous transformations from a price slice to a derived series
//! of the same length. All engines share the crate's conventions:
//!
//! - **Generic**: work with `f32` and `f64` via
//!   [`SeriesElement`](crate::traits::SeriesElement)
//! - **Iterative**: O(n) recurrences, never per-point re-derivation
//! - **NaN-prefixed**: undefined lookback positions are NaN, so outputs stay
//!   index-aligned with the input dates
//! - **Fail-fast**: parameter-domain violations return a typed
//!   [`Error::Parameter`](crate::error::Error::Parameter), never a clamped
//!   result
//!
//! # Example
//!
//! ```
//! use streakline::indicators::{sma, ema, rsi};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let sma_result = sma(&prices, 5).unwrap();
//! let ema_result = ema(&prices, 5).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//!
//! assert_eq!(sma_result.len(), prices.len());
//! assert!(sma_result[3].is_nan());
//! assert!(!sma_result[4].is_nan());
//! # let _ = (ema_result, rsi_result);
//! ```

pub mod ema;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;

pub use ema::{ema, ema_lookback, ema_min_len, ema_with_smoothing};
pub use macd::{macd, macd_line_lookback, macd_min_len, macd_signal_lookback, MacdOutput};
pub use returns::{daily_return_pct, max_profit_window, TradeWindow};
pub use rsi::{rsi, rsi_lookback, rsi_min_len};
pub use sma::{sma, sma_lookback, sma_min_len};
