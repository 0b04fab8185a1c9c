//! Daily percentage returns and the optimal single-trade window.
//!
//! Two related computations over a close-price series:
//!
//! - [`daily_return_pct`]: day-over-day percentage change, the input every
//!   streak analysis consumes
//! - [`max_profit_window`]: the single buy/sell pair that would have maximized
//!   profit, found in one pass with a running minimum
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use streakline::indicators::{daily_return_pct, max_profit_window};
//! use streakline::series::Series;
//!
//! let dates: Vec<NaiveDate> = (1..=6)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let series = Series::new(dates, vec![7.0_f64, 1.0, 5.0, 3.0, 6.0, 4.0]).unwrap();
//!
//! let returns = daily_return_pct(series.close());
//! assert!(returns[0].is_nan());
//!
//! let trade = max_profit_window(&series);
//! assert_eq!(trade.profit, 5.0); // buy at 1, sell at 6
//! ```

use chrono::NaiveDate;

use crate::series::Series;
use crate::traits::SeriesElement;

/// The best single buy/sell pair found in a price series.
///
/// When no profitable trade exists (prices non-increasing throughout, or
/// fewer than two points), `profit` is zero and the dates and prices are
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeWindow<T: SeriesElement> {
    /// Date of the optimal purchase, if a profitable trade exists.
    pub buy_date: Option<NaiveDate>,
    /// Date of the optimal sale.
    pub sell_date: Option<NaiveDate>,
    /// Close on the buy date.
    pub buy_price: Option<T>,
    /// Close on the sell date.
    pub sell_price: Option<T>,
    /// Sell price minus buy price; zero when no trade exists.
    pub profit: T,
    /// Profit relative to the buy price, in percent; zero when no trade
    /// exists or the buy price is not positive.
    pub profit_pct: T,
}

impl<T: SeriesElement> TradeWindow<T> {
    fn none() -> Self {
        Self {
            buy_date: None,
            sell_date: None,
            buy_price: None,
            sell_price: None,
            profit: T::zero(),
            profit_pct: T::zero(),
        }
    }

    /// True when a profitable trade was found.
    #[must_use]
    pub fn is_trade(&self) -> bool {
        self.buy_date.is_some()
    }
}

/// Computes the day-over-day percentage change of each close.
///
/// The output is the same length as the input. Index 0 is NaN (no previous
/// close), and any step whose previous close is zero is NaN rather than
/// ±infinity. NaN inputs propagate into the steps that touch them.
#[must_use]
pub fn daily_return_pct<T: SeriesElement>(close: &[T]) -> Vec<T> {
    let mut out = vec![T::nan(); close.len()];
    for i in 1..close.len() {
        let prev = close[i - 1];
        if prev == T::zero() {
            continue;
        }
        out[i] = (close[i] - prev) / prev * T::hundred();
    }
    out
}

/// Finds the buy/sell pair maximizing profit in a single left-to-right pass.
///
/// Tracks the running minimum close and its date; each later close is a sell
/// candidate against that minimum. Strict comparisons mean the earliest of
/// several equally good windows wins, and the minimum only moves on a new
/// strict low. NaN closes are skipped entirely.
///
/// Returns [`TradeWindow::none`]-shaped output (zero profit, no dates) when
/// the series has fewer than two finite closes or never rises.
#[must_use]
pub fn max_profit_window<T: SeriesElement>(series: &Series<T>) -> TradeWindow<T> {
    let mut best = TradeWindow::none();

    let mut min_price: Option<(T, NaiveDate)> = None;
    for (i, &price) in series.close().iter().enumerate() {
        if price.is_nan() {
            continue;
        }
        let date = series.dates()[i];
        match min_price {
            None => min_price = Some((price, date)),
            Some((low, low_date)) => {
                let profit = price - low;
                if profit > best.profit {
                    best.profit = profit;
                    best.buy_date = Some(low_date);
                    best.sell_date = Some(date);
                    best.buy_price = Some(low);
                    best.sell_price = Some(price);
                    best.profit_pct = if low > T::zero() {
                        profit / low * T::hundred()
                    } else {
                        T::zero()
                    };
                }
                if price < low {
                    min_price = Some((price, date));
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    fn series_of(closes: Vec<f64>) -> Series<f64> {
        let dates: Vec<NaiveDate> = (0..closes.len())
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
            .collect();
        Series::new(dates, closes).unwrap()
    }

    // ==================== Daily Return Tests ====================

    #[test]
    fn test_daily_return_basic() {
        let result = daily_return_pct(&[100.0_f64, 110.0, 99.0]);
        assert!(result[0].is_nan());
        assert!(approx_eq(result[1], 10.0, EPSILON));
        assert!(approx_eq(result[2], -10.0, EPSILON));
    }

    #[test]
    fn test_daily_return_zero_previous_close() {
        let result = daily_return_pct(&[0.0_f64, 5.0, 10.0]);
        assert!(result[0].is_nan());
        // Division by a zero close is undefined, not infinite
        assert!(result[1].is_nan());
        assert!(approx_eq(result[2], 100.0, EPSILON));
    }

    #[test]
    fn test_daily_return_nan_propagation() {
        let result = daily_return_pct(&[10.0_f64, f64::NAN, 12.0]);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }

    #[test]
    fn test_daily_return_empty_and_single() {
        assert!(daily_return_pct::<f64>(&[]).is_empty());
        let single = daily_return_pct(&[5.0_f64]);
        assert_eq!(single.len(), 1);
        assert!(single[0].is_nan());
    }

    // ==================== Max Profit Tests ====================

    #[test]
    fn test_max_profit_classic_case() {
        // Buy at 1, sell at 6; the 1→5 and 3→6 windows are smaller
        let series = series_of(vec![7.0, 1.0, 5.0, 3.0, 6.0, 4.0]);
        let trade = max_profit_window(&series);

        assert!(trade.is_trade());
        assert!(approx_eq(trade.profit, 5.0, EPSILON));
        assert_eq!(trade.buy_price, Some(1.0));
        assert_eq!(trade.sell_price, Some(6.0));
        assert_eq!(
            trade.buy_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
        assert_eq!(
            trade.sell_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert!(approx_eq(trade.profit_pct, 500.0, EPSILON));
    }

    #[test]
    fn test_max_profit_non_increasing_is_no_trade() {
        let series = series_of(vec![9.0, 7.0, 5.0, 5.0, 3.0]);
        let trade = max_profit_window(&series);

        assert!(!trade.is_trade());
        assert_eq!(trade.profit, 0.0);
        assert_eq!(trade.profit_pct, 0.0);
        assert_eq!(trade.buy_date, None);
        assert_eq!(trade.sell_date, None);
        assert_eq!(trade.buy_price, None);
        assert_eq!(trade.sell_price, None);
    }

    #[test]
    fn test_max_profit_earliest_window_wins_tie() {
        // Two windows with profit 4: (1→5) and (2→6). The first wins.
        let series = series_of(vec![1.0, 5.0, 2.0, 6.0]);
        let trade = max_profit_window(&series);

        assert!(approx_eq(trade.profit, 4.0, EPSILON));
        assert_eq!(
            trade.buy_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(
            trade.sell_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_max_profit_minimum_moves_only_on_strict_low() {
        // The repeated low must keep its first date
        let series = series_of(vec![3.0, 1.0, 1.0, 4.0]);
        let trade = max_profit_window(&series);

        assert!(approx_eq(trade.profit, 3.0, EPSILON));
        assert_eq!(
            trade.buy_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_max_profit_skips_nan_closes() {
        let series = series_of(vec![5.0, f64::NAN, 1.0, f64::NAN, 6.0]);
        let trade = max_profit_window(&series);

        assert!(approx_eq(trade.profit, 5.0, EPSILON));
        assert_eq!(trade.buy_price, Some(1.0));
        assert_eq!(trade.sell_price, Some(6.0));
    }

    #[test]
    fn test_max_profit_short_inputs() {
        let empty = max_profit_window(&series_of(vec![]));
        assert!(!empty.is_trade());

        let single = max_profit_window(&series_of(vec![5.0]));
        assert!(!single.is_trade());
        assert_eq!(single.profit, 0.0);
    }

    #[test]
    fn test_max_profit_pct_relative_to_buy() {
        let series = series_of(vec![10.0, 15.0]);
        let trade = max_profit_window(&series);
        assert!(approx_eq(trade.profit, 5.0, EPSILON));
        assert!(approx_eq(trade.profit_pct, 50.0, EPSILON));
    }
}
