//! Price series data model and preprocessing utilities.
//!
//! A [`Series`] is an ordered run of (date, close) observations plus any
//! number of named derived columns, all index-aligned with the dates. Engines
//! never mutate a series in place; each computation produces a new series (or
//! a new parallel vector), so dates stay aligned through every engine call.
//!
//! The free functions in this module are the contract boundary with the
//! excluded upload/fetch layer:
//!
//! - [`validate_columns`] rejects tables missing a required field
//! - [`sort_and_deduplicate`] establishes the strictly-increasing-dates invariant
//! - [`align`] reindexes several series onto a shared date axis
//!
//! # Undefined values
//!
//! Derived columns carry a NaN prefix where the computation's lookback window
//! is not yet filled, and [`align`] leaves NaN in the close column before a
//! series' own first observation. Those are the only places a non-finite
//! value is expected to appear; [`sort_and_deduplicate`] drops any incoming
//! point whose close is NaN or infinite.

use chrono::NaiveDate;
use tracing::trace;

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// A single dated close-price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint<T: SeriesElement> {
    /// Calendar date of the observation (timezone-normalized by the caller).
    pub date: NaiveDate,
    /// Closing price. Finite after preprocessing.
    pub close: T,
}

impl<T: SeriesElement> PricePoint<T> {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: NaiveDate, close: T) -> Self {
        Self { date, close }
    }
}

/// An ordered sequence of price points with named derived columns.
///
/// All columns (close included) have identical length and share the date
/// index. Derived columns preserve insertion order, which is the display
/// order callers see.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use streakline::series::{PricePoint, Series};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let series: Series<f64> = Series::from_points(vec![
///     PricePoint::new(d(1), 10.0),
///     PricePoint::new(d(2), 11.0),
/// ]);
///
/// assert_eq!(series.len(), 2);
/// assert!(!series.has_column("SMA_20"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T: SeriesElement = f64> {
    dates: Vec<NaiveDate>,
    close: Vec<T>,
    derived: Vec<(String, Vec<T>)>,
}

impl<T: SeriesElement> Series<T> {
    /// Creates a series from parallel date and close vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parameter`] when the vectors differ in length.
    pub fn new(dates: Vec<NaiveDate>, close: Vec<T>) -> Result<Self> {
        if dates.len() != close.len() {
            return Err(Error::Parameter {
                name: "close",
                value: close.len() as f64,
                constraint: format!("must match dates length {}", dates.len()),
            });
        }
        Ok(Self {
            dates,
            close,
            derived: Vec::new(),
        })
    }

    /// Creates a series from a sequence of price points.
    ///
    /// The points are taken as-is; run [`sort_and_deduplicate`] first when the
    /// input comes from an untrusted upload.
    #[must_use]
    pub fn from_points(points: Vec<PricePoint<T>>) -> Self {
        let mut dates = Vec::with_capacity(points.len());
        let mut close = Vec::with_capacity(points.len());
        for p in points {
            dates.push(p.date);
            close.push(p.close);
        }
        Self {
            dates,
            close,
            derived: Vec::new(),
        }
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the date index.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the close-price column.
    #[must_use]
    pub fn close(&self) -> &[T] {
        &self.close
    }

    /// Returns a derived column by name, or `None` if absent.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[T]> {
        self.derived
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Returns `true` if a derived column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.derived.iter().any(|(n, _)| n == name)
    }

    /// Returns the derived column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.derived.iter().map(|(n, _)| n.as_str())
    }

    /// Attaches a derived column, replacing any existing column of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parameter`] when the column length does not match the
    /// series length.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<T>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(Error::Parameter {
                name: "column",
                value: values.len() as f64,
                constraint: format!("must match series length {}", self.len()),
            });
        }
        let name = name.into();
        if let Some(slot) = self.derived.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = values;
        } else {
            self.derived.push((name, values));
        }
        Ok(self)
    }

    /// Returns an iterator over the (date, close) observations.
    pub fn points(&self) -> impl Iterator<Item = PricePoint<T>> + '_ {
        self.dates
            .iter()
            .zip(self.close.iter())
            .map(|(&date, &close)| PricePoint { date, close })
    }
}

/// Checks that every required field name appears in a table's header row.
///
/// Matching is case-insensitive (`"close"`, `"Close"`, and `"CLOSE"` all
/// satisfy a `"Close"` requirement), mirroring how uploaded CSVs arrive with
/// inconsistent casing.
///
/// # Errors
///
/// Returns [`Error::Schema`] naming the first required column not found.
///
/// # Example
///
/// ```
/// use streakline::series::validate_columns;
///
/// assert!(validate_columns(&["date", "close", "volume"], &["Date", "Close"]).is_ok());
/// assert!(validate_columns(&["date"], &["Date", "Close"]).is_err());
/// ```
pub fn validate_columns<S: AsRef<str>>(headers: &[S], required: &[&str]) -> Result<()> {
    for &req in required {
        let found = headers
            .iter()
            .any(|h| h.as_ref().eq_ignore_ascii_case(req));
        if !found {
            return Err(Error::Schema {
                column: req.to_string(),
            });
        }
    }
    Ok(())
}

/// Sorts points ascending by date and enforces the series invariants.
///
/// Points with a non-finite close are dropped (the typed equivalent of
/// coercing unparseable rows to missing), the sort is stable, and only the
/// first point per date survives, so the result has strictly increasing
/// dates.
#[must_use]
pub fn sort_and_deduplicate<T: SeriesElement>(points: Vec<PricePoint<T>>) -> Vec<PricePoint<T>> {
    let mut points: Vec<PricePoint<T>> =
        points.into_iter().filter(|p| p.close.is_finite()).collect();
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    points
}

/// Reindexes every series onto the union of all dates.
///
/// Each output series covers the same date axis. Gaps inside a series are
/// filled by carrying its own last observed close forward; positions before a
/// series' first observation stay NaN — alignment never invents a value
/// before a series starts. Derived columns are not carried through (alignment
/// is a preprocessing step; indicators are computed on the aligned result).
///
/// Input series are expected to already have strictly increasing dates (see
/// [`sort_and_deduplicate`]).
#[must_use]
pub fn align<T: SeriesElement>(series: &[Series<T>]) -> Vec<Series<T>> {
    if series.is_empty() {
        return Vec::new();
    }

    let mut union: Vec<NaiveDate> = series.iter().flat_map(|s| s.dates.iter().copied()).collect();
    union.sort_unstable();
    union.dedup();

    trace!(
        series_count = series.len(),
        union_len = union.len(),
        "aligning series onto union date axis"
    );

    series
        .iter()
        .map(|s| {
            let mut close = Vec::with_capacity(union.len());
            let mut cursor = 0usize;
            let mut last: Option<T> = None;
            for &date in &union {
                while cursor < s.dates.len() && s.dates[cursor] <= date {
                    last = Some(s.close[cursor]);
                    cursor += 1;
                }
                close.push(last.unwrap_or_else(T::nan));
            }
            Series {
                dates: union.clone(),
                close,
                derived: Vec::new(),
            }
        })
        .collect()
}
