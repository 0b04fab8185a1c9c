//! Longest-streak detection over daily returns, tolerant of brief noise.
//!
//! A streak is a run of same-directional daily returns. Real series rarely
//! move in one direction for long without a small wobble, so the detector
//! accepts a configurable amount of noise:
//!
//! - **Same direction**: extends the streak and refills the tolerance budget
//! - **Flat** (`|v| < 1e-9`): extends the streak; neither consumes nor
//!   refills tolerance
//! - **Big opposite** (`|v| > threshold`): breaks the streak unconditionally
//! - **Small opposite** (`|v| ≤ threshold`): consumes one unit of tolerance
//!   and extends; when the budget is exhausted it breaks and the budget
//!   refills for the next streak
//!
//! NaN returns (the undefined first entry, gaps) are skipped entirely; they
//! neither extend nor break a streak, and reported dates always refer to
//! surviving entries.
//!
//! The scan runs twice, once treating "up" as the target direction and once
//! "down", and reports both longest runs. A strict greater-than comparison
//! against the best-so-far means the earliest of several maximal runs wins.
//!
//! # Example
//!
//! ```
//! use streakline::streak::streaks;
//!
//! // Two small dips inside an up-run, both forgiven with tolerance 2
//! let returns = vec![2.0_f64, 3.0, -0.5, 4.0, -0.3, 5.0];
//! let summary = streaks(&returns, 2, 1.0).unwrap();
//! assert_eq!(summary.up.length, 6);
//! ```

use chrono::NaiveDate;
use tracing::trace;

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// Moves smaller than this in magnitude are flat: direction-free
/// continuations of whatever streak is running.
pub const FLAT_EPSILON: f64 = 1e-9;

/// One direction's longest run, located by indices into the scanned slice.
///
/// `start` and `end` are `None` exactly when `length` is zero, which only
/// happens on empty or all-NaN input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSpan {
    /// Number of entries in the run, forgiven wobbles included.
    pub length: usize,
    /// Index of the first entry in the run.
    pub start: Option<usize>,
    /// Index of the last surviving entry in the run.
    pub end: Option<usize>,
}

/// The longest up-run and down-run found in one scan of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSummary {
    /// Longest run with positive returns as the target direction.
    pub up: StreakSpan,
    /// Longest run with negative returns as the target direction.
    pub down: StreakSpan,
}

/// One direction's longest run with its span mapped to calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakResult {
    /// Number of entries in the run.
    pub length: usize,
    /// Date of the first entry in the run.
    pub start: Option<NaiveDate>,
    /// Date of the last entry in the run.
    pub end: Option<NaiveDate>,
}

/// Date-mapped counterpart of [`StreakSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakReport {
    /// Longest up-run.
    pub up: StreakResult,
    /// Longest down-run.
    pub down: StreakResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Finds the longest up-run and down-run in a series of daily returns.
///
/// # Arguments
///
/// * `returns` - Daily percentage changes; NaN entries are skipped
/// * `tolerance` - How many small opposite moves a single run may absorb
/// * `threshold` - Magnitude above which an opposite move always breaks a run
///
/// # Errors
///
/// Returns [`Error::Parameter`](crate::error::Error::Parameter) if
/// `threshold` is negative or NaN.
#[must_use = "this returns a Result with the streak summary, which should be used"]
pub fn streaks<T: SeriesElement>(
    returns: &[T],
    tolerance: usize,
    threshold: T,
) -> Result<StreakSummary> {
    if threshold.is_nan() || threshold < T::zero() {
        return Err(Error::Parameter {
            name: "threshold",
            value: threshold.to_f64().unwrap_or(f64::NAN),
            constraint: "must be a non-negative number".to_string(),
        });
    }

    // Drop NaN entries but remember where each survivor came from, so spans
    // can be mapped back to positions in the caller's slice.
    let surviving: Vec<(usize, T)> = returns
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, &v)| (i, v))
        .collect();

    let summary = StreakSummary {
        up: scan(&surviving, Direction::Up, tolerance, threshold),
        down: scan(&surviving, Direction::Down, tolerance, threshold),
    };
    trace!(
        up = summary.up.length,
        down = summary.down.length,
        tolerance,
        "streak scan complete"
    );
    Ok(summary)
}

/// Finds both streaks and maps their spans onto the given dates.
///
/// `dates[i]` must be the date of `returns[i]`; a length mismatch is a
/// [`Error::Parameter`](crate::error::Error::Parameter).
#[must_use = "this returns a Result with the streak report, which should be used"]
pub fn streaks_with_dates<T: SeriesElement>(
    dates: &[NaiveDate],
    returns: &[T],
    tolerance: usize,
    threshold: T,
) -> Result<StreakReport> {
    if dates.len() != returns.len() {
        return Err(Error::Parameter {
            name: "returns",
            value: returns.len() as f64,
            constraint: format!("must match the {} dates provided", dates.len()),
        });
    }
    let summary = streaks(returns, tolerance, threshold)?;
    Ok(StreakReport {
        up: to_dated(summary.up, dates),
        down: to_dated(summary.down, dates),
    })
}

fn to_dated(span: StreakSpan, dates: &[NaiveDate]) -> StreakResult {
    StreakResult {
        length: span.length,
        start: span.start.map(|i| dates[i]),
        end: span.end.map(|i| dates[i]),
    }
}

/// Single left-to-right pass over the surviving entries for one target
/// direction.
fn scan<T: SeriesElement>(
    surviving: &[(usize, T)],
    direction: Direction,
    tolerance: usize,
    threshold: T,
) -> StreakSpan {
    let flat = T::from_f64(FLAT_EPSILON);

    let mut current = 0usize;
    let mut current_start = 0usize;
    let mut tol_left = tolerance;

    let mut best = StreakSpan {
        length: 0,
        start: None,
        end: None,
    };

    // `pos` indexes the compacted slice; original positions come back out
    // through `surviving[pos].0` when a span is recorded.
    for (pos, &(_, v)) in surviving.iter().enumerate() {
        let (same_dir, opposite_dir) = match direction {
            Direction::Up => (v > T::zero(), v < T::zero()),
            Direction::Down => (v < T::zero(), v > T::zero()),
        };

        if same_dir {
            if current == 0 {
                current_start = pos;
            }
            current += 1;
            tol_left = tolerance;
            continue;
        }

        if v.abs() < flat {
            // Flat extends without touching the tolerance budget.
            if current == 0 {
                current_start = pos;
            }
            current += 1;
            continue;
        }

        if opposite_dir {
            if v.abs() > threshold {
                // Big opposite move: unconditional break.
                finalize(&mut best, current, current_start, pos, surviving);
                current = 0;
                tol_left = tolerance;
                continue;
            }

            if tol_left > 0 {
                // Forgiven: the wobble counts toward the run and may even
                // start one.
                if current == 0 {
                    current_start = pos;
                }
                current += 1;
                tol_left -= 1;
            } else {
                finalize(&mut best, current, current_start, pos, surviving);
                current = 0;
                tol_left = tolerance;
            }
        }
    }

    // A run may extend to the end of the data without a terminating break.
    if current > best.length {
        best.length = current;
        best.start = Some(surviving[current_start].0);
        best.end = Some(surviving[surviving.len() - 1].0);
    }

    best
}

/// Records the just-broken run if it beats the best so far. The breaking
/// entry at `pos` is excluded from the span.
fn finalize<T: SeriesElement>(
    best: &mut StreakSpan,
    current: usize,
    current_start: usize,
    pos: usize,
    surviving: &[(usize, T)],
) {
    if current > best.length {
        best.length = current;
        best.start = Some(surviving[current_start].0);
        best.end = Some(surviving[pos - 1].0);
    }
}
