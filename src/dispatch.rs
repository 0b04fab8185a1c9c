//! Indicator dispatch: a closed set of indicator kinds, typed parameters
//! with defaults, and idempotent application to a series.
//!
//! The [`Registry`] is built once at startup ([`Registry::standard`]) and is
//! immutable afterwards; all per-request configuration travels through the
//! `overrides` argument of [`Registry::apply`], never through shared state.
//!
//! Application is idempotent by an explicit column check: when every output
//! column an indicator would produce is already present on the series, the
//! series is returned unchanged. Presence of the columns is the only
//! decision mechanism.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use streakline::dispatch::Registry;
//! use streakline::series::Series;
//!
//! let dates: Vec<NaiveDate> = (1..=25)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let closes: Vec<f64> = (1..=25).map(f64::from).collect();
//! let series = Series::new(dates, closes).unwrap();
//!
//! let registry = Registry::standard();
//! let series = registry.apply(series, "sma", &[("window", 5.0)]).unwrap();
//! assert!(series.has_column("SMA_5"));
//!
//! // Reapplying with the same parameters is a no-op
//! let again = registry.apply(series.clone(), "sma", &[("window", 5.0)]).unwrap();
//! assert_eq!(series, again);
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::indicators::{daily_return_pct, ema_with_smoothing, macd, rsi, sma};
use crate::series::Series;
use crate::traits::SeriesElement;

/// The closed set of dispatchable indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Simple Moving Average.
    Sma,
    /// Exponential Moving Average.
    Ema,
    /// Relative Strength Index.
    Rsi,
    /// Moving Average Convergence Divergence.
    Macd,
    /// Daily percentage return.
    DailyReturn,
}

impl IndicatorKind {
    /// The registry key this kind is dispatched under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::DailyReturn => "dailyr",
        }
    }

    /// The standard default parameters for this kind.
    #[must_use]
    pub const fn default_params(self) -> Params {
        match self {
            Self::Sma => Params::Sma(SmaParams { window: 20 }),
            Self::Ema => Params::Ema(EmaParams {
                window: 20,
                smoothing: 2.0,
            }),
            Self::Rsi => Params::Rsi(RsiParams { window: 14 }),
            Self::Macd => Params::Macd(MacdParams {
                fast: 12,
                slow: 26,
                signal: 9,
            }),
            Self::DailyReturn => Params::DailyReturn,
        }
    }
}

/// Parameters for [`IndicatorKind::Sma`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaParams {
    /// Averaging window (default 20).
    pub window: usize,
}

/// Parameters for [`IndicatorKind::Ema`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaParams {
    /// Smoothing window (default 20).
    pub window: usize,
    /// Smoothing factor; the weight is `smoothing / (window + 1)`
    /// (default 2.0).
    pub smoothing: f64,
}

/// Parameters for [`IndicatorKind::Rsi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsiParams {
    /// Wilder smoothing window (default 14).
    pub window: usize,
}

/// Parameters for [`IndicatorKind::Macd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    /// Fast EMA window (default 12).
    pub fast: usize,
    /// Slow EMA window (default 26).
    pub slow: usize,
    /// Signal EMA window (default 9).
    pub signal: usize,
}

/// An indicator kind together with its concrete parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Params {
    /// SMA with its window.
    Sma(SmaParams),
    /// EMA with its window.
    Ema(EmaParams),
    /// RSI with its window.
    Rsi(RsiParams),
    /// MACD with its three windows.
    Macd(MacdParams),
    /// Daily return takes no parameters.
    DailyReturn,
}

/// A registered indicator: its kind plus the defaults overrides merge over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSpec {
    kind: IndicatorKind,
    defaults: Params,
}

impl IndicatorSpec {
    /// Creates the spec for a kind with its standard defaults.
    #[must_use]
    pub const fn standard(kind: IndicatorKind) -> Self {
        Self {
            kind,
            defaults: kind.default_params(),
        }
    }

    /// The indicator kind.
    #[must_use]
    pub const fn kind(&self) -> IndicatorKind {
        self.kind
    }

    /// The registry key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.kind.key()
    }

    /// The default parameters.
    #[must_use]
    pub const fn defaults(&self) -> Params {
        self.defaults
    }

    /// Merges named overrides over the defaults, caller values winning.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownParameter`] for a name this kind does not accept
    /// - [`Error::Parameter`] for a value that is not a positive integer, or
    ///   a MACD fast window not strictly below the slow window
    pub fn merge(&self, overrides: &[(&str, f64)]) -> Result<Params> {
        let mut params = self.defaults;
        for &(name, value) in overrides {
            match (&mut params, name) {
                (Params::Sma(p), "window") => p.window = positive_int("window", value)?,
                (Params::Ema(p), "window") => p.window = positive_int("window", value)?,
                (Params::Ema(p), "smoothing") => {
                    p.smoothing = positive_float("smoothing", value)?;
                }
                (Params::Rsi(p), "window") => p.window = positive_int("window", value)?,
                (Params::Macd(p), "fast") => p.fast = positive_int("fast", value)?,
                (Params::Macd(p), "slow") => p.slow = positive_int("slow", value)?,
                (Params::Macd(p), "signal") => p.signal = positive_int("signal", value)?,
                _ => {
                    return Err(Error::UnknownParameter {
                        indicator: self.key(),
                        name: name.to_string(),
                    })
                }
            }
        }
        if let Params::Macd(p) = params {
            if p.fast >= p.slow {
                return Err(Error::Parameter {
                    name: "fast",
                    value: p.fast as f64,
                    constraint: format!("must be less than slow period {}", p.slow),
                });
            }
        }
        Ok(params)
    }

    /// The output columns this indicator produces under the given parameters.
    #[must_use]
    pub fn output_columns(&self, params: &Params) -> Vec<String> {
        match params {
            Params::Sma(p) => vec![format!("SMA_{}", p.window)],
            Params::Ema(p) => vec![format!("EMA_{}", p.window)],
            Params::Rsi(p) => vec![format!("RSI_{}", p.window)],
            Params::Macd(_) => vec![
                "MACD".to_string(),
                "MACD_signal".to_string(),
                "MACD_hist".to_string(),
            ],
            Params::DailyReturn => vec!["DailyR".to_string()],
        }
    }
}

fn positive_int(name: &'static str, value: f64) -> Result<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 {
        return Err(Error::Parameter {
            name,
            value,
            constraint: "must be a positive integer".to_string(),
        });
    }
    Ok(value as usize)
}

fn positive_float(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Parameter {
            name,
            value,
            constraint: "must be greater than 0".to_string(),
        });
    }
    Ok(value)
}

/// The dispatch table mapping keys to indicator specs.
///
/// Built once via [`Registry::standard`]; it carries no mutable state, so a
/// single instance can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    specs: Vec<IndicatorSpec>,
}

impl Registry {
    /// Builds the standard registry: `sma`, `ema`, `rsi`, `macd`, `dailyr`.
    ///
    /// The ordering is stable and intended for display; it carries no
    /// semantic weight.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            specs: vec![
                IndicatorSpec::standard(IndicatorKind::Sma),
                IndicatorSpec::standard(IndicatorKind::Ema),
                IndicatorSpec::standard(IndicatorKind::Rsi),
                IndicatorSpec::standard(IndicatorKind::Macd),
                IndicatorSpec::standard(IndicatorKind::DailyReturn),
            ],
        }
    }

    /// Returns the registered keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(IndicatorSpec::key)
    }

    /// Looks up the spec for a key, or `None` if unregistered.
    #[must_use]
    pub fn spec(&self, key: &str) -> Option<&IndicatorSpec> {
        self.specs.iter().find(|s| s.key() == key)
    }

    /// Returns the number of registered indicators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Applies the indicator `key` to the series, idempotently.
    ///
    /// `overrides` are `(name, value)` pairs merged over the indicator's
    /// defaults. When every expected output column already exists on the
    /// series, the series comes back unchanged; otherwise the engine runs
    /// and the new columns are attached.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownIndicator`] when `key` is not registered
    /// - [`Error::UnknownParameter`] / [`Error::Parameter`] from the merge
    /// - [`Error::Computation`] wrapping any engine failure, naming the
    ///   indicator that failed
    pub fn apply<T: SeriesElement>(
        &self,
        series: Series<T>,
        key: &str,
        overrides: &[(&str, f64)],
    ) -> Result<Series<T>> {
        let spec = self.spec(key).ok_or_else(|| Error::UnknownIndicator {
            key: key.to_string(),
        })?;
        let params = spec.merge(overrides)?;

        let expected = spec.output_columns(&params);
        if expected.iter().all(|c| series.has_column(c)) {
            debug!(indicator = spec.key(), "output columns present, skipping");
            return Ok(series);
        }

        let wrap = |source: Error| Error::Computation {
            indicator: spec.key(),
            source: Box::new(source),
        };

        debug!(indicator = spec.key(), len = series.len(), "computing");
        let series = match params {
            Params::Sma(p) => {
                let col = sma(series.close(), p.window).map_err(wrap)?;
                series.with_column(format!("SMA_{}", p.window), col)?
            }
            Params::Ema(p) => {
                let smoothing = T::from_f64(p.smoothing);
                let col = ema_with_smoothing(series.close(), p.window, smoothing).map_err(wrap)?;
                series.with_column(format!("EMA_{}", p.window), col)?
            }
            Params::Rsi(p) => {
                let col = rsi(series.close(), p.window).map_err(wrap)?;
                series.with_column(format!("RSI_{}", p.window), col)?
            }
            Params::Macd(p) => {
                let out = macd(series.close(), p.fast, p.slow, p.signal).map_err(wrap)?;
                series
                    .with_column("MACD", out.macd)?
                    .with_column("MACD_signal", out.signal)?
                    .with_column("MACD_hist", out.histogram)?
            }
            Params::DailyReturn => {
                let col = daily_return_pct(series.close());
                series.with_column("DailyR", col)?
            }
        };

        Ok(series)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use chrono::NaiveDate;

    fn sample_series(n: usize) -> Series<f64> {
        let dates: Vec<NaiveDate> = (0..n)
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
            .collect();
        let closes: Vec<f64> = (0..n)
            .map(|i| 50.0 + (i as f64 * 0.4).sin() * 3.0 + i as f64 * 0.05)
            .collect();
        Series::new(dates, closes).unwrap()
    }

    // ==================== Registry Tests ====================

    #[test]
    fn test_registry_standard_keys() {
        let registry = Registry::standard();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["sma", "ema", "rsi", "macd", "dailyr"]);
        assert_eq!(registry.len(), 5);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_spec_lookup() {
        let registry = Registry::standard();
        let spec = registry.spec("rsi").unwrap();
        assert_eq!(spec.kind(), IndicatorKind::Rsi);
        assert_eq!(spec.defaults(), Params::Rsi(RsiParams { window: 14 }));

        assert!(registry.spec("bollinger").is_none());
    }

    #[test]
    fn test_registry_unknown_indicator() {
        let registry = Registry::standard();
        let result = registry.apply(sample_series(40), "stoch", &[]);
        assert!(matches!(result, Err(Error::UnknownIndicator { key }) if key == "stoch"));
    }

    // ==================== Parameter Merge Tests ====================

    #[test]
    fn test_merge_defaults_when_no_overrides() {
        let spec = IndicatorSpec::standard(IndicatorKind::Macd);
        let params = spec.merge(&[]).unwrap();
        assert_eq!(
            params,
            Params::Macd(MacdParams {
                fast: 12,
                slow: 26,
                signal: 9
            })
        );
    }

    #[test]
    fn test_merge_override_wins() {
        let spec = IndicatorSpec::standard(IndicatorKind::Sma);
        let params = spec.merge(&[("window", 50.0)]).unwrap();
        assert_eq!(params, Params::Sma(SmaParams { window: 50 }));
    }

    #[test]
    fn test_merge_partial_macd_override() {
        let spec = IndicatorSpec::standard(IndicatorKind::Macd);
        let params = spec.merge(&[("fast", 8.0)]).unwrap();
        assert_eq!(
            params,
            Params::Macd(MacdParams {
                fast: 8,
                slow: 26,
                signal: 9
            })
        );
    }

    #[test]
    fn test_merge_rejects_unknown_name() {
        let spec = IndicatorSpec::standard(IndicatorKind::Sma);
        let result = spec.merge(&[("period", 10.0)]);
        assert!(matches!(
            result,
            Err(Error::UnknownParameter { indicator: "sma", name }) if name == "period"
        ));
    }

    #[test]
    fn test_merge_rejects_any_name_for_daily_return() {
        let spec = IndicatorSpec::standard(IndicatorKind::DailyReturn);
        let result = spec.merge(&[("window", 5.0)]);
        assert!(matches!(result, Err(Error::UnknownParameter { .. })));
    }

    #[test]
    fn test_merge_rejects_bad_values() {
        let spec = IndicatorSpec::standard(IndicatorKind::Ema);
        for bad in [0.0, -3.0, 2.5, f64::NAN, f64::INFINITY] {
            let result = spec.merge(&[("window", bad)]);
            assert!(
                matches!(result, Err(Error::Parameter { name: "window", .. })),
                "value {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_merge_ema_smoothing_override() {
        let spec = IndicatorSpec::standard(IndicatorKind::Ema);
        let params = spec.merge(&[("smoothing", 3.0)]).unwrap();
        assert_eq!(
            params,
            Params::Ema(EmaParams {
                window: 20,
                smoothing: 3.0
            })
        );

        for bad in [0.0, -2.0, f64::NAN] {
            let result = spec.merge(&[("smoothing", bad)]);
            assert!(
                matches!(result, Err(Error::Parameter { name: "smoothing", .. })),
                "smoothing {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_merge_rejects_fast_not_below_slow() {
        let spec = IndicatorSpec::standard(IndicatorKind::Macd);
        let result = spec.merge(&[("fast", 26.0)]);
        assert!(matches!(result, Err(Error::Parameter { name: "fast", .. })));

        let result = spec.merge(&[("slow", 12.0)]);
        assert!(matches!(result, Err(Error::Parameter { name: "fast", .. })));
    }

    // ==================== Output Column Tests ====================

    #[test]
    fn test_output_columns_follow_params() {
        let spec = IndicatorSpec::standard(IndicatorKind::Sma);
        let params = spec.merge(&[("window", 7.0)]).unwrap();
        assert_eq!(spec.output_columns(&params), vec!["SMA_7"]);

        let macd_spec = IndicatorSpec::standard(IndicatorKind::Macd);
        assert_eq!(
            macd_spec.output_columns(&macd_spec.defaults()),
            vec!["MACD", "MACD_signal", "MACD_hist"]
        );
    }

    // ==================== Apply Tests ====================

    #[test]
    fn test_apply_attaches_default_column() {
        let registry = Registry::standard();
        let series = registry.apply(sample_series(40), "sma", &[]).unwrap();
        assert!(series.has_column("SMA_20"));
    }

    #[test]
    fn test_apply_attaches_override_column() {
        let registry = Registry::standard();
        let series = registry
            .apply(sample_series(40), "rsi", &[("window", 7.0)])
            .unwrap();
        assert!(series.has_column("RSI_7"));
        assert!(!series.has_column("RSI_14"));
    }

    #[test]
    fn test_apply_macd_attaches_all_three() {
        let registry = Registry::standard();
        let series = registry.apply(sample_series(60), "macd", &[]).unwrap();
        assert!(series.has_column("MACD"));
        assert!(series.has_column("MACD_signal"));
        assert!(series.has_column("MACD_hist"));
    }

    #[test]
    fn test_apply_daily_return() {
        let registry = Registry::standard();
        let series = registry.apply(sample_series(10), "dailyr", &[]).unwrap();
        let col = series.column("DailyR").unwrap();
        assert!(col[0].is_nan());
        assert!(!col[1].is_nan());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let registry = Registry::standard();
        let once = registry
            .apply(sample_series(40), "ema", &[("window", 5.0)])
            .unwrap();
        let twice = registry
            .apply(once.clone(), "ema", &[("window", 5.0)])
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_recomputes_when_any_column_missing() {
        // A series with only a partial MACD output must be recomputed
        let registry = Registry::standard();
        let series = sample_series(60)
            .with_column("MACD", vec![0.0; 60])
            .unwrap();
        let series = registry.apply(series, "macd", &[]).unwrap();

        assert!(series.has_column("MACD_signal"));
        // The stale placeholder column was replaced with a real computation
        assert!(series.column("MACD").unwrap()[0].is_nan());
    }

    #[test]
    fn test_apply_different_params_are_distinct_columns() {
        let registry = Registry::standard();
        let series = registry
            .apply(sample_series(40), "sma", &[("window", 5.0)])
            .unwrap();
        let series = registry
            .apply(series, "sma", &[("window", 10.0)])
            .unwrap();
        assert!(series.has_column("SMA_5"));
        assert!(series.has_column("SMA_10"));
    }

    #[test]
    fn test_apply_wraps_engine_failure() {
        // 5 points cannot support the default 20-point SMA window
        let registry = Registry::standard();
        let result = registry.apply(sample_series(5), "sma", &[]);

        match result {
            Err(Error::Computation { indicator, source }) => {
                assert_eq!(indicator, "sma");
                assert!(matches!(*source, Error::Parameter { .. }));
            }
            other => panic!("expected Computation error, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_merge_errors_not_wrapped() {
        // Merge-time failures surface directly, not as Computation
        let registry = Registry::standard();
        let result = registry.apply(sample_series(40), "sma", &[("window", -1.0)]);
        assert!(matches!(result, Err(Error::Parameter { .. })));
    }

    // ==================== Kind Tests ====================

    #[test]
    fn test_kind_keys() {
        assert_eq!(IndicatorKind::Sma.key(), "sma");
        assert_eq!(IndicatorKind::DailyReturn.key(), "dailyr");
    }
}
