//! Error types for streakline.
//!
//! This module defines the error taxonomy used throughout the crate. Engines
//! fail fast with a typed error and never clamp or silently repair bad input;
//! the dispatcher is the only layer allowed to degrade (by returning an
//! already-augmented series unchanged), and it surfaces engine failures as
//! [`Error::Computation`] rather than folding them into a partial result.
//!
//! Every message is display-ready: the excluded UI layer shows it verbatim.

use thiserror::Error;

/// The main error type for streakline operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required column is missing from an input table.
    ///
    /// Raised by [`validate_columns`](crate::series::validate_columns) when an
    /// uploaded dataset lacks one of the fields the core needs (matching is
    /// case-insensitive). Never retried.
    #[error("missing required column: {column}")]
    Schema {
        /// The required column that was not found.
        column: String,
    },

    /// An indicator parameter is outside its valid domain.
    ///
    /// The message names the field, the value it was given, and the violated
    /// constraint. Parameters are never silently clamped.
    #[error("invalid parameter {name}={value}: {constraint}")]
    Parameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Description of the violated constraint.
        constraint: String,
    },

    /// A parameter name not recognized by the targeted indicator.
    ///
    /// Unknown names are rejected rather than silently accepted, so a typo in
    /// an override can never turn into a default-parameter computation.
    #[error("unknown parameter {name:?} for indicator {indicator}")]
    UnknownParameter {
        /// Key of the indicator the override was aimed at.
        indicator: &'static str,
        /// The unrecognized parameter name.
        name: String,
    },

    /// An indicator key with no entry in the registry.
    #[error("unknown indicator: {key}")]
    UnknownIndicator {
        /// The key that was requested.
        key: String,
    },

    /// An engine failed during execution for a reason other than bad
    /// parameters.
    ///
    /// Wraps the indicator key and the underlying cause so the failure stays
    /// attributable after crossing the dispatcher boundary.
    #[error("indicator {indicator} failed: {source}")]
    Computation {
        /// Key of the indicator whose engine failed.
        indicator: &'static str,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },
}

/// Convenience type alias for Results using the streakline Error type.
pub type Result<T> = std::result::Result<T, Error>;
