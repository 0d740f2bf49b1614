//! calibration::density — empirical coverage of a nominal Gaussian quantile.
//!
//! Purpose
//! -------
//! Compute the fraction of normalized residuals that fall at or below the
//! z-score of a nominal percentile under the standard normal distribution.
//! This is the elementary building block of the calibration curve: a model
//! whose uncertainty estimates are well calibrated produces normalized
//! residuals that behave like standard-normal draws, so the empirical
//! fraction should track the nominal percentile.
//!
//! Key behaviors
//! -------------
//! - Map the nominal percentile `p` to the z-score `Φ⁻¹(p)` using the
//!   standard normal quantile function (statrs `ContinuousCDF`).
//! - Normalize each residual by its paired stdev and count how many
//!   normalized residuals are ≤ the z-score.
//! - Return the count divided by the sample size, a value in [0, 1].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs must pass `calibration::validation::validate_residual_pairs`:
//!   non-empty, equal-length, finite residuals, strictly positive finite
//!   stdevs. Under those guarantees every normalized residual is finite.
//! - `p` must lie in the closed interval [0, 1]. The endpoints map to ±∞
//!   z-scores: every finite normalized residual is above −∞ and below +∞,
//!   so the density is exactly 0 at p = 0 and exactly 1 at p = 1.
//!
//! Conventions
//! -----------
//! - "Residual" means `target − prediction`; "normalized residual" means
//!   `residual / stdev`, per the pairing by index.
//! - The comparison is inclusive (`≤`), matching the usual CDF convention.
//!
//! Downstream usage
//! ----------------
//! - `calibration::curve` evaluates this function once per nominal quantile
//!   on an evenly spaced grid over [0, 1] to build the calibration curve.
//! - Callers wanting a single coverage check (e.g., "does 90% nominal
//!   confidence cover 90% of residuals?") can use it directly.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the bounds of the returned fraction, monotonicity in
//!   `p`, exactness at the percentile endpoints, and the median behavior of
//!   symmetric residual sets.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::calibration::errors::CalResult;
use crate::calibration::validation::{validate_percentile, validate_residual_pairs};

/// Compute the empirical coverage of the nominal percentile `percentile`.
///
/// Parameters
/// ----------
/// - `percentile`: `f64`
///   Nominal cumulative probability in the closed interval [0, 1]. The
///   z-score is taken from the standard normal quantile function; the
///   endpoints map to −∞ and +∞ and yield densities of exactly 0 and 1.
/// - `residuals`: `&[f64]`
///   Per-sample prediction errors (`target − prediction`). Must be
///   non-empty and finite.
/// - `stdevs`: `&[f64]`
///   Per-sample predicted standard deviations, paired 1:1 with
///   `residuals`. Must be finite and strictly positive.
///
/// Returns
/// -------
/// `CalResult<f64>`
///   - `Ok(density)` with `density ∈ [0, 1]`: the fraction of normalized
///     residuals at or below `Φ⁻¹(percentile)`.
///   - `Err(CalibrationError)` when validation fails.
///
/// Errors
/// ------
/// - `CalibrationError::InvalidPercentile`
///   Returned when `percentile` is NaN or outside [0, 1].
/// - `CalibrationError::EmptyInput`, `CalibrationError::LengthMismatch`,
///   `CalibrationError::NonFiniteValue`,
///   `CalibrationError::NonPositiveStdev`
///   Returned by `validate_residual_pairs` for malformed inputs.
///
/// Panics
/// ------
/// - Never panics under normal operation; all user-facing invalid inputs
///   are surfaced as `CalibrationError` values.
///
/// Notes
/// -----
/// - For fixed residuals/stdevs the result is non-decreasing in
///   `percentile`, since raising the percentile can only raise the z-score
///   bound.
/// - The function is a pure transform: no side effects, no shared state.
///
/// Examples
/// --------
/// ```rust
/// use uq_calibration::calibration::density_at_percentile;
///
/// let residuals = vec![-1.0, -0.1, 0.1, 1.0];
/// let stdevs = vec![1.0, 1.0, 1.0, 1.0];
///
/// // Half of the symmetric residuals sit below the median z-score of 0.
/// let density = density_at_percentile(0.5, &residuals, &stdevs).unwrap();
/// assert_eq!(density, 0.5);
/// ```
pub fn density_at_percentile(percentile: f64, residuals: &[f64], stdevs: &[f64]) -> CalResult<f64> {
    validate_percentile(percentile)?;
    validate_residual_pairs(residuals, stdevs)?;

    let upper_bound = percentile_z_score(percentile);

    let within_quantile = residuals
        .iter()
        .zip(stdevs)
        .filter(|(residual, stdev)| *residual / *stdev <= upper_bound)
        .count();

    Ok(within_quantile as f64 / residuals.len() as f64)
}

/// Map a percentile in [0, 1] to its standard normal z-score Φ⁻¹(p).
///
/// The endpoints are handled explicitly so that p = 0 and p = 1 always map
/// to −∞ and +∞ regardless of how the underlying quantile approximation
/// treats the boundary.
#[inline]
fn percentile_z_score(percentile: f64) -> f64 {
    if percentile <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if percentile >= 1.0 {
        return f64::INFINITY;
    }

    Normal::new(0.0, 1.0).expect("unit normal parameters are valid").inverse_cdf(percentile)
}
