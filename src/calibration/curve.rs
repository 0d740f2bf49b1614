//! calibration::curve — empirical calibration curves and the squared-error
//! score.
//!
//! Purpose
//! -------
//! Build the empirical calibration curve of a probabilistic regression
//! model: for each nominal confidence level on an evenly spaced grid over
//! [0, 1], the observed coverage is the fraction of normalized residuals at
//! or below the corresponding standard normal z-score. A perfectly
//! calibrated model traces the diagonal (observed == nominal pointwise).
//!
//! Key behaviors
//! -------------
//! - Construct [`CalibrationCurve`] values from residual/stdev pairs by
//!   evaluating `calibration::density` once per nominal quantile on the
//!   [`CURVE_POINTS`]-point grid, optionally firing a caller-supplied
//!   progress callback after each evaluation.
//! - Accept externally supplied (predicted, observed) pairs via
//!   [`CalibrationCurve::from_points`], validating them once so the score
//!   methods can be infallible.
//! - Expose both miscalibration scores as methods, and the squared-error
//!   score additionally as the free function [`calibration_error`].
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed `CalibrationCurve` always holds equal-length, finite
//!   sequences with a non-decreasing nominal axis of length ≥ 2. The score
//!   methods rely on these invariants and do not re-validate.
//! - Grid-built curves use exactly [`CURVE_POINTS`] values evenly spaced
//!   over the closed interval [0, 1], endpoints included.
//!
//! Conventions
//! -----------
//! - The progress callback receives `(completed, total)` counts; it is a
//!   user-feedback hook only and has no functional effect. Callers that
//!   do not need feedback use [`CalibrationCurve::from_residuals`].
//! - Sequences are stored as `ndarray::Array1<f64>` to match the rest of
//!   the crate's numeric surface.
//!
//! Downstream usage
//! ----------------
//! - `calibration::convergence` builds one curve per trial count and reads
//!   both scores from it.
//! - Python bindings wrap [`CalibrationCurve`] and re-expose the free
//!   functions.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the grid construction (resolution, endpoints,
//!   spacing), the perfect-calibration fixture (both scores zero), the
//!   monotonicity of grid-built observed coverage, progress-callback
//!   accounting, and the symmetry of the squared-error score.

use ndarray::Array1;

use crate::calibration::area::area_between_curve_and_diagonal;
use crate::calibration::density::density_at_percentile;
use crate::calibration::errors::CalResult;
use crate::calibration::validation::{validate_curve_for_area, validate_curve_pair};

/// Number of nominal confidence levels on the calibration grid.
pub const CURVE_POINTS: usize = 100;

/// The nominal confidence grid: [`CURVE_POINTS`] values evenly spaced over
/// the closed interval [0, 1], endpoints included.
pub fn nominal_confidence_levels() -> Array1<f64> {
    Array1::linspace(0.0, 1.0, CURVE_POINTS)
}

/// CalibrationCurve — paired nominal and observed confidence levels.
///
/// Purpose
/// -------
/// Represent one empirical calibration curve: the nominal confidence grid
/// (`predicted`) and the observed coverage fraction at each grid point
/// (`observed`). The pair fully determines both miscalibration scores.
///
/// Key behaviors
/// -------------
/// - Built from residual/stdev pairs via [`CalibrationCurve::from_residuals`]
///   (or the progress-reporting variant), or from precomputed sequences via
///   [`CalibrationCurve::from_points`].
/// - Provides the squared-error score ([`CalibrationCurve::calibration_error`])
///   and the polygon-based area score
///   ([`CalibrationCurve::miscalibration_area`]) as infallible methods.
///
/// Invariants
/// ----------
/// - `predicted` and `observed` have equal length ≥ 2, contain only finite
///   values, and `predicted` is non-decreasing. Constructors establish
///   these invariants; the type holds no mutable state afterwards.
///
/// Performance
/// -----------
/// - Grid construction is O([`CURVE_POINTS`] · N) in the sample count N;
///   each score is O(curve length).
///
/// Notes
/// -----
/// - The type is a plain value object: no cross-call shared state, fresh
///   outputs from fresh inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationCurve {
    predicted: Array1<f64>,
    observed: Array1<f64>,
}

impl CalibrationCurve {
    /// Build the empirical calibration curve for a residual/stdev pair.
    ///
    /// Parameters
    /// ----------
    /// - `residuals`: `&[f64]`
    ///   Per-sample prediction errors (`target − prediction`). Must be
    ///   non-empty and finite.
    /// - `stdevs`: `&[f64]`
    ///   Per-sample predicted standard deviations, paired 1:1 with
    ///   `residuals`. Must be finite and strictly positive.
    ///
    /// Returns
    /// -------
    /// `CalResult<CalibrationCurve>`
    ///   - `Ok(curve)` holding the [`CURVE_POINTS`]-point nominal grid and
    ///     the observed coverage at each grid point.
    ///   - `Err(CalibrationError)` when the inputs are malformed.
    ///
    /// Errors
    /// ------
    /// - `CalibrationError::EmptyInput`, `LengthMismatch`,
    ///   `NonFiniteValue`, `NonPositiveStdev`
    ///   Propagated from the per-quantile density evaluation.
    ///
    /// Panics
    /// ------
    /// - Never panics under normal operation.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use uq_calibration::calibration::CalibrationCurve;
    ///
    /// let residuals = vec![-0.5, -0.1, 0.2, 0.7];
    /// let stdevs = vec![1.0; 4];
    ///
    /// let curve = CalibrationCurve::from_residuals(&residuals, &stdevs).unwrap();
    /// assert_eq!(curve.predicted().len(), curve.observed().len());
    /// ```
    pub fn from_residuals(residuals: &[f64], stdevs: &[f64]) -> CalResult<Self> {
        Self::build(residuals, stdevs, None)
    }

    /// Build the empirical calibration curve, firing `on_quantile` with
    /// `(completed, total)` after each grid point is evaluated.
    ///
    /// The callback is the injected replacement for the original global
    /// progress bar: it is user feedback only and has no effect on the
    /// computed curve.
    ///
    /// # Errors
    /// Same as [`CalibrationCurve::from_residuals`].
    pub fn from_residuals_with_progress(
        residuals: &[f64],
        stdevs: &[f64],
        on_quantile: &mut dyn FnMut(usize, usize),
    ) -> CalResult<Self> {
        Self::build(residuals, stdevs, Some(on_quantile))
    }

    /// Wrap precomputed (predicted, observed) sequences as a curve.
    ///
    /// Validates once so that the score methods can assume the curve
    /// invariants (equal length ≥ 2, finite values, non-decreasing nominal
    /// axis) without re-checking. Non-contiguous arrays (reversed or
    /// strided views made owned) are accepted and repacked into standard
    /// layout.
    ///
    /// # Errors
    /// - [`crate::calibration::CalibrationError::CurveLengthMismatch`],
    ///   [`crate::calibration::CalibrationError::CurveTooShort`],
    ///   [`crate::calibration::CalibrationError::NonFiniteValue`], and
    ///   [`crate::calibration::CalibrationError::NonMonotonicAxis`] for
    ///   malformed sequences.
    pub fn from_points(predicted: Array1<f64>, observed: Array1<f64>) -> CalResult<Self> {
        let predicted = into_standard_layout(predicted);
        let observed = into_standard_layout(observed);
        validate_curve_for_area(
            predicted.as_slice().expect("standard-layout Array1 is contiguous"),
            observed.as_slice().expect("standard-layout Array1 is contiguous"),
        )?;
        Ok(CalibrationCurve { predicted, observed })
    }

    fn build(
        residuals: &[f64],
        stdevs: &[f64],
        mut on_quantile: Option<&mut dyn FnMut(usize, usize)>,
    ) -> CalResult<Self> {
        let predicted = nominal_confidence_levels();
        let mut observed = Array1::zeros(CURVE_POINTS);

        for (k, &quantile) in predicted.iter().enumerate() {
            observed[k] = density_at_percentile(quantile, residuals, stdevs)?;
            if let Some(callback) = on_quantile.as_deref_mut() {
                callback(k + 1, CURVE_POINTS);
            }
        }

        Ok(CalibrationCurve { predicted, observed })
    }

    /// Nominal confidence levels (the x axis of the curve).
    pub fn predicted(&self) -> &Array1<f64> {
        &self.predicted
    }

    /// Observed coverage fractions (the y axis of the curve).
    pub fn observed(&self) -> &Array1<f64> {
        &self.observed
    }

    /// Sum of squared pointwise deviations from perfect calibration.
    pub fn calibration_error(&self) -> f64 {
        squared_deviation_sum(self.predicted.iter(), self.observed.iter())
    }

    /// Total geometric area enclosed between the curve and the diagonal.
    pub fn miscalibration_area(&self) -> f64 {
        area_between_curve_and_diagonal(
            self.predicted.as_slice().expect("curve arrays are contiguous"),
            self.observed.as_slice().expect("curve arrays are contiguous"),
        )
    }
}

/// Repack a possibly strided array into standard layout so the stored
/// curve sequences are always contiguous. No-op for arrays that already
/// are.
fn into_standard_layout(values: Array1<f64>) -> Array1<f64> {
    if values.is_standard_layout() {
        values
    } else {
        values.as_standard_layout().into_owned()
    }
}

/// Sum of squared pointwise deviations between two equal-length confidence
/// sequences.
///
/// Parameters
/// ----------
/// - `predicted`: `&[f64]`
///   Nominal confidence levels. Must be finite.
/// - `observed`: `&[f64]`
///   Observed coverage fractions of equal length. Must be finite.
///
/// Returns
/// -------
/// `CalResult<f64>`
///   - `Ok(error)` with `error = Σᵢ (predictedᵢ − observedᵢ)²`.
///   - `Err(CalibrationError)` when validation fails.
///
/// Errors
/// ------
/// - `CalibrationError::EmptyInput`, `CurveLengthMismatch`,
///   `NonFiniteValue`
///   Returned by `validate_curve_pair` for malformed inputs.
///
/// Notes
/// -----
/// - The score is symmetric in its arguments and is 0 exactly when the two
///   sequences agree pointwise. Pure function, O(N), no side effects.
pub fn calibration_error(predicted: &[f64], observed: &[f64]) -> CalResult<f64> {
    validate_curve_pair(predicted, observed)?;
    Ok(squared_deviation_sum(predicted.iter(), observed.iter()))
}

#[inline]
fn squared_deviation_sum<'a>(
    predicted: impl Iterator<Item = &'a f64>,
    observed: impl Iterator<Item = &'a f64>,
) -> f64 {
    predicted.zip(observed).map(|(p, o)| (p - o).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, s};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The nominal grid: resolution, closed endpoints, even spacing.
    // - Grid-built curves: length, monotone observed coverage, boundary
    //   values at the grid endpoints.
    // - Perfect calibration: both scores exactly zero via `from_points`.
    // - `from_points` on non-contiguous (reversed-layout) input arrays.
    // - Progress-callback accounting.
    // - Symmetry and simple fixtures for `calibration_error`.
    //
    // They intentionally DO NOT cover:
    // - Area fixtures (tested in `calibration::area`) and validation error
    //   branches (tested in `calibration::validation`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the nominal grid has the documented shape: 100 points evenly
    // spaced over the closed interval [0, 1].
    //
    // Given
    // -----
    // - The grid from `nominal_confidence_levels`.
    //
    // Expect
    // ------
    // - Length is `CURVE_POINTS`, first point 0.0, last point 1.0, and
    //   consecutive differences all equal 1/(CURVE_POINTS − 1).
    fn nominal_confidence_levels_are_evenly_spaced_with_closed_endpoints() {
        // Arrange
        let grid = nominal_confidence_levels();
        let expected_step = 1.0 / (CURVE_POINTS as f64 - 1.0);

        // Assert
        assert_eq!(grid.len(), CURVE_POINTS);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[CURVE_POINTS - 1], 1.0);
        for pair in grid.as_slice().expect("contiguous").windows(2) {
            assert!(
                (pair[1] - pair[0] - expected_step).abs() < 1e-12,
                "grid spacing should be uniform"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a grid-built curve has the full resolution and a
    // non-decreasing observed axis with exact boundary coverage.
    //
    // Given
    // -----
    // - A small residual/stdev set with unit stdevs.
    //
    // Expect
    // ------
    // - `observed` has `CURVE_POINTS` entries, starts at 0.0 (nothing
    //   below −∞), ends at 1.0 (everything below +∞), and never decreases.
    fn from_residuals_builds_monotone_curve_with_exact_boundaries() {
        // Arrange
        let residuals = vec![-1.2, -0.4, 0.0, 0.3, 0.8, 1.5];
        let stdevs = vec![1.0; 6];

        // Act
        let curve = CalibrationCurve::from_residuals(&residuals, &stdevs)
            .expect("valid inputs should build a curve");

        // Assert
        let observed = curve.observed();
        assert_eq!(observed.len(), CURVE_POINTS);
        assert_eq!(observed[0], 0.0);
        assert_eq!(observed[CURVE_POINTS - 1], 1.0);
        for pair in observed.as_slice().expect("contiguous").windows(2) {
            assert!(pair[1] >= pair[0], "observed coverage should be non-decreasing");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a curve equal to the diagonal scores zero on both
    // metrics.
    //
    // Given
    // -----
    // - `from_points` with observed == predicted on the nominal grid.
    //
    // Expect
    // ------
    // - `calibration_error()` and `miscalibration_area()` both return 0.
    fn perfectly_calibrated_curve_scores_zero_on_both_metrics() {
        // Arrange
        let grid = nominal_confidence_levels();
        let curve = CalibrationCurve::from_points(grid.clone(), grid)
            .expect("the diagonal is a valid curve");

        // Act / Assert
        assert_eq!(curve.calibration_error(), 0.0);
        assert_eq!(curve.miscalibration_area(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that the progress callback fires once per grid point with
    // consistent (completed, total) counts.
    //
    // Given
    // -----
    // - A small residual/stdev set and a counting callback.
    //
    // Expect
    // ------
    // - The callback fires `CURVE_POINTS` times, `completed` runs from 1
    //   to `CURVE_POINTS`, and `total` is always `CURVE_POINTS`.
    fn from_residuals_with_progress_fires_once_per_quantile() {
        // Arrange
        let residuals = vec![-0.3, 0.1, 0.4];
        let stdevs = vec![1.0; 3];
        let mut calls: Vec<(usize, usize)> = Vec::new();

        // Act
        let _curve = CalibrationCurve::from_residuals_with_progress(
            &residuals,
            &stdevs,
            &mut |completed, total| calls.push((completed, total)),
        )
        .expect("valid inputs should build a curve");

        // Assert
        assert_eq!(calls.len(), CURVE_POINTS);
        assert_eq!(calls.first(), Some(&(1, CURVE_POINTS)));
        assert_eq!(calls.last(), Some(&(CURVE_POINTS, CURVE_POINTS)));
    }

    #[test]
    // Purpose
    // -------
    // Verify that the squared-error score is symmetric in its arguments.
    //
    // Given
    // -----
    // - Two distinct finite sequences.
    //
    // Expect
    // ------
    // - `calibration_error(a, b) == calibration_error(b, a)`.
    fn calibration_error_is_symmetric() {
        // Arrange
        let a = vec![0.0, 0.3, 0.7, 1.0];
        let b = vec![0.1, 0.2, 0.9, 0.8];

        // Act
        let forward = calibration_error(&a, &b).expect("valid inputs");
        let backward = calibration_error(&b, &a).expect("valid inputs");

        // Assert
        assert_eq!(forward, backward);
    }

    #[test]
    // Purpose
    // -------
    // Pin the squared-error score on a simple fixture.
    //
    // Given
    // -----
    // - predicted = [0, 0.5, 1], observed = [0, 1, 1].
    //
    // Expect
    // ------
    // - The score is (0.5 − 1)² = 0.25.
    fn calibration_error_matches_hand_computed_fixture() {
        // Arrange
        let predicted = vec![0.0, 0.5, 1.0];
        let observed = vec![0.0, 1.0, 1.0];

        // Act
        let error = calibration_error(&predicted, &observed).expect("valid inputs");

        // Assert
        assert!((error - 0.25).abs() < 1e-12, "expected 0.25, got {error}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `from_points` re-exposes the supplied sequences
    // unchanged through the accessors.
    //
    // Given
    // -----
    // - Small explicit predicted/observed arrays.
    //
    // Expect
    // ------
    // - `predicted()` and `observed()` return the same values.
    fn from_points_round_trips_sequences_through_accessors() {
        // Arrange
        let predicted = array![0.0, 0.5, 1.0];
        let observed = array![0.1, 0.6, 0.9];

        // Act
        let curve = CalibrationCurve::from_points(predicted.clone(), observed.clone())
            .expect("valid inputs");

        // Assert
        assert_eq!(curve.predicted(), &predicted);
        assert_eq!(curve.observed(), &observed);
    }

    #[test]
    // Purpose
    // -------
    // Verify that `from_points` accepts arrays whose memory layout is
    // reversed (negative stride) instead of panicking, and still scores
    // them correctly.
    //
    // Given
    // -----
    // - predicted = [0, 0.5, 1] and observed = [0, 1, 1], both produced by
    //   reversing descending arrays in place.
    //
    // Expect
    // ------
    // - `from_points` returns `Ok` and `miscalibration_area()` matches the
    //   contiguous fixture value 0.25.
    fn from_points_accepts_reversed_memory_layout() {
        // Arrange
        let predicted = array![1.0, 0.5, 0.0].slice_move(s![..;-1]);
        let observed = array![1.0, 1.0, 0.0].slice_move(s![..;-1]);
        assert!(predicted.as_slice().is_none(), "fixture should be non-contiguous");

        // Act
        let curve = CalibrationCurve::from_points(predicted, observed)
            .expect("reversed-layout arrays should be accepted");

        // Assert
        assert_eq!(curve.predicted(), &array![0.0, 0.5, 1.0]);
        assert!((curve.miscalibration_area() - 0.25).abs() < 1e-12);
    }
}
