//! calibration::convergence — calibration scores vs. ensemble sample count.
//!
//! Purpose
//! -------
//! Quantify how the calibration-quality estimate of an ensemble model
//! stabilizes as more ensemble draws are averaged. Given pools of repeated
//! prediction draws (in-distribution and out-of-distribution) and their
//! ground-truth targets, the study evaluates the full calibration curve and
//! both miscalibration scores at growing trial counts and reports the four
//! score sequences side by side.
//!
//! Key behaviors
//! -------------
//! - Iterate trial counts `10, 20, …` up to the budget (length
//!   `n_trials / TRIAL_STEP`, ascending).
//! - At each count `i`, take the first `i` draws of each pool, form
//!   residuals as `target − mean(draws)` and stdevs as the population
//!   (ddof = 0) standard deviation of the draws, per sample.
//! - Build the 100-point calibration curve for each pool and record the
//!   squared-error and area scores.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pools are `draws × samples` matrices: rows index independent ensemble
//!   draws, columns index samples. Both pools must hold at least
//!   `n_trials` rows, and each target array must match its pool's sample
//!   dimension.
//! - Ensemble draws must have nonzero spread in every sample column for
//!   every evaluated window; a zero column spread yields a zero stdev,
//!   which the curve construction rejects.
//!
//! Conventions
//! -----------
//! - The four score sequences and the trial-count sequence are parallel:
//!   entry `k` of each belongs to trial count `trial_counts()[k]`.
//! - "ID" denotes in-distribution, "OOD" out-of-distribution, matching the
//!   glossary of the study.
//!
//! Downstream usage
//! ----------------
//! - Plotting layers (out of scope here) consume the parallel sequences to
//!   draw convergence curves; the Python bindings re-expose the accessors.
//! - Each trial count is evaluated independently from read-only inputs, so
//!   callers may shard the counts if they ever need to.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the trial-count sequence invariant (ascending,
//!   step 10, length `n_trials / 10`), the parallel lengths of all four
//!   score sequences, validation of budget/pool/target mismatches, and a
//!   calibrated-pool sanity check on the final scores.

use ndarray::{ArrayView2, Axis, s};

use crate::calibration::curve::CalibrationCurve;
use crate::calibration::errors::{CalResult, CalibrationError};

/// Granularity of the trial-count grid.
pub const TRIAL_STEP: usize = 10;

/// ConvergenceStudy — calibration scores at growing ensemble sizes.
///
/// Purpose
/// -------
/// Hold the outcome of one convergence study: the evaluated trial counts
/// and, for each count, the squared-error and area scores of the
/// in-distribution and out-of-distribution calibration curves.
///
/// Key behaviors
/// -------------
/// - Constructed via [`ConvergenceStudy::run`]; the five sequences are
///   parallel and immutable afterwards.
/// - Accessors expose each sequence as a slice.
///
/// Invariants
/// ----------
/// - `trial_counts` equals `[10, 20, …, TRIAL_STEP · (n_trials / TRIAL_STEP)]`
///   in ascending order.
/// - All four score sequences have the same length as `trial_counts`.
///
/// Performance
/// -----------
/// - Each trial count re-runs two full 100-point curve constructions, so
///   the total cost is O((n_trials / 10) · 100 · N) in the sample count N.
///
/// Notes
/// -----
/// - The study is a deterministic pure transform of its inputs; there is
///   no shared state between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceStudy {
    trial_counts: Vec<usize>,
    cal_error_id: Vec<f64>,
    cal_area_id: Vec<f64>,
    cal_error_ood: Vec<f64>,
    cal_area_ood: Vec<f64>,
}

impl ConvergenceStudy {
    /// Run the convergence study over both prediction pools.
    ///
    /// Parameters
    /// ----------
    /// - `n_trials`: `usize`
    ///   Trial budget. Counts `10, 20, …` up to the largest multiple of
    ///   [`TRIAL_STEP`] not exceeding `n_trials` are evaluated; must be at
    ///   least [`TRIAL_STEP`].
    /// - `id_draws`, `ood_draws`: `ArrayView2<f64>`
    ///   Prediction pools, one row per independent ensemble draw and one
    ///   column per sample. Each must hold at least `n_trials` rows.
    /// - `id_targets`, `ood_targets`: `&[f64]`
    ///   Ground-truth targets for the corresponding pool, one entry per
    ///   sample column.
    ///
    /// Returns
    /// -------
    /// `CalResult<ConvergenceStudy>`
    ///   - `Ok(study)` holding the trial counts and the four parallel
    ///     score sequences.
    ///   - `Err(CalibrationError)` when validation fails or a window
    ///     degenerates (e.g., a zero ensemble spread in some column).
    ///
    /// Errors
    /// ------
    /// - `CalibrationError::InvalidTrialBudget`
    ///   Returned when `n_trials < TRIAL_STEP`.
    /// - `CalibrationError::InsufficientDraws`
    ///   Returned when a pool holds fewer than `n_trials` rows; the
    ///   payload names the offending pool.
    /// - `CalibrationError::TargetLengthMismatch`
    ///   Returned when a target array does not match its pool's sample
    ///   dimension.
    /// - `CalibrationError::NonPositiveStdev` and other curve errors
    ///   Propagated from the per-window curve construction.
    ///
    /// Panics
    /// ------
    /// - Never panics under normal operation; all user-facing invalid
    ///   inputs are surfaced as `CalibrationError` values.
    ///
    /// Notes
    /// -----
    /// - Residuals and stdevs are recomputed from scratch at every trial
    ///   count; windows only ever grow, so scores typically stabilize as
    ///   the count increases.
    pub fn run(
        n_trials: usize,
        id_draws: ArrayView2<f64>,
        ood_draws: ArrayView2<f64>,
        id_targets: &[f64],
        ood_targets: &[f64],
    ) -> CalResult<Self> {
        validate_study_inputs(n_trials, &id_draws, &ood_draws, id_targets, ood_targets)?;

        let steps = n_trials / TRIAL_STEP;
        let mut study = ConvergenceStudy {
            trial_counts: Vec::with_capacity(steps),
            cal_error_id: Vec::with_capacity(steps),
            cal_area_id: Vec::with_capacity(steps),
            cal_error_ood: Vec::with_capacity(steps),
            cal_area_ood: Vec::with_capacity(steps),
        };

        for step in 1..=steps {
            let count = step * TRIAL_STEP;

            let (error_id, area_id) = window_scores(&id_draws, id_targets, count)?;
            let (error_ood, area_ood) = window_scores(&ood_draws, ood_targets, count)?;

            study.trial_counts.push(count);
            study.cal_error_id.push(error_id);
            study.cal_area_id.push(area_id);
            study.cal_error_ood.push(error_ood);
            study.cal_area_ood.push(area_ood);
        }

        Ok(study)
    }

    /// Evaluated trial counts, ascending in steps of [`TRIAL_STEP`].
    pub fn trial_counts(&self) -> &[usize] {
        &self.trial_counts
    }

    /// Squared-error scores for the in-distribution pool.
    pub fn cal_error_id(&self) -> &[f64] {
        &self.cal_error_id
    }

    /// Miscalibration areas for the in-distribution pool.
    pub fn cal_area_id(&self) -> &[f64] {
        &self.cal_area_id
    }

    /// Squared-error scores for the out-of-distribution pool.
    pub fn cal_error_ood(&self) -> &[f64] {
        &self.cal_error_ood
    }

    /// Miscalibration areas for the out-of-distribution pool.
    pub fn cal_area_ood(&self) -> &[f64] {
        &self.cal_area_ood
    }
}

/// Compute both calibration scores for the first `rows` draws of a pool.
///
/// Residuals are `target − mean(draws)` and stdevs the population
/// (ddof = 0) standard deviation, both taken per sample column over the
/// window. Assumes validated inputs (`rows ≥ 1`, `rows ≤ nrows`, targets
/// matching the sample dimension).
fn window_scores(
    draws: &ArrayView2<f64>,
    targets: &[f64],
    rows: usize,
) -> CalResult<(f64, f64)> {
    let window = draws.slice(s![..rows, ..]);
    let means = window.mean_axis(Axis(0)).expect("validated window is non-empty");
    let stdevs = window.std_axis(Axis(0), 0.0);

    let residuals: Vec<f64> =
        targets.iter().zip(means.iter()).map(|(target, mean)| target - mean).collect();

    let curve = CalibrationCurve::from_residuals(
        &residuals,
        stdevs.as_slice().expect("owned Array1 is contiguous"),
    )?;

    Ok((curve.calibration_error(), curve.miscalibration_area()))
}

fn validate_study_inputs(
    n_trials: usize,
    id_draws: &ArrayView2<f64>,
    ood_draws: &ArrayView2<f64>,
    id_targets: &[f64],
    ood_targets: &[f64],
) -> CalResult<()> {
    if n_trials < TRIAL_STEP {
        return Err(CalibrationError::InvalidTrialBudget(n_trials));
    }

    // One call per pool; the two views need not share a lifetime.
    validate_pool("in-distribution", id_draws, id_targets, n_trials)?;
    validate_pool("out-of-distribution", ood_draws, ood_targets, n_trials)?;

    Ok(())
}

fn validate_pool(
    pool: &'static str,
    draws: &ArrayView2<f64>,
    targets: &[f64],
    n_trials: usize,
) -> CalResult<()> {
    if draws.nrows() < n_trials {
        return Err(CalibrationError::InsufficientDraws {
            pool,
            rows: draws.nrows(),
            needed: n_trials,
        });
    }
    if targets.len() != draws.ncols() {
        return Err(CalibrationError::TargetLengthMismatch {
            pool,
            targets: targets.len(),
            columns: draws.ncols(),
        });
    }

    Ok(())
}
