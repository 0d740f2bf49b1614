//! uq_calibration — uncertainty-calibration metrics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the calibration engine to Python via the `_uq_calibration`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes, functions, and submodules
//! used by the `uq_calibration` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`calibration`, `datasets`, and
//!   `simulation`) as the public crate surface.
//! - Define `#[pyclass]` wrappers, `#[pyfunction]` entry points, and the
//!   `#[pymodule]` initializer for the `_uq_calibration` Python
//!   extension.
//! - Create and register the `calibration` Python submodule under
//!   `uq_calibration` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules;
//!   this file performs only FFI glue, input validation, and error
//!   mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror
//!   the invariants and signatures of their Rust counterparts.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_uq_calibration.calibration` and
//!   are typically wrapped by thin pure-Python facades in the top-level
//!   `uq_calibration` package.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner
//!   modules and can ignore the PyO3 items guarded by the
//!   `python-bindings` feature.
//! - The Python packaging layer imports the `_uq_calibration` module
//!   defined here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules and by the crate's integration tests; smoke tests for the
//!   PyO3 bindings run from Python.

pub mod calibration;
pub mod datasets;
pub mod simulation;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    calibration::{ConvergenceStudy, curve::CalibrationCurve as CurveOutcome},
    utils::{extract_f64_array, extract_f64_matrix},
};

/// Calibration — Python-facing wrapper for the empirical calibration
/// curve.
///
/// Purpose
/// -------
/// Build the 100-point calibration curve of a set of normalized
/// residuals when called from Python and forward all computation to
/// [`CurveOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into contiguous `f64` slices.
/// - Build the curve via [`CurveOutcome::from_residuals`] and store the
///   outcome internally.
/// - Expose the curve arrays and both scalar miscalibration scores as
///   Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via `Calibration(residuals, stdevs)`:
/// - `residuals`: `&PyAny`
///   One-dimensional array-like of raw residuals (truth − prediction).
/// - `stdevs`: `&PyAny`
///   One-dimensional array-like of predicted standard deviations, one
///   per residual, all positive.
///
/// Fields
/// ------
/// - `inner`: [`CurveOutcome`]
///   Rust-side curve holding the evaluated grid used by the accessors.
///
/// Notes
/// -----
/// - This type is primarily intended to be used from Python; native Rust
///   code should prefer calling [`CurveOutcome::from_residuals`]
///   directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "uq_calibration.calibration")]
pub struct Calibration {
    /// The evaluated calibration curve.
    inner: CurveOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Calibration {
    /// Empirical calibration curve on the 100-point nominal grid.
    #[new]
    #[pyo3(text_signature = "(residuals, stdevs, /)")]
    pub fn new<'py>(
        py: Python<'py>, residuals: &Bound<'py, PyAny>, stdevs: &Bound<'py, PyAny>,
    ) -> PyResult<Calibration> {
        let residuals_arr = extract_f64_array(py, residuals)?;
        let stdevs_arr = extract_f64_array(py, stdevs)?;
        let residuals_slice = residuals_arr.as_slice().map_err(|_| {
            PyValueError::new_err("residuals must be a 1-D contiguous float64 array or sequence")
        })?;
        let stdevs_slice = stdevs_arr.as_slice().map_err(|_| {
            PyValueError::new_err("stdevs must be a 1-D contiguous float64 array or sequence")
        })?;

        let inner = CurveOutcome::from_residuals(residuals_slice, stdevs_slice)?;
        Ok(Calibration { inner })
    }

    /// Nominal confidence levels of the curve grid.
    #[getter]
    pub fn predicted(&self) -> Vec<f64> {
        self.inner.predicted().to_vec()
    }

    /// Observed empirical coverage at each grid point.
    #[getter]
    pub fn observed(&self) -> Vec<f64> {
        self.inner.observed().to_vec()
    }

    /// Sum of squared pointwise deviations from the diagonal.
    #[getter]
    pub fn calibration_error(&self) -> f64 {
        self.inner.calibration_error()
    }

    /// Geometric area between the curve and the diagonal.
    #[getter]
    pub fn miscalibration_area(&self) -> f64 {
        self.inner.miscalibration_area()
    }
}

/// Convergence — Python-facing wrapper for the sample-count convergence
/// study.
///
/// Purpose
/// -------
/// Run the calibration convergence study over growing ensemble sizes
/// for paired in-distribution and out-of-distribution pools, forwarding
/// all computation to [`ConvergenceStudy`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Convergence(n_trials, id_draws, ood_draws, id_targets, ood_targets)`:
/// - `n_trials`: `usize`
///   Ensemble budget; evaluated counts are 10, 20, ... up to this value.
/// - `id_draws`, `ood_draws`: `&PyAny`
///   Two-dimensional array-likes of shape (trials, samples) holding the
///   per-trial model predictions for each pool.
/// - `id_targets`, `ood_targets`: `&PyAny`
///   One-dimensional array-likes of ground-truth targets, one per sample
///   column of the corresponding pool.
///
/// Fields
/// ------
/// - `inner`: [`ConvergenceStudy`]
///   Rust-side study holding both scores per pool and trial count.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "uq_calibration.calibration")]
pub struct Convergence {
    /// The evaluated convergence study.
    inner: ConvergenceStudy,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Convergence {
    /// Both calibration scores at growing ensemble sizes.
    #[new]
    #[pyo3(text_signature = "(n_trials, id_draws, ood_draws, id_targets, ood_targets, /)")]
    pub fn new<'py>(
        py: Python<'py>, n_trials: usize, id_draws: &Bound<'py, PyAny>,
        ood_draws: &Bound<'py, PyAny>, id_targets: &Bound<'py, PyAny>,
        ood_targets: &Bound<'py, PyAny>,
    ) -> PyResult<Convergence> {
        let id_draws_arr = extract_f64_matrix(id_draws)?;
        let ood_draws_arr = extract_f64_matrix(ood_draws)?;
        let id_targets_arr = extract_f64_array(py, id_targets)?;
        let ood_targets_arr = extract_f64_array(py, ood_targets)?;

        let id_targets_slice = id_targets_arr.as_slice().map_err(|_| {
            PyValueError::new_err("id_targets must be a 1-D contiguous float64 array or sequence")
        })?;
        let ood_targets_slice = ood_targets_arr.as_slice().map_err(|_| {
            PyValueError::new_err("ood_targets must be a 1-D contiguous float64 array or sequence")
        })?;

        let inner = ConvergenceStudy::run(
            n_trials,
            id_draws_arr.as_array(),
            ood_draws_arr.as_array(),
            id_targets_slice,
            ood_targets_slice,
        )?;
        Ok(Convergence { inner })
    }

    /// Evaluated trial counts, ascending in steps of 10.
    #[getter]
    pub fn trial_counts(&self) -> Vec<usize> {
        self.inner.trial_counts().to_vec()
    }

    /// Squared-error scores for the in-distribution pool.
    #[getter]
    pub fn cal_error_id(&self) -> Vec<f64> {
        self.inner.cal_error_id().to_vec()
    }

    /// Miscalibration areas for the in-distribution pool.
    #[getter]
    pub fn cal_area_id(&self) -> Vec<f64> {
        self.inner.cal_area_id().to_vec()
    }

    /// Squared-error scores for the out-of-distribution pool.
    #[getter]
    pub fn cal_error_ood(&self) -> Vec<f64> {
        self.inner.cal_error_ood().to_vec()
    }

    /// Miscalibration areas for the out-of-distribution pool.
    #[getter]
    pub fn cal_area_ood(&self) -> Vec<f64> {
        self.inner.cal_area_ood().to_vec()
    }
}

/// Empirical coverage of a single nominal Gaussian quantile.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(percentile, residuals, stdevs, /)")]
pub fn density_at_percentile<'py>(
    py: Python<'py>, percentile: f64, residuals: &Bound<'py, PyAny>, stdevs: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let residuals_arr = extract_f64_array(py, residuals)?;
    let stdevs_arr = extract_f64_array(py, stdevs)?;
    let residuals_slice = residuals_arr.as_slice().map_err(|_| {
        PyValueError::new_err("residuals must be a 1-D contiguous float64 array or sequence")
    })?;
    let stdevs_slice = stdevs_arr.as_slice().map_err(|_| {
        PyValueError::new_err("stdevs must be a 1-D contiguous float64 array or sequence")
    })?;

    Ok(calibration::density_at_percentile(percentile, residuals_slice, stdevs_slice)?)
}

/// Geometric area between a calibration curve and the diagonal.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(predicted, observed, /)")]
pub fn miscalibration_area<'py>(
    py: Python<'py>, predicted: &Bound<'py, PyAny>, observed: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let (predicted_arr, observed_arr) = curve_pair(py, predicted, observed)?;
    Ok(calibration::miscalibration_area(&predicted_arr, &observed_arr)?)
}

/// Sum of squared pointwise deviations of a curve from the diagonal.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(predicted, observed, /)")]
pub fn calibration_error<'py>(
    py: Python<'py>, predicted: &Bound<'py, PyAny>, observed: &Bound<'py, PyAny>,
) -> PyResult<f64> {
    let (predicted_arr, observed_arr) = curve_pair(py, predicted, observed)?;
    Ok(calibration::calibration_error(&predicted_arr, &observed_arr)?)
}

#[cfg(feature = "python-bindings")]
fn curve_pair<'py>(
    py: Python<'py>, predicted: &Bound<'py, PyAny>, observed: &Bound<'py, PyAny>,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let predicted_arr = extract_f64_array(py, predicted)?;
    let observed_arr = extract_f64_array(py, observed)?;
    let predicted_slice = predicted_arr.as_slice().map_err(|_| {
        PyValueError::new_err("predicted must be a 1-D contiguous float64 array or sequence")
    })?;
    let observed_slice = observed_arr.as_slice().map_err(|_| {
        PyValueError::new_err("observed must be a 1-D contiguous float64 array or sequence")
    })?;
    Ok((predicted_slice.to_vec(), observed_slice.to_vec()))
}

/// _uq_calibration — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_uq_calibration` Python module and register the
/// `calibration` submodule used by the public `uq_calibration` package.
///
/// Key behaviors
/// -------------
/// - Create the `calibration` submodule and attach its classes and
///   functions.
/// - Register the submodule in `sys.modules` so it is importable via
///   dotted paths from Python.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _uq_calibration<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let calibration_mod = PyModule::new(_py, "calibration")?;
    calibration(_py, m, &calibration_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("uq_calibration.calibration", calibration_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn calibration<'py>(
    _py: Python, uq_calibration: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Calibration>()?;
    m.add_class::<Convergence>()?;
    m.add_function(wrap_pyfunction!(density_at_percentile, m)?)?;
    m.add_function(wrap_pyfunction!(miscalibration_area, m)?)?;
    m.add_function(wrap_pyfunction!(calibration_error, m)?)?;
    uq_calibration.add_submodule(m)?;
    Ok(())
}
