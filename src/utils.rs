//! utils — conversion helpers for the PyO3 binding surface.
//!
//! Purpose
//! -------
//! Convert Python array-likes (numpy arrays, pandas objects, plain
//! sequences) into the Rust-side array types the calibration engine
//! consumes. Everything here is feature-gated behind `python-bindings`
//! and performs only extraction and error mapping; no numerical work.

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

/// Extract a 1-D contiguous `f64` array from a Python object.
///
/// Accepts, in order of preference: a `numpy.ndarray` of float64, any
/// object with a `to_numpy` method (pandas Series), or a plain Python
/// sequence of floats. The returned view is read-only and contiguous.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Extract a 2-D `f64` array from a Python object.
///
/// Accepts a `numpy.ndarray` of float64 or any object with a `to_numpy`
/// method (pandas DataFrame). Rows are samples; column meaning follows
/// the caller's convention.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(
    raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method0("to_numpy") {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    Err(pyo3::exceptions::PyTypeError::new_err(
        "expected a 2-D numpy.ndarray or pandas.DataFrame of float64",
    ))
}
