//! Calibration engine for probabilistic regression models.
//!
//! Purpose
//! -------
//! Measure how well a model's per-sample uncertainty estimates match the
//! errors it actually makes. Given point predictions, predicted standard
//! deviations, and ground-truth targets, the engine computes:
//! - the empirical calibration curve (nominal confidence level vs.
//!   observed coverage of normalized residuals),
//! - two scalar miscalibration scores (sum of squared pointwise
//!   deviations, and the geometric area between the curve and the
//!   perfect-calibration diagonal), and
//! - a convergence study of both scores as a function of ensemble sample
//!   count.
//!
//! Key behaviors
//! -------------
//! - [`density_at_percentile`] — empirical coverage of a single nominal
//!   Gaussian quantile.
//! - [`CalibrationCurve`] — the full curve on a 100-point grid over [0, 1],
//!   with an optional injected progress callback.
//! - [`miscalibration_area`] — area between curve and diagonal via
//!   decomposition of the (possibly self-intersecting) closed boundary
//!   into simple sub-polygons.
//! - [`calibration_error`] — the squared-error score.
//! - [`ConvergenceStudy`] — both scores at growing ensemble sizes for
//!   in-distribution and out-of-distribution pools.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every public entry point validates its inputs and returns
//!   [`CalResult`] instead of panicking; helpers assume validated inputs.
//! - All computation is single-threaded, synchronous, and free of shared
//!   state; each call produces fresh outputs from fresh inputs.
//!
//! Downstream usage
//! ----------------
//! - Native Rust callers use the re-exports below. Python callers reach
//!   the same functionality through the feature-gated bindings in the
//!   crate root.
//!
//! Testing notes
//! -------------
//! - Each sub-module carries unit tests for its own contract; the
//!   end-to-end behavior on synthetic Gaussian ensembles is covered by the
//!   crate's integration tests.

pub mod area;
pub mod convergence;
pub mod curve;
pub mod density;
pub mod errors;
pub mod validation;

pub use area::miscalibration_area;
pub use convergence::{ConvergenceStudy, TRIAL_STEP};
pub use curve::{CURVE_POINTS, CalibrationCurve, calibration_error, nominal_confidence_levels};
pub use density::density_at_percentile;
pub use errors::{CalResult, CalibrationError};
