//! datasets::kinematics — four-momentum coordinate conversions.
//!
//! Purpose
//! -------
//! Convert particle momenta between Cartesian components (px, py, pz)
//! and collider coordinates (transverse momentum, pseudorapidity,
//! azimuthal angle), plus a plane rotation used when augmenting jet
//! samples. These are the building blocks of the jet preprocessing
//! pipelines in [`crate::datasets::topdata`].
//!
//! Key behaviors
//! -------------
//! - [`pt_eta_phi_single`] — (px, py, pz) → (pt, eta, phi) for one
//!   momentum vector, with explicit zero-vector guards.
//! - [`pt_eta_phi_from_cartesian`] — the vectorized form of the same
//!   conversion.
//! - [`cartesian_from_pt_eta_phi`] — the inverse map.
//! - [`rotate_plane`] — rotate a pair of momentum components by a fixed
//!   angle.
//!
//! Invariants & assumptions
//! ------------------------
//! - Zero-padded constituents (all momentum components zero) map to
//!   (pt, eta, phi) = (0, 0, 0) rather than NaN; the guards below are
//!   what make padded jet batches safe to process in bulk.
//! - eta is computed as -0.5·ln((1 - cos θ)/(1 + cos θ)), which is only
//!   evaluated where cos²θ < 1; a particle moving exactly along the beam
//!   axis keeps eta = 0.
//!
//! Conventions
//! -----------
//! - All functions operate element-wise on equal-length [`Array1`]s and
//!   never allocate more than their outputs.
//! - Angles are in radians; phi is `atan2(py, px)` in (-π, π].
//!
//! Testing notes
//! -------------
//! - Unit tests cover round-trips, the zero-vector and beam-axis guards,
//!   and the rotation identity at characteristic angles.

use ndarray::{Array1, ArrayView1, Zip};

/// Convert one Cartesian momentum vector to (pt, eta, phi).
///
/// The guards keep zero-padded constituent slots inert: a zero momentum
/// vector yields (0, 0, 0) and a beam-axis vector yields eta = phi = 0,
/// never NaN. [`pt_eta_phi_from_cartesian`] applies this conversion
/// element-wise; the jet pipelines call it directly per constituent slot.
pub fn pt_eta_phi_single(px: f64, py: f64, pz: f64) -> (f64, f64, f64) {
    let pt = px.hypot(py);

    // θ defaults to 0 for a zero momentum vector.
    let theta = if px != 0.0 || py != 0.0 || pz != 0.0 { pt.atan2(pz) } else { 0.0 };
    let cos_theta = theta.cos();
    let eta = if cos_theta * cos_theta < 1.0 {
        -0.5 * ((1.0 - cos_theta) / (1.0 + cos_theta)).ln()
    } else {
        0.0
    };

    let phi = if px != 0.0 || py != 0.0 { py.atan2(px) } else { 0.0 };

    (pt, eta, phi)
}

/// Convert Cartesian momenta to (pt, eta, phi), element-wise.
///
/// Parameters
/// ----------
/// - `px`, `py`, `pz`: Equal-length views of the Cartesian momentum
///   components.
///
/// Returns
/// -------
/// - `(pt, eta, phi)`: Three freshly allocated arrays of the same length.
///
/// Notes
/// -----
/// - Entries whose momentum vector is exactly zero yield
///   (pt, eta, phi) = (0, 0, 0); entries on the beam axis yield eta = 0
///   and phi = 0. This keeps zero-padded constituent slots inert instead
///   of producing NaN.
///
/// Examples
/// --------
/// ```
/// use ndarray::array;
/// use uq_calibration::datasets::kinematics::pt_eta_phi_from_cartesian;
///
/// let px = array![3.0];
/// let py = array![4.0];
/// let pz = array![0.0];
/// let (pt, eta, phi) = pt_eta_phi_from_cartesian(px.view(), py.view(), pz.view());
/// assert!((pt[0] - 5.0).abs() < 1e-12);
/// assert!(eta[0].abs() < 1e-12);
/// assert!((phi[0] - 4.0_f64.atan2(3.0)).abs() < 1e-12);
/// ```
pub fn pt_eta_phi_from_cartesian(
    px: ArrayView1<f64>,
    py: ArrayView1<f64>,
    pz: ArrayView1<f64>,
) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
    let n = px.len();
    let mut pt = Array1::zeros(n);
    let mut eta = Array1::zeros(n);
    let mut phi = Array1::zeros(n);

    Zip::from(&mut pt)
        .and(&mut eta)
        .and(&mut phi)
        .and(&px)
        .and(&py)
        .and(&pz)
        .for_each(|pt_i, eta_i, phi_i, &px_i, &py_i, &pz_i| {
            (*pt_i, *eta_i, *phi_i) = pt_eta_phi_single(px_i, py_i, pz_i);
        });

    (pt, eta, phi)
}

/// Convert (pt, eta, phi) back to Cartesian momenta, element-wise.
///
/// Parameters
/// ----------
/// - `pt`, `eta`, `phi`: Equal-length views of the collider coordinates.
///
/// Returns
/// -------
/// - `(px, py, pz)`: Three freshly allocated arrays of the same length,
///   with px = pt·cos φ, py = pt·sin φ, pz = pt·sinh η.
pub fn cartesian_from_pt_eta_phi(
    pt: ArrayView1<f64>,
    eta: ArrayView1<f64>,
    phi: ArrayView1<f64>,
) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
    let px = Zip::from(&pt).and(&phi).map_collect(|&pt_i, &phi_i| pt_i * phi_i.cos());
    let py = Zip::from(&pt).and(&phi).map_collect(|&pt_i, &phi_i| pt_i * phi_i.sin());
    let pz = Zip::from(&pt).and(&eta).map_collect(|&pt_i, &eta_i| pt_i * eta_i.sinh());
    (px, py, pz)
}

/// Rotate a pair of momentum components by `angle` radians, element-wise.
///
/// Parameters
/// ----------
/// - `first`, `second`: Equal-length views of the two in-plane components.
/// - `angle`: Rotation angle in radians.
///
/// Returns
/// -------
/// - The rotated pair
///   (first·cos α − second·sin α, second·cos α + first·sin α).
pub fn rotate_plane(
    first: ArrayView1<f64>,
    second: ArrayView1<f64>,
    angle: f64,
) -> (Array1<f64>, Array1<f64>) {
    let (sin, cos) = angle.sin_cos();
    let rotated_first =
        Zip::from(&first).and(&second).map_collect(|&a, &b| a * cos - b * sin);
    let rotated_second =
        Zip::from(&first).and(&second).map_collect(|&a, &b| b * cos + a * sin);
    (rotated_first, rotated_second)
}
