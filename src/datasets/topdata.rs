//! datasets::topdata — preprocessing for the top-tagging jet dataset.
//!
//! Purpose
//! -------
//! Turn raw top-tagging constituents — stored as Cartesian four-momenta
//! (E, px, py, pz) per slot — into a model-ready [`JetBatch`] with
//! binary signal/background labels.
//!
//! Key behaviors
//! -------------
//! - Sum the constituent four-momenta to form the jet four-momentum, then
//!   derive jet pt, eta, phi, and invariant mass from it.
//! - Convert each constituent to (pt, eta, phi), normalize pt by the
//!   constituent pt sum, and recenter eta and phi on the jet axis.
//! - Mask empty constituent slots (zero raw pt) and zero their features
//!   after the recentering, so padded slots never carry the jet-axis
//!   offsets.
//! - Emit two-column labels (background, signal) from the boolean signal
//!   flags.
//!
//! Invariants & assumptions
//! ------------------------
//! - Raw constituents have shape (n, n_const, 4) with features
//!   (E, px, py, pz); empty slots are all-zero.
//! - The jet mass uses `sqrt(|E² − px² − py² − pz²|)`; the absolute value
//!   absorbs small negative values from float cancellation.
//! - Unlike the JetNet dataset, the augmented jet phi here is the true
//!   azimuth of the summed jet momentum.
//!
//! Testing notes
//! -------------
//! - Unit tests build small analytic jets and pin the jet-level
//!   kinematics, per-constituent normalization and recentering, masking,
//!   and the label columns.

use ndarray::{Array1, Array2, Array3, ArrayView3, Axis};

use crate::datasets::errors::{DatasetError, DatasetResult};
use crate::datasets::jet::{AUG_FEATURES, CONSTITUENT_FEATURES, JetBatch};
use crate::datasets::kinematics::{pt_eta_phi_from_cartesian, pt_eta_phi_single};

/// Number of raw per-constituent features (E, px, py, pz).
pub const RAW_FOUR_MOMENTUM_FEATURES: usize = 4;

/// Preprocess raw top-tagging constituents into one model-ready batch.
///
/// Parameters
/// ----------
/// - `constituents`: (n, n_const, 4) constituent four-momenta as
///   (E, px, py, pz); empty slots are all-zero.
/// - `is_signal`: One signal flag per jet; `true` marks a top jet.
///
/// Returns
/// -------
/// - `DatasetResult<JetBatch>`: The batch, with labels
///   (1 − signal, signal) per jet.
///
/// # Errors
/// - [`DatasetError::EmptyBatch`] if `constituents` holds no jets.
/// - [`DatasetError::ShapeMismatch`] if the feature dimension is not 4.
/// - [`DatasetError::LabelCountMismatch`] if `is_signal` does not pair
///   1:1 with the jets.
///
/// Notes
/// -----
/// - A jet whose slots are all empty keeps zero features instead of
///   dividing by a zero pt sum.
pub fn preprocess_topdata(
    constituents: ArrayView3<f64>,
    is_signal: &[bool],
) -> DatasetResult<JetBatch> {
    let (n, n_const, raw_features) = constituents.dim();
    if n == 0 {
        return Err(DatasetError::EmptyBatch);
    }
    if raw_features != RAW_FOUR_MOMENTUM_FEATURES {
        return Err(DatasetError::ShapeMismatch {
            what: "constituent four-momentum features",
            expected: RAW_FOUR_MOMENTUM_FEATURES,
            found: raw_features,
        });
    }
    if is_signal.len() != n {
        return Err(DatasetError::LabelCountMismatch { rows: n, labels: is_signal.len() });
    }

    // Jet four-momentum: sum over constituent slots (empty slots are
    // all-zero and contribute nothing).
    let jet_sums = constituents.sum_axis(Axis(1));
    let jet_e = jet_sums.column(0).to_owned();
    let (jet_pt, jet_eta, jet_phi) = pt_eta_phi_from_cartesian(
        jet_sums.column(1),
        jet_sums.column(2),
        jet_sums.column(3),
    );
    let jet_m: Array1<f64> = (0..n)
        .map(|i| {
            let e = jet_sums[(i, 0)];
            let px = jet_sums[(i, 1)];
            let py = jet_sums[(i, 2)];
            let pz = jet_sums[(i, 3)];
            (e * e - px * px - py * py - pz * pz).abs().sqrt()
        })
        .collect();

    let mut particles = Array3::zeros((n, n_const, CONSTITUENT_FEATURES));
    let mut masks = Array3::zeros((n, 1, n_const));
    let mut labels = Array2::zeros((n, 2));
    let mut aug = Array2::zeros((n, AUG_FEATURES));

    for i in 0..n {
        let mut ptsum = 0.0;
        let mut nconst = 0.0;
        for c in 0..n_const {
            let (pt, eta, phi) = constituent_pt_eta_phi(&constituents, i, c);
            particles[(i, c, 0)] = pt;
            particles[(i, c, 1)] = eta;
            particles[(i, c, 2)] = phi;
            ptsum += pt;
            if constituents[(i, c, 0)] != 0.0 {
                nconst += 1.0;
            }
        }

        for c in 0..n_const {
            // Empty slots stay all-zero: they must not pick up the
            // recentering offsets.
            if particles[(i, c, 0)] == 0.0 {
                particles[(i, c, 1)] = 0.0;
                particles[(i, c, 2)] = 0.0;
                continue;
            }
            masks[(i, 0, c)] = 1.0;
            if ptsum > 0.0 {
                particles[(i, c, 0)] /= ptsum;
            }
            particles[(i, c, 1)] -= jet_eta[i];
            particles[(i, c, 2)] -= jet_phi[i];
        }

        let signal = if is_signal[i] { 1.0 } else { 0.0 };
        labels[(i, 0)] = 1.0 - signal;
        labels[(i, 1)] = signal;

        aug[(i, 0)] = jet_e[i];
        aug[(i, 1)] = jet_m[i];
        aug[(i, 2)] = jet_pt[i];
        aug[(i, 3)] = jet_eta[i];
        aug[(i, 4)] = jet_phi[i];
        aug[(i, 5)] = ptsum;
        aug[(i, 6)] = nconst;
    }

    JetBatch::new(particles, masks, labels, aug)
}

/// (pt, eta, phi) of a single constituent slot, via the guarded
/// [`pt_eta_phi_single`] kernel.
fn constituent_pt_eta_phi(constituents: &ArrayView3<f64>, i: usize, c: usize) -> (f64, f64, f64) {
    pt_eta_phi_single(
        constituents[(i, c, 1)],
        constituents[(i, c, 2)],
        constituents[(i, c, 3)],
    )
}
