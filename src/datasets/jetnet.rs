//! datasets::jetnet — preprocessing for the JetNet-style jet dataset.
//!
//! Purpose
//! -------
//! Turn per-class raw JetNet arrays — constituents stored as relative
//! (eta, phi, pt-fraction, mask) quadruplets alongside per-jet summary
//! features — into a single model-ready [`JetBatch`] with one-hot class
//! labels.
//!
//! Key behaviors
//! -------------
//! - Zero out every feature of masked (padded) constituent slots before
//!   any arithmetic touches them.
//! - Reorder constituent features from (eta, phi, pt) storage order to
//!   the batch convention (pt, eta, phi).
//! - Rescale constituent pt: the stored fractions are multiplied by the
//!   jet pt and then renormalized by the constituent pt sum.
//! - Assemble the 7 augmented scalars per jet; jet energy is derived from
//!   the transverse mass, `E = sqrt(pt² + m²)·sinh(eta)`, and jet phi is
//!   identically zero in this dataset.
//!
//! Invariants & assumptions
//! ------------------------
//! - Raw constituents have shape (n, n_const, 4) with features
//!   (eta, phi, pt, mask); raw jets have shape (n, 4) with features
//!   (pt, eta, mass, n_constituents).
//! - Classes are labeled by their position in the input slice; the output
//!   batch carries one label column per class.
//!
//! Testing notes
//! -------------
//! - Unit tests build tiny synthetic classes and pin the masking,
//!   reordering, pt normalization, one-hot labels, and augmented scalars.

use ndarray::{Array2, Array3};

use crate::datasets::errors::{DatasetError, DatasetResult};
use crate::datasets::jet::{AUG_FEATURES, CONSTITUENT_FEATURES, JetBatch};

/// Number of raw per-constituent features (eta, phi, pt, mask).
pub const RAW_CONSTITUENT_FEATURES: usize = 4;

/// Number of raw per-jet features (pt, eta, mass, n_constituents).
pub const RAW_JET_FEATURES: usize = 4;

/// JetNetClass — raw arrays of one jet class, as loaded from storage.
///
/// Fields
/// ------
/// - `particles`: (n, n_const, 4) constituents as (eta, phi, pt-fraction,
///   mask), where pt is stored relative to the jet pt.
/// - `jets`: (n, 4) per-jet summaries as (pt, eta, mass, n_constituents).
#[derive(Debug, Clone, PartialEq)]
pub struct JetNetClass {
    pub particles: Array3<f64>,
    pub jets: Array2<f64>,
}

/// Preprocess per-class raw JetNet arrays into one model-ready batch.
///
/// Classes are labeled by their position in `classes`: the k-th class
/// receives a one-hot label with a 1 in column k, and the output batch
/// has `classes.len()` label columns. Jets appear in input order, class
/// by class.
///
/// Parameters
/// ----------
/// - `classes`: One [`JetNetClass`] per jet class, all sharing the same
///   number of constituent slots.
///
/// Returns
/// -------
/// - `DatasetResult<JetBatch>`: The combined batch, or the first shape
///   violation encountered.
///
/// # Errors
/// - [`DatasetError::EmptyBatch`] if `classes` is empty or any class
///   holds no jets.
/// - [`DatasetError::ShapeMismatch`] if raw feature dimensions differ
///   from the documented layout, or classes disagree on constituent
///   slots.
/// - [`DatasetError::LabelCountMismatch`] if a class's jet summaries do
///   not pair 1:1 with its constituent rows.
///
/// Notes
/// -----
/// - A jet whose constituents are all masked keeps zero pt fractions
///   instead of dividing by a zero pt sum.
pub fn preprocess_jetnet(classes: &[JetNetClass]) -> DatasetResult<JetBatch> {
    let first = classes.first().ok_or(DatasetError::EmptyBatch)?;
    let n_const = first.particles.dim().1;
    let n_classes = classes.len();

    let mut combined: Option<JetBatch> = None;
    for (class_idx, class) in classes.iter().enumerate() {
        let batch = preprocess_class(class, class_idx, n_classes, n_const)?;
        combined = Some(match combined {
            Some(acc) => acc.concat(&batch)?,
            None => batch,
        });
    }

    // classes is non-empty, so at least one batch was produced.
    Ok(combined.expect("at least one class"))
}

fn preprocess_class(
    class: &JetNetClass,
    class_idx: usize,
    n_classes: usize,
    n_const: usize,
) -> DatasetResult<JetBatch> {
    let (n, class_const, raw_features) = class.particles.dim();
    if n == 0 {
        return Err(DatasetError::EmptyBatch);
    }
    if raw_features != RAW_CONSTITUENT_FEATURES {
        return Err(DatasetError::ShapeMismatch {
            what: "raw constituent features",
            expected: RAW_CONSTITUENT_FEATURES,
            found: raw_features,
        });
    }
    if class_const != n_const {
        return Err(DatasetError::ShapeMismatch {
            what: "constituent slots",
            expected: n_const,
            found: class_const,
        });
    }
    if class.jets.ncols() != RAW_JET_FEATURES {
        return Err(DatasetError::ShapeMismatch {
            what: "raw jet features",
            expected: RAW_JET_FEATURES,
            found: class.jets.ncols(),
        });
    }
    if class.jets.nrows() != n {
        return Err(DatasetError::LabelCountMismatch { rows: n, labels: class.jets.nrows() });
    }

    let mut particles = Array3::zeros((n, n_const, CONSTITUENT_FEATURES));
    let mut masks = Array3::zeros((n, 1, n_const));
    let mut labels = Array2::zeros((n, n_classes));
    let mut aug = Array2::zeros((n, AUG_FEATURES));

    for i in 0..n {
        let jet_pt = class.jets[(i, 0)];
        let jet_eta = class.jets[(i, 1)];
        let jet_m = class.jets[(i, 2)];
        let jet_nconst = class.jets[(i, 3)];

        // Masked slots are zeroed before the pt rescaling so padding never
        // leaks into the pt sum.
        let mut ptsum = 0.0;
        for c in 0..n_const {
            let mask = class.particles[(i, c, 3)];
            if mask == 0.0 {
                continue;
            }
            masks[(i, 0, c)] = mask;
            let pt_abs = class.particles[(i, c, 2)] * jet_pt;
            particles[(i, c, 0)] = pt_abs;
            particles[(i, c, 1)] = class.particles[(i, c, 0)];
            particles[(i, c, 2)] = class.particles[(i, c, 1)];
            ptsum += pt_abs;
        }
        if ptsum > 0.0 {
            for c in 0..n_const {
                particles[(i, c, 0)] /= ptsum;
            }
        }

        labels[(i, class_idx)] = 1.0;

        let jet_mt = (jet_pt * jet_pt + jet_m * jet_m).sqrt();
        let jet_e = jet_mt * jet_eta.sinh();
        aug[(i, 0)] = jet_e;
        aug[(i, 1)] = jet_m;
        aug[(i, 2)] = jet_pt;
        aug[(i, 3)] = jet_eta;
        // aug[(i, 4)] = jet phi, identically zero for this dataset.
        aug[(i, 5)] = ptsum;
        aug[(i, 6)] = jet_nconst;
    }

    JetBatch::new(particles, masks, labels, aug)
}
