//! datasets::jet — the model-ready jet batch container.
//!
//! Purpose
//! -------
//! Bundle the four arrays every jet preprocessing pipeline produces —
//! constituent features, padding masks, one-hot labels, and per-jet
//! augmented scalars — into one validated container, so downstream code
//! can shuffle, concatenate, and split whole batches without re-checking
//! shape agreement at every step.
//!
//! Key behaviors
//! -------------
//! - [`JetBatch::new`] — validate the cross-array shape contract once at
//!   construction.
//! - [`JetBatch::concat`] — append another batch along the jet axis.
//! - [`JetBatch::select_rows`] — gather an arbitrary row subset (the
//!   primitive behind shuffled train/val/test splitting).
//!
//! Invariants & assumptions
//! ------------------------
//! - `particles` has shape (n, n_const, 3) with features (pt, eta, phi);
//!   `masks` has shape (n, 1, n_const); `labels` has shape (n, n_classes);
//!   `aug` has shape (n, AUG_FEATURES). All four agree on n, and
//!   particles/masks agree on n_const. A constructed batch never violates
//!   this contract.
//! - Masked (zero-padded) constituent slots carry all-zero features.
//!
//! Conventions
//! -----------
//! - The augmented scalars are, in order: jet energy, mass, pt, eta, phi,
//!   constituent pt sum, and constituent count.
//!
//! Downstream usage
//! ----------------
//! - [`crate::datasets::jetnet`] and [`crate::datasets::topdata`] produce
//!   batches; [`crate::datasets::split`] partitions them.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the construction contract, concatenation (including
//!   class-count disagreement), and row selection bounds.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, concatenate};

use crate::datasets::errors::{DatasetError, DatasetResult};

/// Number of per-jet augmented scalar features.
///
/// In order: jet energy, jet mass, jet pt, jet eta, jet phi, constituent
/// pt sum, constituent count.
pub const AUG_FEATURES: usize = 7;

/// Number of per-constituent features (pt, eta, phi).
pub const CONSTITUENT_FEATURES: usize = 3;

/// JetBatch — constituent features, masks, labels, and augmented scalars
/// for a batch of jets.
///
/// Purpose
/// -------
/// Hold the aligned outputs of a jet preprocessing pipeline and guarantee
/// their shape contract (see the module docs) for the lifetime of the
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct JetBatch {
    particles: Array3<f64>,
    masks: Array3<f64>,
    labels: Array2<f64>,
    aug: Array2<f64>,
}

impl JetBatch {
    /// Construct a batch, validating the cross-array shape contract.
    ///
    /// Parameters
    /// ----------
    /// - `particles`: (n, n_const, 3) constituent features (pt, eta, phi).
    /// - `masks`: (n, 1, n_const) padding masks (1 = real constituent).
    /// - `labels`: (n, n_classes) one-hot class labels.
    /// - `aug`: (n, [`AUG_FEATURES`]) per-jet augmented scalars.
    ///
    /// # Errors
    /// - [`DatasetError::EmptyBatch`] if n = 0.
    /// - [`DatasetError::ShapeMismatch`] if the feature dimensions
    ///   disagree with the documented layout.
    /// - [`DatasetError::LabelCountMismatch`] if any array disagrees on n.
    pub fn new(
        particles: Array3<f64>,
        masks: Array3<f64>,
        labels: Array2<f64>,
        aug: Array2<f64>,
    ) -> DatasetResult<Self> {
        let (n, n_const, n_features) = particles.dim();
        if n == 0 {
            return Err(DatasetError::EmptyBatch);
        }
        if n_features != CONSTITUENT_FEATURES {
            return Err(DatasetError::ShapeMismatch {
                what: "constituent features",
                expected: CONSTITUENT_FEATURES,
                found: n_features,
            });
        }

        let (mask_rows, mask_one, mask_const) = masks.dim();
        if mask_one != 1 || mask_const != n_const {
            return Err(DatasetError::ShapeMismatch {
                what: "mask constituents",
                expected: n_const,
                found: mask_const,
            });
        }
        if mask_rows != n {
            return Err(DatasetError::LabelCountMismatch { rows: n, labels: mask_rows });
        }

        if labels.nrows() != n {
            return Err(DatasetError::LabelCountMismatch { rows: n, labels: labels.nrows() });
        }

        if aug.ncols() != AUG_FEATURES {
            return Err(DatasetError::ShapeMismatch {
                what: "augmented scalars",
                expected: AUG_FEATURES,
                found: aug.ncols(),
            });
        }
        if aug.nrows() != n {
            return Err(DatasetError::LabelCountMismatch { rows: n, labels: aug.nrows() });
        }

        Ok(JetBatch { particles, masks, labels, aug })
    }

    /// Number of jets in the batch.
    pub fn len(&self) -> usize {
        self.particles.len_of(Axis(0))
    }

    /// A constructed batch is never empty; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of constituent slots per jet.
    pub fn n_constituents(&self) -> usize {
        self.particles.len_of(Axis(1))
    }

    /// Number of label classes.
    pub fn n_classes(&self) -> usize {
        self.labels.ncols()
    }

    /// Constituent features, shape (n, n_const, 3).
    pub fn particles(&self) -> ArrayView3<f64> {
        self.particles.view()
    }

    /// Padding masks, shape (n, 1, n_const).
    pub fn masks(&self) -> ArrayView3<f64> {
        self.masks.view()
    }

    /// One-hot labels, shape (n, n_classes).
    pub fn labels(&self) -> ArrayView2<f64> {
        self.labels.view()
    }

    /// Augmented per-jet scalars, shape (n, [`AUG_FEATURES`]).
    pub fn aug(&self) -> ArrayView2<f64> {
        self.aug.view()
    }

    /// Append another batch along the jet axis.
    ///
    /// # Errors
    /// - [`DatasetError::ShapeMismatch`] if the batches disagree on the
    ///   number of constituent slots.
    /// - [`DatasetError::ClassCountMismatch`] if the batches disagree on
    ///   the number of label classes.
    pub fn concat(&self, other: &JetBatch) -> DatasetResult<JetBatch> {
        if other.n_constituents() != self.n_constituents() {
            return Err(DatasetError::ShapeMismatch {
                what: "constituent slots",
                expected: self.n_constituents(),
                found: other.n_constituents(),
            });
        }
        if other.n_classes() != self.n_classes() {
            return Err(DatasetError::ClassCountMismatch {
                expected: self.n_classes(),
                found: other.n_classes(),
            });
        }

        // Shapes agree, so concatenation along axis 0 cannot fail.
        let particles = concatenate(Axis(0), &[self.particles.view(), other.particles.view()])
            .expect("jet axes agree");
        let masks = concatenate(Axis(0), &[self.masks.view(), other.masks.view()])
            .expect("jet axes agree");
        let labels = concatenate(Axis(0), &[self.labels.view(), other.labels.view()])
            .expect("jet axes agree");
        let aug = concatenate(Axis(0), &[self.aug.view(), other.aug.view()])
            .expect("jet axes agree");

        Ok(JetBatch { particles, masks, labels, aug })
    }

    /// Gather the rows named by `indices`, in order, into a new batch.
    ///
    /// Indices may repeat; the result has one jet per index.
    ///
    /// # Errors
    /// - [`DatasetError::EmptyBatch`] if `indices` is empty.
    /// - [`DatasetError::RowIndexOutOfBounds`] if any index is ≥ the
    ///   batch length.
    pub fn select_rows(&self, indices: &[usize]) -> DatasetResult<JetBatch> {
        if indices.is_empty() {
            return Err(DatasetError::EmptyBatch);
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(DatasetError::RowIndexOutOfBounds { index: bad, rows: self.len() });
        }

        Ok(JetBatch {
            particles: self.particles.select(Axis(0), indices),
            masks: self.masks.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
            aug: self.aug.select(Axis(0), indices),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The construction shape contract and each of its error branches.
    // - Concatenation, including class-count disagreement.
    // - Row selection, including order preservation and bounds checking.
    // -------------------------------------------------------------------------

    fn sample_batch(n: usize, n_classes: usize) -> JetBatch {
        let n_const = 4;
        let mut particles = Array3::zeros((n, n_const, CONSTITUENT_FEATURES));
        for i in 0..n {
            particles[(i, 0, 0)] = (i + 1) as f64;
        }
        let masks = Array3::ones((n, 1, n_const));
        let mut labels = Array2::zeros((n, n_classes));
        for i in 0..n {
            labels[(i, i % n_classes)] = 1.0;
        }
        let aug = Array2::ones((n, AUG_FEATURES));
        JetBatch::new(particles, masks, labels, aug).expect("sample batch is well-formed")
    }

    #[test]
    // Purpose
    // -------
    // Verify that the construction contract rejects mismatched feature
    // dimensions and row counts.
    //
    // Given
    // -----
    // - Particles with 2 features instead of 3; aug with a wrong row
    //   count.
    //
    // Expect
    // ------
    // - `ShapeMismatch` for the feature dimension, `LabelCountMismatch`
    //   for the row count.
    fn jet_batch_new_validates_shapes() {
        // Arrange
        let particles_bad = Array3::zeros((2, 4, 2));
        let masks = Array3::ones((2, 1, 4));
        let labels = Array2::zeros((2, 5));
        let aug = Array2::zeros((2, AUG_FEATURES));

        // Act
        let feature_result =
            JetBatch::new(particles_bad, masks.clone(), labels.clone(), aug.clone());
        let row_result = JetBatch::new(
            Array3::zeros((2, 4, CONSTITUENT_FEATURES)),
            masks,
            labels,
            Array2::zeros((3, AUG_FEATURES)),
        );

        // Assert
        match feature_result {
            Err(DatasetError::ShapeMismatch { expected, found, .. }) => {
                assert_eq!(expected, CONSTITUENT_FEATURES);
                assert_eq!(found, 2);
            }
            other => panic!("expected ShapeMismatch error, got {other:?}"),
        }
        match row_result {
            Err(DatasetError::LabelCountMismatch { rows, labels }) => {
                assert_eq!(rows, 2);
                assert_eq!(labels, 3);
            }
            other => panic!("expected LabelCountMismatch error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that concatenation stacks jets and preserves both operands'
    // rows in order.
    //
    // Given
    // -----
    // - Batches of 2 and 3 jets with matching layouts.
    //
    // Expect
    // ------
    // - A 5-jet batch whose leading-constituent pt values are the two
    //   operands' values back to back.
    fn jet_batch_concat_stacks_jets() {
        // Arrange
        let first = sample_batch(2, 5);
        let second = sample_batch(3, 5);

        // Act
        let combined = first.concat(&second).expect("layouts agree");

        // Assert
        assert_eq!(combined.len(), 5);
        let leading_pt: Vec<f64> =
            (0..5).map(|i| combined.particles()[(i, 0, 0)]).collect();
        assert_eq!(leading_pt, vec![1.0, 2.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that concatenation rejects batches with different class
    // counts.
    //
    // Given
    // -----
    // - A 5-class batch and a 2-class batch.
    //
    // Expect
    // ------
    // - `concat` returns `Err(ClassCountMismatch)`.
    fn jet_batch_concat_rejects_class_mismatch() {
        // Arrange
        let first = sample_batch(2, 5);
        let second = sample_batch(2, 2);

        // Act
        let result = first.concat(&second);

        // Assert
        match result {
            Err(DatasetError::ClassCountMismatch { expected, found }) => {
                assert_eq!(expected, 5);
                assert_eq!(found, 2);
            }
            other => panic!("expected ClassCountMismatch error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that row selection gathers rows in the requested order and
    // bounds-checks indices.
    //
    // Given
    // -----
    // - A 3-jet batch, selecting [2, 0], then selecting index 3.
    //
    // Expect
    // ------
    // - The selection holds jets 2 and 0 in that order; the out-of-range
    //   index yields `RowIndexOutOfBounds`.
    fn jet_batch_select_rows_gathers_and_bounds_checks() {
        // Arrange
        let batch = sample_batch(3, 2);

        // Act
        let picked = batch.select_rows(&[2, 0]).expect("indices in range");
        let out_of_range = batch.select_rows(&[3]);

        // Assert
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.particles()[(0, 0, 0)], 3.0);
        assert_eq!(picked.particles()[(1, 0, 0)], 1.0);
        match out_of_range {
            Err(DatasetError::RowIndexOutOfBounds { index, rows }) => {
                assert_eq!(index, 3);
                assert_eq!(rows, 3);
            }
            other => panic!("expected RowIndexOutOfBounds error, got {other:?}"),
        }
    }
}
