//! datasets::split — seeded, shuffled train/val/test partitioning.
//!
//! Purpose
//! -------
//! Partition a dataset's row indices into disjoint train, validation, and
//! test subsets by shuffling with a seeded generator, so every array of a
//! batch can be gathered with the same index sets and the partition is
//! reproducible across runs.
//!
//! Key behaviors
//! -------------
//! - [`train_val_test_split`] — shuffle 0..rows and cut it into three
//!   disjoint index sets; the test fraction is taken from the whole, the
//!   validation fraction from what remains.
//! - [`split_jet_batch`] — apply one partition to a [`JetBatch`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The three index sets are disjoint and together cover 0..rows
//!   exactly once.
//! - Partition sizes round the fractional counts up, so small datasets
//!   still receive non-empty test and validation sets when possible.
//! - The same (rows, fractions, seed) tuple always yields the same
//!   partition.
//!
//! Conventions
//! -----------
//! - Defaults mirror the conventional 60/20/20 layout: 20% of the rows to
//!   test, then 25% of the remainder to validation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover disjoint coverage, determinism per seed, the
//!   ceiling-based partition sizes, and the fraction/row validation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::datasets::errors::{DatasetError, DatasetResult};
use crate::datasets::jet::JetBatch;

/// Default fraction of all rows assigned to the test set.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Default fraction of the post-test remainder assigned to validation.
pub const DEFAULT_VAL_FRACTION: f64 = 0.25;

/// SplitIndices — one disjoint train/val/test partition of row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub val: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle 0..rows with a seeded generator and cut it into train, val,
/// and test index sets.
///
/// Parameters
/// ----------
/// - `rows`: Number of rows to partition.
/// - `test_fraction`: Fraction of all rows assigned to test, in (0, 1).
/// - `val_fraction`: Fraction of the post-test remainder assigned to
///   validation, in (0, 1).
/// - `seed`: Seed for the shuffle; equal seeds yield equal partitions.
///
/// Returns
/// -------
/// - `DatasetResult<SplitIndices>`: The partition, with sizes
///   `ceil(rows·test_fraction)` for test and
///   `ceil(remainder·val_fraction)` for validation.
///
/// # Errors
/// - [`DatasetError::InvalidFraction`] if either fraction lies outside
///   the open interval (0, 1).
/// - [`DatasetError::EmptySplit`] if the resulting train set would be
///   empty (too few rows for the requested fractions).
///
/// Examples
/// --------
/// ```
/// use uq_calibration::datasets::split::{
///     DEFAULT_TEST_FRACTION, DEFAULT_VAL_FRACTION, train_val_test_split,
/// };
///
/// let split =
///     train_val_test_split(10, DEFAULT_TEST_FRACTION, DEFAULT_VAL_FRACTION, 7)?;
/// assert_eq!(split.test.len(), 2);
/// assert_eq!(split.val.len(), 2);
/// assert_eq!(split.train.len(), 6);
/// # Ok::<(), uq_calibration::datasets::DatasetError>(())
/// ```
pub fn train_val_test_split(
    rows: usize,
    test_fraction: f64,
    val_fraction: f64,
    seed: u64,
) -> DatasetResult<SplitIndices> {
    validate_fraction("test_fraction", test_fraction)?;
    validate_fraction("val_fraction", val_fraction)?;

    let n_test = (rows as f64 * test_fraction).ceil() as usize;
    let remainder = rows.saturating_sub(n_test);
    let n_val = (remainder as f64 * val_fraction).ceil() as usize;
    let n_train = remainder.saturating_sub(n_val);
    if n_train == 0 {
        return Err(DatasetError::EmptySplit { rows });
    }

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test = indices.split_off(rows - n_test);
    let val = indices.split_off(n_train);
    let train = indices;

    Ok(SplitIndices { train, val, test })
}

/// Partition a [`JetBatch`] into train, val, and test batches.
///
/// # Errors
/// - Any error of [`train_val_test_split`], plus
///   [`DatasetError::EmptySplit`] if a partition ends up empty.
pub fn split_jet_batch(
    batch: &JetBatch,
    test_fraction: f64,
    val_fraction: f64,
    seed: u64,
) -> DatasetResult<(JetBatch, JetBatch, JetBatch)> {
    let split = train_val_test_split(batch.len(), test_fraction, val_fraction, seed)?;

    let gather = |indices: &[usize]| {
        batch
            .select_rows(indices)
            .map_err(|_| DatasetError::EmptySplit { rows: batch.len() })
    };
    Ok((gather(&split.train)?, gather(&split.val)?, gather(&split.test)?))
}

fn validate_fraction(name: &'static str, value: f64) -> DatasetResult<()> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        return Err(DatasetError::InvalidFraction { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Disjoint, exhaustive coverage of 0..rows by the three index sets.
    // - Ceiling-based partition sizes at the default fractions.
    // - Determinism for equal seeds and divergence for different seeds.
    // - Fraction and row-count validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the three index sets are disjoint and together cover
    // every row exactly once.
    //
    // Given
    // -----
    // - 103 rows at the default fractions.
    //
    // Expect
    // ------
    // - The union of train, val, and test equals {0, ..., 102} and the
    //   set sizes sum to 103.
    fn split_covers_rows_disjointly() {
        // Arrange
        let rows = 103;

        // Act
        let split =
            train_val_test_split(rows, DEFAULT_TEST_FRACTION, DEFAULT_VAL_FRACTION, 42)
                .expect("valid split");

        // Assert
        let mut seen = BTreeSet::new();
        for index in split.train.iter().chain(&split.val).chain(&split.test) {
            assert!(seen.insert(*index), "index {index} appears twice");
        }
        assert_eq!(seen.len(), rows);
        assert_eq!(seen.iter().next_back(), Some(&(rows - 1)));
    }

    #[test]
    // Purpose
    // -------
    // Verify the ceiling-based partition sizes at the default fractions.
    //
    // Given
    // -----
    // - 10 rows: test = ceil(10·0.2) = 2, val = ceil(8·0.25) = 2,
    //   train = 6.
    //
    // Expect
    // ------
    // - Sizes (6, 2, 2).
    fn split_sizes_round_up() {
        // Arrange / Act
        let split = train_val_test_split(10, DEFAULT_TEST_FRACTION, DEFAULT_VAL_FRACTION, 0)
            .expect("valid split");

        // Assert
        assert_eq!(split.train.len(), 6);
        assert_eq!(split.val.len(), 2);
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Verify seed determinism: equal seeds reproduce the partition and a
    // different seed shuffles differently.
    //
    // Given
    // -----
    // - 50 rows split twice with seed 7 and once with seed 8.
    //
    // Expect
    // ------
    // - The two seed-7 partitions are identical; the seed-8 partition
    //   differs.
    fn split_is_deterministic_per_seed() {
        // Arrange / Act
        let first = train_val_test_split(50, 0.2, 0.25, 7).expect("valid split");
        let second = train_val_test_split(50, 0.2, 0.25, 7).expect("valid split");
        let other = train_val_test_split(50, 0.2, 0.25, 8).expect("valid split");

        // Assert
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    // Purpose
    // -------
    // Verify fraction validation and the empty-train guard.
    //
    // Given
    // -----
    // - A test fraction of 1.0 (boundary, invalid) and a 2-row dataset
    //   whose fractions leave no training rows.
    //
    // Expect
    // ------
    // - `InvalidFraction` and `EmptySplit` respectively.
    fn split_rejects_bad_fractions_and_tiny_datasets() {
        // Arrange / Act / Assert
        match train_val_test_split(10, 1.0, 0.25, 0) {
            Err(DatasetError::InvalidFraction { name, value }) => {
                assert_eq!(name, "test_fraction");
                assert_eq!(value, 1.0);
            }
            other => panic!("expected InvalidFraction error, got {other:?}"),
        }
        match train_val_test_split(2, 0.5, 0.5, 0) {
            Err(DatasetError::EmptySplit { rows }) => assert_eq!(rows, 2),
            other => panic!("expected EmptySplit error, got {other:?}"),
        }
    }
}
