//! Dataset preparation for the uncertainty-quantification studies.
//!
//! Purpose
//! -------
//! Provide the preprocessing layer that turns raw study data into
//! model-ready arrays: a typed tabular schema with numeric cleaning, the
//! JetNet and top-tagging jet pipelines with their shared batch
//! container, the four-momentum coordinate conversions they build on, and
//! a seeded train/val/test splitter.
//!
//! Key behaviors
//! -------------
//! - [`schema::Table`] — typed columns, numeric cleaning, and target
//!   extraction for tabular regression data.
//! - [`kinematics`] — (px, py, pz) ↔ (pt, eta, phi) conversions with
//!   zero-vector guards.
//! - [`jet::JetBatch`] — the validated particles/masks/labels/aug
//!   container shared by both jet pipelines.
//! - [`jetnet::preprocess_jetnet`] and [`topdata::preprocess_topdata`] —
//!   the two dataset-specific pipelines.
//! - [`split::train_val_test_split`] — reproducible shuffled
//!   partitioning.
//!
//! Invariants & assumptions
//! ------------------------
//! - File I/O is out of scope: callers load raw arrays however they like
//!   and hand them to the pipelines as `ndarray` values.
//! - Every public entry point validates its inputs and returns
//!   [`DatasetResult`] instead of panicking.
//!
//! Downstream usage
//! ----------------
//! - Preprocessed batches feed the models whose predictions the
//!   [`crate::calibration`] engine evaluates.

pub mod errors;
pub mod jet;
pub mod jetnet;
pub mod kinematics;
pub mod schema;
pub mod split;
pub mod topdata;

pub use errors::{DatasetError, DatasetResult};
pub use jet::{AUG_FEATURES, CONSTITUENT_FEATURES, JetBatch};
pub use jetnet::{JetNetClass, preprocess_jetnet};
pub use schema::{Column, ColumnKind, ColumnValues, Table};
pub use split::{
    DEFAULT_TEST_FRACTION, DEFAULT_VAL_FRACTION, SplitIndices, split_jet_batch,
    train_val_test_split,
};
pub use topdata::preprocess_topdata;
