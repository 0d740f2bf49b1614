//! datasets::errors — shared error types for dataset preprocessing.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the tabular schema
//! utilities, the jet preprocessing pipelines, and the train/val/test
//! splitter. Keeps shape and schema failures localized and convertible to
//! Python exceptions at the binding layer.
//!
//! Key behaviors
//! -------------
//! - Define [`DatasetResult`] and [`DatasetError`] as the canonical result
//!   and error types for the `datasets` subtree.
//! - Attach human-readable `Display` messages that name the offending
//!   column, dimension, or fraction.
//!
//! Conventions
//! -----------
//! - Variants are phrased in terms of domain constraints ("columns must
//!   have uniform length", "constituents must carry 4 features") rather
//!   than array internals.
//! - Calibration and simulation error types live in their own `errors`
//!   modules under the relevant subtrees.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type DatasetResult<T> = Result<T, DatasetError>;

/// DatasetError — error conditions for dataset preprocessing.
///
/// Variants
/// --------
/// - `EmptyTable`
///   A table was constructed with no columns.
/// - `ColumnLengthMismatch { column, expected, found }`
///   A column's length differs from the table's row count.
/// - `DuplicateColumn(name)`
///   Two columns share a name.
/// - `UnknownColumn(name)`
///   A named column does not exist in the table.
/// - `NonNumericColumn(name)`
///   A target column is not a clean numeric column (wrong kind, or
///   contains non-finite entries).
/// - `ShapeMismatch { what, expected, found }`
///   An input array's feature dimension does not match the documented
///   layout (e.g., constituents must carry 4 features).
/// - `LabelCountMismatch { rows, labels }`
///   A label array does not pair 1:1 with the data rows.
/// - `ClassCountMismatch { expected, found }`
///   Batches being combined disagree on the number of label classes.
/// - `InvalidFraction { name, value }`
///   A split fraction lies outside the open interval (0, 1).
/// - `EmptyBatch`
///   An operation that needs at least one row received none.
/// - `EmptySplit { rows }`
///   The requested fractions leave at least one split partition empty.
/// - `RowIndexOutOfBounds { index, rows }`
///   A row selection referenced a row past the end of the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    //------ Tabular schema errors ------
    EmptyTable,
    ColumnLengthMismatch { column: String, expected: usize, found: usize },
    DuplicateColumn(String),
    UnknownColumn(String),
    NonNumericColumn(String),
    //------ Jet batch errors ------
    ShapeMismatch { what: &'static str, expected: usize, found: usize },
    LabelCountMismatch { rows: usize, labels: usize },
    ClassCountMismatch { expected: usize, found: usize },
    EmptyBatch,
    RowIndexOutOfBounds { index: usize, rows: usize },
    //------ Split errors ------
    InvalidFraction { name: &'static str, value: f64 },
    EmptySplit { rows: usize },
}

impl std::error::Error for DatasetError {}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::EmptyTable => {
                write!(f, "A table must contain at least one column.")
            }
            DatasetError::ColumnLengthMismatch { column, expected, found } => {
                write!(
                    f,
                    "Column '{column}' has {found} value(s); the table holds {expected} row(s)."
                )
            }
            DatasetError::DuplicateColumn(name) => {
                write!(f, "Duplicate column name: '{name}'.")
            }
            DatasetError::UnknownColumn(name) => {
                write!(f, "No column named '{name}' in the table.")
            }
            DatasetError::NonNumericColumn(name) => {
                write!(
                    f,
                    "Column '{name}' is not a clean numeric column (wrong kind or non-finite \
                     values)."
                )
            }
            DatasetError::ShapeMismatch { what, expected, found } => {
                write!(f, "Expected {what} to carry {expected} feature(s), found {found}.")
            }
            DatasetError::LabelCountMismatch { rows, labels } => {
                write!(f, "Label array has {labels} entries for {rows} data row(s).")
            }
            DatasetError::ClassCountMismatch { expected, found } => {
                write!(f, "Batches disagree on class count: expected {expected}, found {found}.")
            }
            DatasetError::EmptyBatch => {
                write!(f, "Operation requires at least one data row.")
            }
            DatasetError::RowIndexOutOfBounds { index, rows } => {
                write!(f, "Row index {index} is out of bounds for a batch of {rows} row(s).")
            }
            DatasetError::InvalidFraction { name, value } => {
                write!(f, "Invalid {name}: {value}. Must lie in the open interval (0, 1).")
            }
            DatasetError::EmptySplit { rows } => {
                write!(
                    f,
                    "Splitting {rows} row(s) with the requested fractions leaves a partition \
                     empty."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DatasetError> for PyErr {
    fn from(err: DatasetError) -> PyErr {
        PyValueError::new_err(format!("DatasetError: {err}"))
    }
}
