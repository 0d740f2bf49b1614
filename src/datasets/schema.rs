//! datasets::schema — typed tabular columns and numeric cleaning.
//!
//! Purpose
//! -------
//! Provide a small, explicitly typed table model for the tabular side of
//! the study: named columns carrying float, text, or boolean values.
//! Model-ready matrices only tolerate uniformly numeric, fully finite
//! columns, so the cleaning step drops text and boolean columns and any
//! float column containing non-finite entries — an explicit typed-schema
//! validator rather than runtime value inspection.
//!
//! Key behaviors
//! -------------
//! - [`Table::new`] validates uniform column lengths and unique names.
//! - [`Table::retain_numeric`] returns a table holding only the clean
//!   float columns (the typed rendition of "drop non-numeric columns and
//!   drop columns with missing values").
//! - [`Table::split_target`] extracts a named target column and packs the
//!   remaining clean numeric columns into a feature matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed `Table` has at least one column, uniform column
//!   lengths, and unique column names.
//! - `retain_numeric` never invents data: it only drops columns, and the
//!   surviving columns are bitwise-unchanged.
//!
//! Conventions
//! -----------
//! - Missing values are represented as NaN inside float columns; a column
//!   with any non-finite entry is treated as unusable and dropped, which
//!   mirrors column-wise NA dropping.
//! - Feature matrices are `Array2<f64>` with rows = table rows and
//!   columns in the table's column order.
//!
//! Downstream usage
//! ----------------
//! - Callers assemble a `Table` from whatever source they parsed (I/O is
//!   out of scope here), clean it, and hand the matrices to a regression
//!   model.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction errors, the cleaning rules for each
//!   column kind, NaN dropping, and target extraction including its error
//!   branches.

use ndarray::{Array1, Array2};

use crate::datasets::errors::{DatasetError, DatasetResult};

/// Kind tag of a column, as declared by its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    Text,
    Bool,
}

/// Values of a single column, one variant per supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Float(Vec<f64>),
    Text(Vec<String>),
    Bool(Vec<bool>),
}

impl ColumnValues {
    /// Number of rows stored in the column.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Bool(v) => v.len(),
        }
    }

    /// Whether the column holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind tag of the column.
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValues::Float(_) => ColumnKind::Float,
            ColumnValues::Text(_) => ColumnKind::Text,
            ColumnValues::Bool(_) => ColumnKind::Bool,
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    /// Convenience constructor for a float column.
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column { name: name.into(), values: ColumnValues::Float(values) }
    }

    /// Convenience constructor for a text column.
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Column { name: name.into(), values: ColumnValues::Text(values) }
    }

    /// Convenience constructor for a boolean column.
    pub fn bool(name: impl Into<String>, values: Vec<bool>) -> Self {
        Column { name: name.into(), values: ColumnValues::Bool(values) }
    }

    /// Whether the column is a float column with only finite entries.
    fn is_clean_numeric(&self) -> bool {
        match &self.values {
            ColumnValues::Float(values) => values.iter().all(|v| v.is_finite()),
            _ => false,
        }
    }
}

/// Table — a set of named, typed columns with uniform length.
///
/// Purpose
/// -------
/// Represent one tabular dataset with an explicit schema, so that the
/// cleaning and target-extraction steps can reason about column kinds
/// instead of inspecting values at runtime.
///
/// Invariants
/// ----------
/// - At least one column; all columns share the same length; names are
///   unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Construct a table, validating uniform lengths and unique names.
    ///
    /// # Errors
    /// - [`DatasetError::EmptyTable`] if `columns` is empty.
    /// - [`DatasetError::ColumnLengthMismatch`] if any column's length
    ///   differs from the first column's.
    /// - [`DatasetError::DuplicateColumn`] if two columns share a name.
    pub fn new(columns: Vec<Column>) -> DatasetResult<Self> {
        let first = columns.first().ok_or(DatasetError::EmptyTable)?;
        let rows = first.values.len();

        for column in &columns {
            if column.values.len() != rows {
                return Err(DatasetError::ColumnLengthMismatch {
                    column: column.name.clone(),
                    expected: rows,
                    found: column.values.len(),
                });
            }
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|other| other.name == column.name) {
                return Err(DatasetError::DuplicateColumn(column.name.clone()));
            }
        }

        Ok(Table { columns, rows })
    }

    /// Number of rows shared by all columns.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Return a table holding only the clean numeric columns.
    ///
    /// Drops every text and boolean column, and every float column that
    /// contains a non-finite entry (NaN-based missing values included).
    /// Surviving columns keep their order and values. A table where no
    /// column survives is reported as [`DatasetError::EmptyTable`].
    ///
    /// # Errors
    /// - [`DatasetError::EmptyTable`] if no column survives the cleaning.
    pub fn retain_numeric(&self) -> DatasetResult<Table> {
        let kept: Vec<Column> =
            self.columns.iter().filter(|c| c.is_clean_numeric()).cloned().collect();

        if kept.is_empty() {
            return Err(DatasetError::EmptyTable);
        }

        Ok(Table { columns: kept, rows: self.rows })
    }

    /// Split the table into a feature matrix and a target vector.
    ///
    /// The target column must be a clean numeric column. The features are
    /// the remaining clean numeric columns in table order; text, boolean,
    /// and non-finite float columns are dropped exactly as in
    /// [`Table::retain_numeric`].
    ///
    /// # Errors
    /// - [`DatasetError::UnknownColumn`] if no column is named `target`.
    /// - [`DatasetError::NonNumericColumn`] if the target column is not a
    ///   clean numeric column.
    /// - [`DatasetError::EmptyTable`] if no feature column survives the
    ///   cleaning.
    pub fn split_target(&self, target: &str) -> DatasetResult<(Array2<f64>, Array1<f64>)> {
        let target_column = self
            .columns
            .iter()
            .find(|c| c.name == target)
            .ok_or_else(|| DatasetError::UnknownColumn(target.to_string()))?;

        if !target_column.is_clean_numeric() {
            return Err(DatasetError::NonNumericColumn(target.to_string()));
        }

        let y = match &target_column.values {
            ColumnValues::Float(values) => Array1::from(values.clone()),
            _ => unreachable!("is_clean_numeric only accepts float columns"),
        };

        let feature_columns: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.name != target && c.is_clean_numeric())
            .collect();

        if feature_columns.is_empty() {
            return Err(DatasetError::EmptyTable);
        }

        let mut features = Array2::zeros((self.rows, feature_columns.len()));
        for (j, column) in feature_columns.iter().enumerate() {
            if let ColumnValues::Float(values) = &column.values {
                for (i, &value) in values.iter().enumerate() {
                    features[(i, j)] = value;
                }
            }
        }

        Ok((features, y))
    }
}
