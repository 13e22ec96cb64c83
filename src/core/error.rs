use polars::prelude::PolarsError;

use crate::core::dataset::ClassLabel;

/// Result alias used by every resampling operation
pub type ResampleResult<T> = Result<T, ResampleError>;

/// Errors raised by table construction and resampling.
///
/// None of these are recovered internally: a failed call never returns a
/// partial table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    #[error("feature table has {features} rows but label vector has {labels} values")]
    ShapeMismatch { features: usize, labels: usize },

    #[error("cannot draw {requested} samples, only {available} available")]
    InsufficientSamples { requested: usize, available: usize },

    #[error("column '{column}' is not numeric")]
    UnsupportedFeatureType { column: String },

    #[error("column '{column}' has missing values")]
    MissingValue { column: String },

    #[error("row {row} has label {value}, expected 0 or 1")]
    UnsupportedLabel { row: usize, value: i64 },

    #[error("label column '{expected}' not found (subsets are labelled '{found}')")]
    UnknownLabelColumn { expected: String, found: String },

    #[error("expected the {expected:?} subset, got the {found:?} subset")]
    WrongSubset { expected: ClassLabel, found: ClassLabel },

    #[error("subsets have different feature columns")]
    ColumnMismatch,

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("row index {index} out of range for {rows} rows")]
    InvalidRowIndex { index: usize, rows: usize },

    #[error("invalid sampling ratio {0}")]
    InvalidRatio(f64),

    #[error("table error: {0}")]
    Table(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<PolarsError> for ResampleError {
    fn from(err: PolarsError) -> Self {
        ResampleError::Table(err.to_string())
    }
}
