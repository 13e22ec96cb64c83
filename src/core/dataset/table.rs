use ndarray::{Array2, ArrayView2};
use polars::prelude::{Column, DataFrame, DataType, NamedFrom};
use std::collections::HashSet;

use crate::core::error::{ResampleError, ResampleResult};

/// Feature columns of a training set, backed by a polars `DataFrame`.
///
/// Row order is kept through every operation so rows stay aligned with
/// their labels.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    frame: DataFrame,
}

impl FeatureTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Build an all-numeric table from row-major values
    pub fn from_numeric<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<f64>>,
    ) -> ResampleResult<Self> {
        let names: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ResampleError::DuplicateColumn(name.clone()));
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(ResampleError::RaggedRow {
                    row: idx,
                    expected: names.len(),
                    found: row.len(),
                });
            }
        }

        let columns = names
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let values: Vec<f64> = rows.iter().map(|row| row[j]).collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();

        Ok(Self::new(DataFrame::new(columns)?))
    }

    /// Build a numeric table from a matrix whose width matches `columns`
    pub(crate) fn from_matrix(
        columns: &[String],
        matrix: ArrayView2<'_, f64>,
    ) -> ResampleResult<Self> {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(j, name)| Column::new(name.as_str().into(), matrix.column(j).to_vec()))
            .collect();

        Ok(Self::new(DataFrame::new(columns)?))
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .into_iter()
            .any(|column| column.as_str() == name)
    }

    /// Dense `rows x columns` matrix for distance computations.
    ///
    /// Fails on the first non-numeric column or missing value; values are
    /// never coerced.
    pub fn to_matrix(&self) -> ResampleResult<Array2<f64>> {
        let mut matrix = Array2::zeros((self.frame.height(), self.frame.width()));

        for (j, column) in self.frame.get_columns().iter().enumerate() {
            if !is_numeric(column.dtype()) {
                return Err(ResampleError::UnsupportedFeatureType {
                    column: column.name().to_string(),
                });
            }

            let values = column.cast(&DataType::Float64)?;
            for (i, value) in values.f64()?.into_iter().enumerate() {
                matrix[[i, j]] = value.ok_or_else(|| ResampleError::MissingValue {
                    column: column.name().to_string(),
                })?;
            }
        }

        Ok(matrix)
    }
}

impl PartialEq for FeatureTable {
    fn eq(&self, other: &Self) -> bool {
        self.columns() == other.columns() && self.frame.equals_missing(&other.frame)
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_from_numeric_rejects_ragged_rows() {
        let result = FeatureTable::from_numeric(["a", "b"], vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(
            result,
            Err(ResampleError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_from_numeric_rejects_duplicate_columns() {
        let result = FeatureTable::from_numeric(["a", "a"], vec![vec![1.0, 2.0]]);
        assert_eq!(result, Err(ResampleError::DuplicateColumn("a".to_string())));
    }

    #[test]
    fn test_from_numeric_is_column_major() {
        let table =
            FeatureTable::from_numeric(["a", "b"], vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(table.columns(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(table.len(), 2);

        let matrix = table.to_matrix().unwrap();
        assert_eq!(matrix.dim(), (2, 2));
        assert_eq!(matrix[[1, 0]], 3.0);
        assert_eq!(matrix[[0, 1]], 2.0);
    }

    #[test]
    fn test_to_matrix_rejects_categorical_column() {
        let frame = df!("age" => &[31.0, 45.0], "city" => &["Oslo", "Bergen"]).unwrap();

        assert_eq!(
            FeatureTable::new(frame).to_matrix(),
            Err(ResampleError::UnsupportedFeatureType {
                column: "city".to_string()
            })
        );
    }

    #[test]
    fn test_to_matrix_casts_integer_columns() {
        let frame = df!("count" => &[1_i64, 2, 3]).unwrap();
        let matrix = FeatureTable::new(frame).to_matrix().unwrap();
        assert_eq!(matrix.column(0).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_to_matrix_rejects_missing_values() {
        let frame = df!("score" => &[Some(1.0), None]).unwrap();
        assert_eq!(
            FeatureTable::new(frame).to_matrix(),
            Err(ResampleError::MissingValue {
                column: "score".to_string()
            })
        );
    }

    #[test]
    fn test_from_matrix_roundtrip() {
        let matrix = ndarray::array![[1.0, 2.0], [3.0, 4.0]];
        let columns = vec!["a".to_string(), "b".to_string()];
        let table = FeatureTable::from_matrix(&columns, matrix.view()).unwrap();
        assert_eq!(table.to_matrix().unwrap(), matrix);
    }
}
