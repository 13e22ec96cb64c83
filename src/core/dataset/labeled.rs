use polars::prelude::{
    concat, BooleanChunked, ChunkCompareEq, Column, DataFrame, IdxSize, IntoLazy, NamedFrom,
    NewChunkedArray, Series, UnionArgs,
};

use super::label::{ClassLabel, LabelVector};
use super::table::FeatureTable;
use crate::core::error::{ResampleError, ResampleResult};

/// Feature table with the label vector appended as a named column.
///
/// The only way to build one is [`LabeledTable::join`], so feature rows and
/// labels always have the same length.
#[derive(Debug, Clone)]
pub struct LabeledTable {
    frame: DataFrame,
    label_column: String,
}

impl LabeledTable {
    /// Append `labels` to `features` as the column `label_column`
    pub fn join(
        features: &FeatureTable,
        labels: &LabelVector,
        label_column: &str,
    ) -> ResampleResult<Self> {
        if features.len() != labels.len() {
            return Err(ResampleError::ShapeMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if features.has_column(label_column) {
            return Err(ResampleError::DuplicateColumn(label_column.to_string()));
        }

        let mut frame = features.frame().clone();
        frame.with_column(Column::new(label_column.into(), labels.values().to_vec()))?;

        Ok(Self {
            frame,
            label_column: label_column.to_string(),
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Column names other than the label column, in table order
    pub fn feature_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != self.label_column)
            .map(|name| name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Label column as a vector; a null label is an error
    pub fn labels(&self) -> ResampleResult<LabelVector> {
        let values = self
            .frame
            .column(&self.label_column)?
            .i64()?
            .into_iter()
            .map(|value| {
                value.ok_or_else(|| ResampleError::MissingValue {
                    column: self.label_column.clone(),
                })
            })
            .collect::<ResampleResult<Vec<i64>>>()?;

        Ok(LabelVector::new(self.label_column.clone(), values))
    }

    /// Rows whose label equals `class`, in their original order
    pub(crate) fn filter_class(&self, class: ClassLabel) -> ResampleResult<Self> {
        let mask = self
            .frame
            .column(&self.label_column)?
            .i64()?
            .equal(class.value());

        Ok(self.with_frame(self.frame.filter(&mask)?))
    }

    /// Rows whose entry in `keep` is true, in their original order
    pub(crate) fn filter_rows(&self, keep: &[bool]) -> ResampleResult<Self> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        Ok(self.with_frame(self.frame.filter(&mask)?))
    }

    /// Draw `n` shuffled rows with a fixed seed.
    ///
    /// Without replacement `n` may not exceed the row count; with replacement
    /// the table must not be empty.
    pub(crate) fn sample(&self, n: usize, replace: bool, seed: u64) -> ResampleResult<Self> {
        let available = self.len();
        if (!replace && n > available) || (replace && available == 0 && n > 0) {
            return Err(ResampleError::InsufficientSamples {
                requested: n,
                available,
            });
        }
        if n == 0 {
            return Ok(self.with_frame(self.frame.slice(0, 0)));
        }

        let n = IdxSize::try_from(n)
            .map_err(|_| ResampleError::Table(format!("cannot draw {n} rows")))?;
        let n = Series::new("n".into(), &[n]);
        let frame = self.frame.sample_n(&n, replace, true, Some(seed))?;

        Ok(self.with_frame(frame))
    }

    /// Stack `other` below `self`; both must have identical columns
    pub fn concat(&self, other: &LabeledTable) -> ResampleResult<Self> {
        if self.label_column != other.label_column
            || self.frame.get_column_names() != other.frame.get_column_names()
        {
            return Err(ResampleError::ColumnMismatch);
        }

        let frame = concat(
            [self.frame.clone().lazy(), other.frame.clone().lazy()],
            UnionArgs::default(),
        )?
        .collect()?;

        Ok(self.with_frame(frame))
    }

    /// Drop the label column, giving back the feature table and label vector
    pub fn into_parts(self) -> ResampleResult<(FeatureTable, LabelVector)> {
        let labels = self.labels()?;
        let features = self.frame.drop(&self.label_column)?;
        Ok((FeatureTable::new(features), labels))
    }

    fn with_frame(&self, frame: DataFrame) -> Self {
        Self {
            frame,
            label_column: self.label_column.clone(),
        }
    }
}

impl PartialEq for LabeledTable {
    fn eq(&self, other: &Self) -> bool {
        self.label_column == other.label_column
            && self.frame.get_column_names() == other.frame.get_column_names()
            && self.frame.equals_missing(&other.frame)
    }
}

/// Rows of a labeled table that all belong to one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSubset {
    class: ClassLabel,
    table: LabeledTable,
}

impl ClassSubset {
    pub(crate) fn new(class: ClassLabel, table: LabeledTable) -> Self {
        Self { class, table }
    }

    pub fn class(&self) -> ClassLabel {
        self.class
    }

    pub fn table(&self) -> &LabeledTable {
        &self.table
    }

    pub fn label_column(&self) -> &str {
        self.table.label_column()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(n: usize) -> FeatureTable {
        FeatureTable::from_numeric(["x"], (0..n).map(|i| vec![i as f64]).collect()).unwrap()
    }

    fn first_column(table: &LabeledTable) -> Vec<f64> {
        let (features, _) = table.clone().into_parts().unwrap();
        features.to_matrix().unwrap().column(0).to_vec()
    }

    #[test]
    fn test_join_rejects_length_mismatch() {
        let labels = LabelVector::new("y", vec![0, 1]);
        assert_eq!(
            LabeledTable::join(&features(3), &labels, "y"),
            Err(ResampleError::ShapeMismatch {
                features: 3,
                labels: 2
            })
        );
    }

    #[test]
    fn test_join_rejects_label_named_like_feature() {
        let labels = LabelVector::new("y", vec![0]);
        assert_eq!(
            LabeledTable::join(&features(1), &labels, "x"),
            Err(ResampleError::DuplicateColumn("x".to_string()))
        );
    }

    #[test]
    fn test_join_uses_requested_label_column() {
        let labels = LabelVector::new("raw", vec![0, 1]);
        let table = LabeledTable::join(&features(2), &labels, "is_fraud").unwrap();
        assert_eq!(table.label_column(), "is_fraud");
        assert_eq!(table.feature_columns(), vec!["x".to_string()]);

        let (features, labels) = table.into_parts().unwrap();
        assert_eq!(features.columns(), vec!["x".to_string()]);
        assert_eq!(labels.name(), "is_fraud");
        assert_eq!(labels.values(), &[0, 1]);
    }

    #[test]
    fn test_filter_class_keeps_order() {
        let labels = LabelVector::new("y", vec![1, 0, 1, 0]);
        let table = LabeledTable::join(&features(4), &labels, "y").unwrap();

        let minority = table.filter_class(ClassLabel::Minority).unwrap();
        assert_eq!(first_column(&minority), vec![0.0, 2.0]);
        assert_eq!(minority.labels().unwrap().values(), &[1, 1]);
    }

    #[test]
    fn test_filter_rows_keeps_alignment() {
        let labels = LabelVector::new("y", vec![0, 1, 0]);
        let table = LabeledTable::join(&features(3), &labels, "y").unwrap();

        let kept = table.filter_rows(&[false, true, true]).unwrap();
        assert_eq!(kept.labels().unwrap().values(), &[1, 0]);
        assert_eq!(first_column(&kept), vec![1.0, 2.0]);
    }

    #[test]
    fn test_sample_without_replacement_is_a_permutation() {
        let labels = LabelVector::new("y", vec![0; 10]);
        let table = LabeledTable::join(&features(10), &labels, "y").unwrap();

        let mut drawn = first_column(&table.sample(10, false, 23).unwrap());
        drawn.sort_by(f64::total_cmp);
        assert_eq!(drawn, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_rejects_oversampling() {
        let labels = LabelVector::new("y", vec![0; 3]);
        let table = LabeledTable::join(&features(3), &labels, "y").unwrap();
        assert_eq!(
            table.sample(4, false, 23),
            Err(ResampleError::InsufficientSamples {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_sample_with_replacement_from_empty_table() {
        let table =
            LabeledTable::join(&features(0), &LabelVector::new("y", vec![]), "y").unwrap();
        assert_eq!(
            table.sample(2, true, 23),
            Err(ResampleError::InsufficientSamples {
                requested: 2,
                available: 0
            })
        );
        assert!(table.sample(0, true, 23).unwrap().is_empty());
    }

    #[test]
    fn test_sample_is_seeded() {
        let labels = LabelVector::new("y", vec![0; 50]);
        let table = LabeledTable::join(&features(50), &labels, "y").unwrap();
        assert_eq!(
            table.sample(20, true, 7).unwrap(),
            table.sample(20, true, 7).unwrap()
        );
    }

    #[test]
    fn test_concat_stacks_in_order() {
        let top = LabeledTable::join(&features(2), &LabelVector::new("y", vec![0, 0]), "y")
            .unwrap();
        let bottom =
            LabeledTable::join(&features(1), &LabelVector::new("y", vec![1]), "y").unwrap();

        let stacked = top.concat(&bottom).unwrap();
        assert_eq!(stacked.labels().unwrap().values(), &[0, 0, 1]);
        assert_eq!(first_column(&stacked), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_concat_rejects_different_columns() {
        let left = LabeledTable::join(&features(1), &LabelVector::new("y", vec![0]), "y").unwrap();
        let other = FeatureTable::from_numeric(["z"], vec![vec![1.0]]).unwrap();
        let right = LabeledTable::join(&other, &LabelVector::new("y", vec![1]), "y").unwrap();

        assert_eq!(left.concat(&right), Err(ResampleError::ColumnMismatch));
    }
}
