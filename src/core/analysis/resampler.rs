//! Class rebalancing for binary training sets.
//!
//! This module splits a labeled training set into its majority and minority
//! classes and builds rebalanced feature/label pairs by random upsampling,
//! synthetic upsampling, random downsampling or Tomek-link removal. Every
//! operation returns fresh tables plus a [`ResampleReport`] describing the
//! class counts before and after.

use ndarray::{concatenate, Axis};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::ResamplerConfig;
use crate::core::dataset::{ClassLabel, ClassSubset, FeatureTable, LabelVector, LabeledTable};
use crate::core::error::{ResampleError, ResampleResult};

use super::class_counts::ClassCounts;
use super::neighbors::{KnnSampler, NeighborSampler};
use super::sampling::{floor_count, target_count};

/// The resampling operations offered by [`Resampler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResampleOperation {
    /// Draw minority rows at random until the target ratio is met
    UpsampleRandom,
    /// Interpolate new minority rows between nearest neighbors (SMOTE)
    UpsampleSynthetic,
    /// Draw as many majority rows as there are minority rows
    DownsampleRandom,
    /// Remove the majority member of every Tomek link
    DownsampleLinkRemoval,
}

impl ResampleOperation {
    pub fn as_str(&self) -> &str {
        match self {
            ResampleOperation::UpsampleRandom => "Random Upsampling",
            ResampleOperation::UpsampleSynthetic => "Synthetic Upsampling",
            ResampleOperation::DownsampleRandom => "Random Downsampling",
            ResampleOperation::DownsampleLinkRemoval => "Tomek Link Removal",
        }
    }
}

/// What a resampling call did to the class counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResampleReport {
    pub operation: ResampleOperation,
    /// Counts before resampling
    pub input_counts: ClassCounts,
    /// Counts of the returned label vector
    pub output_counts: ClassCounts,
    /// Rows in the returned feature table
    pub feature_rows: usize,
    /// Values in the returned label vector
    pub label_rows: usize,
}

impl ResampleReport {
    pub fn rows_added(&self) -> usize {
        self.output_counts.total.saturating_sub(self.input_counts.total)
    }

    pub fn rows_removed(&self) -> usize {
        self.input_counts.total.saturating_sub(self.output_counts.total)
    }
}

/// A rebalanced training set
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    pub features: FeatureTable,
    pub labels: LabelVector,
    pub report: ResampleReport,
}

impl Resampled {
    pub fn into_parts(self) -> (FeatureTable, LabelVector) {
        (self.features, self.labels)
    }
}

/// Majority and minority rows of a joined training set
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSplit {
    pub majority: ClassSubset,
    pub minority: ClassSubset,
}

impl ClassSplit {
    pub fn counts(&self) -> ClassCounts {
        ClassCounts::from_sizes(self.majority.len(), self.minority.len())
    }
}

/// Entry point for all resampling operations.
///
/// Holds only immutable settings and the neighbor sampler; each call works
/// on its own inputs and leaves them untouched.
#[derive(Debug, Clone)]
pub struct Resampler<S = KnnSampler> {
    config: ResamplerConfig,
    sampler: S,
}

impl Resampler<KnnSampler> {
    pub fn new(config: ResamplerConfig) -> Self {
        let sampler = KnnSampler::new(config.k_neighbors);
        Self { config, sampler }
    }
}

impl Default for Resampler<KnnSampler> {
    fn default() -> Self {
        Self::new(ResamplerConfig::default())
    }
}

impl<S: NeighborSampler> Resampler<S> {
    /// Use a custom neighbor sampler for the synthetic and link operations
    pub fn with_sampler(config: ResamplerConfig, sampler: S) -> Self {
        Self { config, sampler }
    }

    pub fn config(&self) -> &ResamplerConfig {
        &self.config
    }

    fn resolve_ratio(&self, ratio: Option<f64>) -> ResampleResult<f64> {
        let ratio = ratio.unwrap_or(self.config.default_ratio);
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ResampleError::InvalidRatio(ratio));
        }
        Ok(ratio)
    }

    /// Partition a training set into majority (label 0) and minority (label 1) rows.
    ///
    /// Both subsets keep the original row order.
    #[instrument(skip_all, fields(label_column = target))]
    pub fn split_by_class(
        &self,
        features: &FeatureTable,
        labels: &LabelVector,
        target: &str,
    ) -> ResampleResult<ClassSplit> {
        let joined = LabeledTable::join(features, labels, target)?;
        labels.classes()?;

        let split = ClassSplit {
            majority: ClassSubset::new(
                ClassLabel::Majority,
                joined.filter_class(ClassLabel::Majority)?,
            ),
            minority: ClassSubset::new(
                ClassLabel::Minority,
                joined.filter_class(ClassLabel::Minority)?,
            ),
        };

        info!("majority_class: {}", split.majority.len());
        info!("minority_class: {}", split.minority.len());

        Ok(split)
    }

    /// Grow the minority subset to `round(|majority| * ratio)` randomly drawn rows.
    ///
    /// `replace` and `ratio` fall back to the configured defaults. Output rows
    /// are the full majority subset followed by the drawn minority rows.
    #[instrument(skip_all, fields(label_column = target))]
    pub fn upsample_random(
        &self,
        target: &str,
        minority: &ClassSubset,
        majority: &ClassSubset,
        replace: Option<bool>,
        ratio: Option<f64>,
    ) -> ResampleResult<Resampled> {
        check_subsets(target, minority, majority)?;
        let replace = replace.unwrap_or(self.config.replace);
        let ratio = self.resolve_ratio(ratio)?;

        let n_samples = target_count(majority.len(), ratio)?;
        let drawn = minority
            .table()
            .sample(n_samples, replace, self.config.seed)?;
        let upsampled = majority.table().concat(&drawn)?;

        self.finish(
            ResampleOperation::UpsampleRandom,
            ClassCounts::from_sizes(majority.len(), minority.len()),
            upsampled,
        )
    }

    /// Grow the minority class to `floor(ratio * majority_count)` rows with SMOTE.
    ///
    /// Original rows come first in their original order, followed by the
    /// synthetic minority rows. All output feature columns are `Float64`.
    #[instrument(skip_all)]
    pub fn upsample_synthetic(
        &self,
        features: &FeatureTable,
        labels: &LabelVector,
        ratio: Option<f64>,
    ) -> ResampleResult<Resampled> {
        LabeledTable::join(features, labels, labels.name())?;
        let classes = labels.classes()?;
        let ratio = self.resolve_ratio(ratio)?;
        let matrix = features.to_matrix()?;

        let minority_rows: Vec<usize> = (0..classes.len())
            .filter(|&idx| classes[idx] == ClassLabel::Minority)
            .collect();
        let input_counts =
            ClassCounts::from_sizes(classes.len() - minority_rows.len(), minority_rows.len());

        let wanted = floor_count(input_counts.majority, ratio)?;
        if wanted < input_counts.minority {
            return Err(ResampleError::InvalidRatio(ratio));
        }
        let n_synthetic = wanted - input_counts.minority;

        let minority_matrix = matrix.select(Axis(0), &minority_rows);
        let synthetic =
            self.sampler
                .synthesize(minority_matrix.view(), n_synthetic, self.config.seed)?;

        let stacked = concatenate(Axis(0), &[matrix.view(), synthetic.view()])
            .map_err(|err| ResampleError::Table(err.to_string()))?;
        let out_features = FeatureTable::from_matrix(&features.columns(), stacked.view())?;
        let mut out_labels = labels.clone();
        out_labels.extend_with(ClassLabel::Minority, n_synthetic);

        let upsampled = LabeledTable::join(&out_features, &out_labels, labels.name())?;
        self.finish(ResampleOperation::UpsampleSynthetic, input_counts, upsampled)
    }

    /// Shrink the majority subset to `|minority|` randomly drawn rows.
    ///
    /// Output rows are the drawn majority rows followed by the full minority
    /// subset.
    #[instrument(skip_all, fields(label_column = target))]
    pub fn downsample_random(
        &self,
        target: &str,
        minority: &ClassSubset,
        majority: &ClassSubset,
        replace: Option<bool>,
    ) -> ResampleResult<Resampled> {
        check_subsets(target, minority, majority)?;
        let replace = replace.unwrap_or(self.config.replace);

        let downsampled = majority
            .table()
            .sample(minority.len(), replace, self.config.seed)?
            .concat(minority.table())?;

        self.finish(
            ResampleOperation::DownsampleRandom,
            ClassCounts::from_sizes(majority.len(), minority.len()),
            downsampled,
        )
    }

    /// Drop the majority member of every Tomek link.
    ///
    /// How many rows go is decided by the data alone; surviving rows keep
    /// their original order.
    #[instrument(skip_all)]
    pub fn downsample_link_removal(
        &self,
        features: &FeatureTable,
        labels: &LabelVector,
    ) -> ResampleResult<Resampled> {
        let joined = LabeledTable::join(features, labels, labels.name())?;
        let classes = labels.classes()?;
        let matrix = features.to_matrix()?;

        let removed = self.sampler.links_to_remove(matrix.view(), &classes);
        let mut keep = vec![true; classes.len()];
        for &index in &removed {
            let slot = keep.get_mut(index).ok_or(ResampleError::InvalidRowIndex {
                index,
                rows: classes.len(),
            })?;
            *slot = false;
        }

        info!("Removing {} majority rows in Tomek links", removed.len());

        self.finish(
            ResampleOperation::DownsampleLinkRemoval,
            ClassCounts::from_labels(labels),
            joined.filter_rows(&keep)?,
        )
    }

    fn finish(
        &self,
        operation: ResampleOperation,
        input_counts: ClassCounts,
        table: LabeledTable,
    ) -> ResampleResult<Resampled> {
        let (features, labels) = table.into_parts()?;
        let report = ResampleReport {
            operation,
            input_counts,
            output_counts: ClassCounts::from_labels(&labels),
            feature_rows: features.len(),
            label_rows: labels.len(),
        };

        info!(
            "{} complete: {} -> {} ({} feature rows, {} labels, minority {:.1}%, ratio {:.2})",
            operation.as_str(),
            report.input_counts,
            report.output_counts,
            report.feature_rows,
            report.label_rows,
            report.output_counts.get_percentage(ClassLabel::Minority),
            report.output_counts.imbalance_ratio()
        );

        Ok(Resampled {
            features,
            labels,
            report,
        })
    }
}

/// Both subsets must carry the requested label column, sit in the right
/// argument slot and share the same feature columns
fn check_subsets(target: &str, minority: &ClassSubset, majority: &ClassSubset) -> ResampleResult<()> {
    for (subset, expected) in [
        (minority, ClassLabel::Minority),
        (majority, ClassLabel::Majority),
    ] {
        if subset.label_column() != target {
            return Err(ResampleError::UnknownLabelColumn {
                expected: target.to_string(),
                found: subset.label_column().to_string(),
            });
        }
        if subset.class() != expected {
            return Err(ResampleError::WrongSubset {
                expected,
                found: subset.class(),
            });
        }
    }
    if minority.table().feature_columns() != majority.table().feature_columns() {
        return Err(ResampleError::ColumnMismatch);
    }
    Ok(())
}
