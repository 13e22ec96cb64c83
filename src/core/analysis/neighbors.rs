//! Nearest-neighbor based resampling primitives.
//!
//! Synthetic oversampling (SMOTE) and Tomek-link pruning both need a
//! neighbor search over numeric feature rows. They sit behind
//! [`NeighborSampler`] so a different search structure or an external
//! library can be swapped in without touching the resampling operations.
//!
//! # Available Samplers
//!
//! - [`KnnSampler`]: exact brute-force search with Euclidean distance

use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::core::dataset::ClassLabel;
use crate::core::error::{ResampleError, ResampleResult};

/// Neighbor count used by SMOTE when none is configured
pub const DEFAULT_K_NEIGHBORS: usize = 5;

/// Capability for neighbor-based synthesis and pruning.
pub trait NeighborSampler {
    /// Generate `n_samples` new rows interpolated between minority rows.
    ///
    /// # Arguments
    /// - `minority`: numeric rows of the minority class only
    /// - `n_samples`: number of synthetic rows to produce
    /// - `seed`: random seed for reproducibility
    fn synthesize(
        &self,
        minority: ArrayView2<'_, f64>,
        n_samples: usize,
        seed: u64,
    ) -> ResampleResult<Array2<f64>>;

    /// Row indices to drop so that no Tomek link keeps its majority member.
    ///
    /// Returned indices are sorted ascending.
    fn links_to_remove(&self, features: ArrayView2<'_, f64>, classes: &[ClassLabel])
        -> Vec<usize>;
}

/// Exact k-nearest-neighbor sampler.
#[derive(Debug, Clone, Copy)]
pub struct KnnSampler {
    /// Neighbors considered per minority row when synthesizing
    pub k_neighbors: usize,
}

impl KnnSampler {
    pub fn new(k_neighbors: usize) -> Self {
        Self { k_neighbors }
    }
}

impl Default for KnnSampler {
    fn default() -> Self {
        Self::new(DEFAULT_K_NEIGHBORS)
    }
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// The `k` rows closest to row `idx`, excluding itself.
///
/// Equal distances are ordered by row index.
fn nearest_neighbors(data: ArrayView2<'_, f64>, idx: usize, k: usize) -> Vec<usize> {
    let row = data.row(idx);
    let mut candidates: Vec<(f64, usize)> = data
        .outer_iter()
        .enumerate()
        .filter(|(other, _)| *other != idx)
        .map(|(other, values)| (squared_distance(row, values), other))
        .collect();

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    candidates.truncate(k);
    candidates.into_iter().map(|(_, other)| other).collect()
}

impl NeighborSampler for KnnSampler {
    fn synthesize(
        &self,
        minority: ArrayView2<'_, f64>,
        n_samples: usize,
        seed: u64,
    ) -> ResampleResult<Array2<f64>> {
        let n_minority = minority.nrows();
        if n_minority < 2 {
            return Err(ResampleError::InsufficientSamples {
                requested: 2,
                available: n_minority,
            });
        }

        let k = self.k_neighbors.max(1).min(n_minority - 1);
        debug!(
            "Synthesizing {} rows from {} minority rows with k={}",
            n_samples, n_minority, k
        );

        let neighbors: Vec<Vec<usize>> = (0..n_minority)
            .map(|idx| nearest_neighbors(minority, idx, k))
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut synthetic = Array2::zeros((n_samples, minority.ncols()));

        for mut out in synthetic.outer_iter_mut() {
            let base = rng.gen_range(0..n_minority);
            let neighbor = neighbors[base][rng.gen_range(0..k)];
            let gap: f64 = rng.gen();

            let origin = minority.row(base);
            let target = minority.row(neighbor);
            for ((cell, &from), &to) in out.iter_mut().zip(origin.iter()).zip(target.iter()) {
                *cell = from + gap * (to - from);
            }
        }

        Ok(synthetic)
    }

    fn links_to_remove(
        &self,
        features: ArrayView2<'_, f64>,
        classes: &[ClassLabel],
    ) -> Vec<usize> {
        let n_rows = features.nrows();
        if n_rows < 2 {
            return Vec::new();
        }

        let nearest: Vec<usize> = (0..n_rows)
            .map(|idx| nearest_neighbors(features, idx, 1)[0])
            .collect();

        let removed: Vec<usize> = (0..n_rows)
            .filter(|&idx| {
                let other = nearest[idx];
                nearest[other] == idx
                    && classes[idx] != classes[other]
                    && classes[idx] == ClassLabel::Majority
            })
            .collect();

        debug!("Found {} Tomek links in {} rows", removed.len(), n_rows);
        removed
    }
}
