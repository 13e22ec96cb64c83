mod class_counts;
mod neighbors;
mod resampler;
mod sampling;

pub use class_counts::ClassCounts;
pub use neighbors::{KnnSampler, NeighborSampler, DEFAULT_K_NEIGHBORS};
pub use resampler::{
    ClassSplit, ResampleOperation, ResampleReport, Resampled, Resampler,
};
pub use sampling::{floor_count, target_count};
