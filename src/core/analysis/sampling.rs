//! Target row counts for the up/downsampling operations.
//!
//! Counts are bounded by the largest row count a table can hold, so an
//! oversized ratio is rejected before anything is allocated.

use polars::prelude::IdxSize;

use crate::core::error::{ResampleError, ResampleResult};

/// `round(base * ratio)` with ties to even, for a finite positive ratio
pub fn target_count(base: usize, ratio: f64) -> ResampleResult<usize> {
    check_ratio(ratio)?;
    bounded((base as f64 * ratio).round_ties_even(), ratio)
}

/// `floor(base * ratio)`, for a finite positive ratio
pub fn floor_count(base: usize, ratio: f64) -> ResampleResult<usize> {
    check_ratio(ratio)?;
    bounded((base as f64 * ratio).floor(), ratio)
}

fn check_ratio(ratio: f64) -> ResampleResult<()> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ResampleError::InvalidRatio(ratio));
    }
    Ok(())
}

fn bounded(count: f64, ratio: f64) -> ResampleResult<usize> {
    if count > IdxSize::MAX as f64 {
        return Err(ResampleError::InvalidRatio(ratio));
    }
    Ok(count as usize)
}
