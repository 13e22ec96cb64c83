//! class-resampler: class-imbalance helpers for binary training sets.
//!
//! Split a labeled training set into its majority and minority classes, then
//! rebalance it with random upsampling, SMOTE synthetic upsampling, random
//! downsampling or Tomek-link removal.
//!
//! ```ignore
//! use class_resampler::{Resampler, ResamplerConfig};
//!
//! let resampler = Resampler::new(ResamplerConfig::load());
//! let split = resampler.split_by_class(&x_train, &y_train, "is_fraud")?;
//! let balanced = resampler.downsample_random("is_fraud", &split.minority, &split.majority, None)?;
//! let (x_balanced, y_balanced) = balanced.into_parts();
//! ```

pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::ResamplerConfig;
pub use crate::core::*;
