//! Logging setup for applications that drive the resampler
//!
//! This module provides:
//! - Bracketed event formatting that shows the resampling span of each event
//! - Dual logging (file + stdout) with a timestamped log file
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the caller.

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::{setup_logging, DEFAULT_FILTER};
