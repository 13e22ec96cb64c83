pub mod analysis;
pub mod dataset;
pub mod error;

pub use analysis::*;
pub use dataset::*;
pub use error::*;
