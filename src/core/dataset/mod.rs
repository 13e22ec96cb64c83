mod label;
mod labeled;
mod table;

pub use label::{ClassLabel, LabelVector};
pub use labeled::{ClassSubset, LabeledTable};
pub use table::FeatureTable;
