use serde::Serialize;
use std::fmt;

use crate::core::dataset::{ClassLabel, LabelVector};

/// Per-class row counts of a label vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassCounts {
    pub total: usize,
    pub majority: usize,
    pub minority: usize,
}

impl ClassCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts from subset sizes
    pub fn from_sizes(majority: usize, minority: usize) -> Self {
        Self {
            total: majority + minority,
            majority,
            minority,
        }
    }

    /// Count the label values of a vector.
    ///
    /// Values outside {0, 1} only contribute to `total`.
    pub fn from_labels(labels: &LabelVector) -> Self {
        let mut counts = Self::new();
        counts.total = labels.len();

        for &value in labels.values() {
            match ClassLabel::from_value(value) {
                Some(ClassLabel::Majority) => counts.majority += 1,
                Some(ClassLabel::Minority) => counts.minority += 1,
                None => {}
            }
        }

        counts
    }

    /// Get count for a specific class
    pub fn get_count(&self, class: ClassLabel) -> usize {
        match class {
            ClassLabel::Majority => self.majority,
            ClassLabel::Minority => self.minority,
        }
    }

    /// Get percentage for a specific class
    pub fn get_percentage(&self, class: ClassLabel) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.get_count(class) as f32 / self.total as f32) * 100.0
    }

    /// Minority rows per majority row, 0.0 when there is no majority class
    pub fn imbalance_ratio(&self) -> f32 {
        if self.majority == 0 {
            return 0.0;
        }
        self.minority as f32 / self.majority as f32
    }

    /// Classes ordered by descending count, ties by label value
    pub fn value_counts(&self) -> Vec<(ClassLabel, usize)> {
        let mut counts = vec![
            (ClassLabel::Majority, self.majority),
            (ClassLabel::Minority, self.minority),
        ];
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }
}

impl fmt::Display for ClassCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .value_counts()
            .into_iter()
            .map(|(class, count)| format!("{}: {}", class.value(), count))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels() {
        let labels = LabelVector::new("y", vec![0, 0, 1, 0]);
        let counts = ClassCounts::from_labels(&labels);
        assert_eq!(counts, ClassCounts::from_sizes(3, 1));
        assert_eq!(counts.get_percentage(ClassLabel::Minority), 25.0);
    }

    #[test]
    fn test_value_counts_orders_by_count() {
        let counts = ClassCounts::from_sizes(10, 100);
        assert_eq!(
            counts.value_counts(),
            vec![(ClassLabel::Minority, 100), (ClassLabel::Majority, 10)]
        );
        assert_eq!(counts.to_string(), "{1: 100, 0: 10}");
    }

    #[test]
    fn test_imbalance_ratio_empty() {
        assert_eq!(ClassCounts::new().imbalance_ratio(), 0.0);
        assert_eq!(ClassCounts::from_sizes(100, 10).imbalance_ratio(), 0.1);
    }
}
