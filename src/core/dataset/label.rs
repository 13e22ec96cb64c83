use serde::{Deserialize, Serialize};

use crate::core::error::{ResampleError, ResampleResult};

/// The two classes of a binary training set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassLabel {
    /// Negative class, label value 0
    Majority,
    /// Positive class, label value 1
    Minority,
}

impl ClassLabel {
    pub fn as_str(&self) -> &str {
        match self {
            ClassLabel::Majority => "majority",
            ClassLabel::Minority => "minority",
        }
    }

    /// Raw label value stored in a label vector
    pub fn value(self) -> i64 {
        match self {
            ClassLabel::Majority => 0,
            ClassLabel::Minority => 1,
        }
    }

    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(ClassLabel::Majority),
            1 => Some(ClassLabel::Minority),
            _ => None,
        }
    }
}

/// Named label column, one value per feature row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVector {
    name: String,
    values: Vec<i64>,
}

impl LabelVector {
    pub fn new(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed classes for every row; any value other than 0 or 1 is an error
    pub fn classes(&self) -> ResampleResult<Vec<ClassLabel>> {
        self.values
            .iter()
            .enumerate()
            .map(|(row, &value)| {
                ClassLabel::from_value(value).ok_or(ResampleError::UnsupportedLabel { row, value })
            })
            .collect()
    }

    pub(crate) fn extend_with(&mut self, class: ClassLabel, count: usize) {
        self.values.extend(std::iter::repeat(class.value()).take(count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_maps_binary_values() {
        let labels = LabelVector::new("target", vec![0, 1, 0]);
        assert_eq!(
            labels.classes().unwrap(),
            vec![ClassLabel::Majority, ClassLabel::Minority, ClassLabel::Majority]
        );
    }

    #[test]
    fn test_classes_rejects_other_values() {
        let labels = LabelVector::new("target", vec![0, 2, 1]);
        assert_eq!(
            labels.classes(),
            Err(ResampleError::UnsupportedLabel { row: 1, value: 2 })
        );
    }

    #[test]
    fn test_class_label_display() {
        assert_eq!(ClassLabel::Majority.as_str(), "majority");
        assert_eq!(ClassLabel::Minority.value(), 1);
    }
}
