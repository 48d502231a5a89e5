use ndarray::Array1;

use crate::error::{Result, VectorizeError};

/// Ordered set of distinct label strings.
///
/// The ordering fixes the one-hot layout: label `i` maps to position `i` in
/// every label vector produced against this set. The set is immutable once
/// built; a label that was not declared up front is an error at encoding
/// time, never a silently empty vector.
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Build a label set, preserving iteration order.
    ///
    /// Fails with [`VectorizeError::DuplicateLabel`] if the same label
    /// appears twice.
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<_>>();
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(VectorizeError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { labels })
    }

    /// Position of `label` within the set, or `None` if it was never declared.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Encode `label` as a one-hot vector of length `len()`.
    ///
    /// Exactly one position holds `1.0`; all others are `0.0`. Fails with
    /// [`VectorizeError::UnknownLabel`] if the label is not in the set.
    pub fn one_hot(&self, label: &str) -> Result<Array1<f64>> {
        let idx = self
            .index_of(label)
            .ok_or_else(|| VectorizeError::UnknownLabel(label.to_string()))?;
        let mut outcome = Array1::zeros(self.labels.len());
        outcome[idx] = 1.0;
        Ok(outcome)
    }
}
