#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct VectorizerParams {
    /// Minimum corpus frequency for a word to contribute to the feature
    /// vector. Words below the floor are treated like unknown words and
    /// skipped. 0 keeps everything.
    min_word_frequency: u64,
}

impl VectorizerParams {
    #[must_use]
    pub fn new(min_word_frequency: u64) -> Self {
        Self { min_word_frequency }
    }

    #[must_use]
    pub fn min_word_frequency(&self) -> u64 {
        self.min_word_frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_everything() {
        assert_eq!(VectorizerParams::default().min_word_frequency(), 0);
    }
}
