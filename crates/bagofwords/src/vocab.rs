use std::sync::Arc;

use ahash::HashMap;

use crate::error::{Result, VectorizeError};

/// Read-only view of corpus-wide term statistics.
///
/// A vocabulary is populated once, before any vectorization happens, and is
/// never mutated while vectors are being produced. Implementations are shared
/// freely across threads; the blanket impls below let callers hand the same
/// snapshot to many vectorizers by reference or `Arc`.
pub trait VocabCache {
    /// Dense index assigned to `word`, or `None` if the word is unknown.
    fn index_of(&self, word: &str) -> Option<usize>;

    /// Total number of times `word` occurred across the corpus.
    fn word_frequency(&self, word: &str) -> u64;

    /// Number of documents `word` appeared in at least once.
    fn doc_appeared_in(&self, word: &str) -> u64;

    /// Number of documents in the corpus.
    fn total_docs(&self) -> u64;

    /// Number of distinct words, which is also the feature-vector width.
    fn num_words(&self) -> usize;
}

impl<T: VocabCache + ?Sized> VocabCache for &T {
    fn index_of(&self, word: &str) -> Option<usize> {
        (**self).index_of(word)
    }

    fn word_frequency(&self, word: &str) -> u64 {
        (**self).word_frequency(word)
    }

    fn doc_appeared_in(&self, word: &str) -> u64 {
        (**self).doc_appeared_in(word)
    }

    fn total_docs(&self) -> u64 {
        (**self).total_docs()
    }

    fn num_words(&self) -> usize {
        (**self).num_words()
    }
}

impl<T: VocabCache + ?Sized> VocabCache for Arc<T> {
    fn index_of(&self, word: &str) -> Option<usize> {
        (**self).index_of(word)
    }

    fn word_frequency(&self, word: &str) -> u64 {
        (**self).word_frequency(word)
    }

    fn doc_appeared_in(&self, word: &str) -> u64 {
        (**self).doc_appeared_in(word)
    }

    fn total_docs(&self) -> u64 {
        (**self).total_docs()
    }

    fn num_words(&self) -> usize {
        (**self).num_words()
    }
}

/// One vocabulary record: a word plus the stats the scorer needs.
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabWord {
    pub word: String,
    pub index: usize,
    pub word_frequency: u64,
    pub doc_frequency: u64,
}

impl VocabWord {
    pub fn new(
        word: impl Into<String>,
        index: usize,
        word_frequency: u64,
        doc_frequency: u64,
    ) -> Self {
        Self {
            word: word.into(),
            index,
            word_frequency,
            doc_frequency,
        }
    }
}

#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
struct VocabEntry {
    index: usize,
    word_frequency: u64,
    doc_frequency: u64,
}

/// In-memory [`VocabCache`] implementation.
///
/// Indices must form exactly `[0, num_words)`, each assigned to one word;
/// construction and deserialization both enforce this, so every snapshot in
/// circulation can be indexed into without bounds concerns.
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct VocabSnapshot {
    words: HashMap<String, VocabEntry>,
    total_docs: u64,
}

impl VocabSnapshot {
    /// Build a snapshot from per-word records and the corpus document count.
    ///
    /// Fails with [`VectorizeError::InvalidVocab`] on duplicate words,
    /// duplicate indices, or an index outside `[0, word count)`.
    pub fn from_words(
        words: impl IntoIterator<Item = VocabWord>,
        total_docs: u64,
    ) -> Result<Self> {
        let records = words.into_iter().collect::<Vec<_>>();
        let num_words = records.len();

        let mut index_taken = vec![false; num_words];
        let mut map: HashMap<String, VocabEntry> = HashMap::default();

        for record in records {
            if record.index >= num_words {
                return Err(VectorizeError::InvalidVocab(format!(
                    "word {:?} has index {} but the vocabulary holds {num_words} words",
                    record.word, record.index
                )));
            }
            if index_taken[record.index] {
                return Err(VectorizeError::InvalidVocab(format!(
                    "index {} assigned to more than one word",
                    record.index
                )));
            }
            index_taken[record.index] = true;

            let previous = map.insert(
                record.word.clone(),
                VocabEntry {
                    index: record.index,
                    word_frequency: record.word_frequency,
                    doc_frequency: record.doc_frequency,
                },
            );
            if previous.is_some() {
                return Err(VectorizeError::InvalidVocab(format!(
                    "word {:?} listed more than once",
                    record.word
                )));
            }
        }

        Ok(Self {
            words: map,
            total_docs,
        })
    }

    /// An empty snapshot: no words, no documents. Vectorizing against it
    /// yields zero-length feature vectors.
    pub fn empty() -> Self {
        Self {
            words: HashMap::default(),
            total_docs: 0,
        }
    }

    /// Re-check the index invariant. Construction already guarantees it;
    /// deserialized snapshots go through this before first use.
    pub fn validate(&self) -> Result<()> {
        let num_words = self.words.len();
        let mut index_taken = vec![false; num_words];

        for (word, entry) in &self.words {
            if entry.index >= num_words {
                return Err(VectorizeError::InvalidVocab(format!(
                    "word {word:?} has index {} but the vocabulary holds {num_words} words",
                    entry.index
                )));
            }
            if index_taken[entry.index] {
                return Err(VectorizeError::InvalidVocab(format!(
                    "index {} assigned to more than one word",
                    entry.index
                )));
            }
            index_taken[entry.index] = true;
        }

        Ok(())
    }

    /// Deserialize a snapshot previously written by [`Self::to_bytes`] and
    /// validate it.
    #[cfg(feature = "bincode")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (snapshot, _): (Self, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|e| VectorizeError::Serialization(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serialize the snapshot for storage alongside a trained model.
    #[cfg(feature = "bincode")]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| VectorizeError::Serialization(e.to_string()))
    }
}

impl VocabCache for VocabSnapshot {
    fn index_of(&self, word: &str) -> Option<usize> {
        self.words.get(word).map(|entry| entry.index)
    }

    fn word_frequency(&self, word: &str) -> u64 {
        self.words.get(word).map_or(0, |entry| entry.word_frequency)
    }

    fn doc_appeared_in(&self, word: &str) -> u64 {
        self.words.get(word).map_or(0, |entry| entry.doc_frequency)
    }

    fn total_docs(&self) -> u64 {
        self.total_docs
    }

    fn num_words(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VocabSnapshot {
        VocabSnapshot::from_words(
            [
                VocabWord::new("cat", 0, 12, 4),
                VocabWord::new("dog", 1, 7, 3),
                VocabWord::new("fish", 2, 1, 1),
            ],
            10,
        )
        .expect("valid vocabulary")
    }

    #[test]
    fn test_lookups() {
        let vocab = sample();
        assert_eq!(vocab.index_of("dog"), Some(1));
        assert_eq!(vocab.word_frequency("cat"), 12);
        assert_eq!(vocab.doc_appeared_in("fish"), 1);
        assert_eq!(vocab.total_docs(), 10);
        assert_eq!(vocab.num_words(), 3);
    }

    #[test]
    fn test_unknown_word() {
        let vocab = sample();
        assert_eq!(vocab.index_of("parrot"), None);
        assert_eq!(vocab.word_frequency("parrot"), 0);
        assert_eq!(vocab.doc_appeared_in("parrot"), 0);
    }

    #[test]
    fn test_empty_snapshot() {
        let vocab = VocabSnapshot::empty();
        assert_eq!(vocab.num_words(), 0);
        assert_eq!(vocab.total_docs(), 0);
        assert_eq!(vocab.index_of("anything"), None);
    }

    #[test]
    fn test_rejects_index_out_of_range() {
        let err = VocabSnapshot::from_words([VocabWord::new("cat", 3, 1, 1)], 1).unwrap_err();
        assert!(matches!(err, VectorizeError::InvalidVocab(_)));
    }

    #[test]
    fn test_rejects_duplicate_index() {
        let err = VocabSnapshot::from_words(
            [VocabWord::new("cat", 0, 1, 1), VocabWord::new("dog", 0, 1, 1)],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, VectorizeError::InvalidVocab(_)));
    }

    #[test]
    fn test_rejects_duplicate_word() {
        let err = VocabSnapshot::from_words(
            [VocabWord::new("cat", 0, 1, 1), VocabWord::new("cat", 1, 1, 1)],
            1,
        )
        .unwrap_err();
        assert!(matches!(err, VectorizeError::InvalidVocab(_)));
    }

    #[test]
    fn test_shared_access_through_ref_and_arc() {
        let vocab = sample();
        fn width(cache: impl VocabCache) -> usize {
            cache.num_words()
        }
        assert_eq!(width(&vocab), 3);
        assert_eq!(width(std::sync::Arc::new(vocab)), 3);
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn test_bytes_round_trip() {
        let vocab = sample();
        let bytes = vocab.to_bytes().expect("encode");
        let restored = VocabSnapshot::from_bytes(&bytes).expect("decode");
        assert_eq!(restored.num_words(), 3);
        assert_eq!(restored.index_of("fish"), Some(2));
        assert_eq!(restored.total_docs(), 10);
    }
}
