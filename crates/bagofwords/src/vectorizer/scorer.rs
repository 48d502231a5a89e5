//! TF-IDF weighting.
//!
//! Term frequency is damped logarithmically so that very common words do not
//! drown out the rest of the vocabulary; inverse document frequency rewards
//! words concentrated in few documents. Both are computed from corpus-level
//! statistics only, so a word's score is the same wherever it occurs.

use crate::vocab::VocabCache;

/// Damped term frequency: `1 + log10(count)` for a positive count, `0.0`
/// for a word the corpus has never seen.
#[must_use]
pub fn tf(count: u64) -> f64 {
    if count > 0 {
        1.0 + (count as f64).log10()
    } else {
        0.0
    }
}

/// Inverse document frequency: `log10(total_docs / docs_with_term)`.
///
/// An empty corpus or a word that appears in no document yields `0.0`
/// rather than a division by zero or an infinity.
#[must_use]
pub fn idf(total_docs: u64, docs_with_term: u64) -> f64 {
    if total_docs > 0 && docs_with_term > 0 {
        (total_docs as f64 / docs_with_term as f64).log10()
    } else {
        0.0
    }
}

/// Product of the two weights.
#[must_use]
pub fn tfidf(tf: f64, idf: f64) -> f64 {
    tf * idf
}

/// Per-word scoring against a vocabulary snapshot.
pub struct TfIdfScorer<'a, V: ?Sized> {
    vocab: &'a V,
}

impl<'a, V: VocabCache + ?Sized> TfIdfScorer<'a, V> {
    pub fn new(vocab: &'a V) -> Self {
        Self { vocab }
    }

    pub fn term_frequency(&self, word: &str) -> f64 {
        tf(self.vocab.word_frequency(word))
    }

    pub fn inverse_doc_frequency(&self, word: &str) -> f64 {
        idf(self.vocab.total_docs(), self.vocab.doc_appeared_in(word))
    }

    pub fn score(&self, word: &str) -> f64 {
        tfidf(self.term_frequency(word), self.inverse_doc_frequency(word))
    }
}
