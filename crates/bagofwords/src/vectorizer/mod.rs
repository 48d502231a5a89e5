//! The vectorization pipeline: tokenize, score, assemble, encode the label.

mod assembler;
mod params;
pub mod scorer;
mod tokenizer;

pub use params::VectorizerParams;
pub use scorer::TfIdfScorer;
pub use tokenizer::{BpeTokenizer, Tokenizer, WordTokenizer};

use std::{fs, io::Read, path::Path};

use ndarray::Array1;
use tracing::debug;

use crate::{error::Result, labels::LabelSet, vocab::VocabCache};

/// One supervised training example: TF-IDF features plus a one-hot label.
///
/// Both vectors are freshly allocated per call and owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledExample {
    features: Array1<f64>,
    labels: Array1<f64>,
}

impl LabeledExample {
    /// TF-IDF feature vector, one slot per vocabulary word.
    #[must_use]
    pub fn features(&self) -> &Array1<f64> {
        &self.features
    }

    /// One-hot label vector, one slot per label in the label set.
    #[must_use]
    pub fn labels(&self) -> &Array1<f64> {
        &self.labels
    }

    #[must_use]
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>) {
        (self.features, self.labels)
    }
}

/// Turns single documents into TF-IDF feature vectors against a fixed,
/// read-only vocabulary, pairing them with one-hot encoded labels.
///
/// The vectorizer holds no per-document state: every call is an independent
/// computation over the snapshot it was built with. Batch work is the
/// caller's loop over these single-document entry points.
pub struct TfidfVectorizer<V> {
    vocab: V,
    labels: LabelSet,
    tokenizer: Box<dyn Tokenizer>,
    params: VectorizerParams,
}

impl<V: VocabCache> TfidfVectorizer<V> {
    /// Create a vectorizer over a vocabulary snapshot and label set, with
    /// the default word tokenizer and parameters.
    #[must_use]
    pub fn new(vocab: V, labels: LabelSet) -> Self {
        Self {
            vocab,
            labels,
            tokenizer: Box::new(WordTokenizer::new()),
            params: VectorizerParams::default(),
        }
    }

    /// Swap in a different tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: VectorizerParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn label_set(&self) -> &LabelSet {
        &self.labels
    }

    #[must_use]
    pub fn vocab(&self) -> &V {
        &self.vocab
    }

    /// Feature vector for `text`, without a label. Inference-time path.
    ///
    /// The vector length equals the vocabulary size; texts containing no
    /// vocabulary words produce an all-zero vector.
    #[must_use]
    pub fn transform(&self, text: &str) -> Array1<f64> {
        assembler::assemble(&self.vocab, self.tokenizer.as_ref(), &self.params, text)
    }

    /// Vectorize a text with its label.
    ///
    /// Fails with [`crate::VectorizeError::UnknownLabel`] if `label` is not
    /// in the label set; no partial result is produced.
    pub fn vectorize(&self, text: &str, label: &str) -> Result<LabeledExample> {
        let labels = self.labels.one_hot(label)?;
        let features = self.transform(text);
        debug!(label, num_features = features.len(), "Vectorized document");
        Ok(LabeledExample { features, labels })
    }

    /// Vectorize a byte stream with its label.
    ///
    /// The stream is read to completion and decoded as UTF-8 before
    /// scoring; read and decode failures surface as errors.
    pub fn vectorize_reader<R: Read>(&self, mut reader: R, label: &str) -> Result<LabeledExample> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)?;
        self.vectorize(&text, label)
    }

    /// Vectorize a file's contents with its label.
    ///
    /// The file is read fully and decoded as UTF-8.
    pub fn vectorize_file(&self, path: impl AsRef<Path>, label: &str) -> Result<LabeledExample> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        self.vectorize(&text, label)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::VectorizeError;
    use crate::vocab::{VocabSnapshot, VocabWord};

    fn vectorizer() -> TfidfVectorizer<VocabSnapshot> {
        let vocab = VocabSnapshot::from_words(
            [
                VocabWord::new("rust", 0, 30, 6),
                VocabWord::new("memory", 1, 12, 4),
                VocabWord::new("safety", 2, 8, 2),
            ],
            15,
        )
        .unwrap();
        let labels = LabelSet::new(["lang", "other"]).unwrap();
        TfidfVectorizer::new(vocab, labels)
    }

    #[test]
    fn test_vectorize_pairs_features_with_label() {
        let example = vectorizer()
            .vectorize("Rust gives memory safety", "lang")
            .unwrap();
        assert_eq!(example.features().len(), 3);
        assert_eq!(example.labels().len(), 2);
        assert_eq!(example.labels()[0], 1.0);
        assert_eq!(example.labels()[1], 0.0);
        assert!(example.features().iter().all(|v| v.is_finite()));
        assert!(example.features()[0] != 0.0);
    }

    #[test]
    fn test_unknown_label_fails_atomically() {
        let err = vectorizer().vectorize("rust", "python").unwrap_err();
        assert!(matches!(err, VectorizeError::UnknownLabel(_)));
    }

    #[test]
    fn test_transform_matches_vectorize_features() {
        let v = vectorizer();
        let example = v.vectorize("rust memory", "other").unwrap();
        assert_eq!(&v.transform("rust memory"), example.features());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let v = vectorizer();
        assert_eq!(v.transform("rust safety rust"), v.transform("rust safety rust"));
    }

    #[test]
    fn test_vectorize_reader() {
        let example = vectorizer()
            .vectorize_reader("rust memory safety".as_bytes(), "lang")
            .unwrap();
        assert!(example.features().iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_vectorize_reader_rejects_invalid_utf8() {
        let err = vectorizer()
            .vectorize_reader(&[0xff, 0xfe, 0x00][..], "lang")
            .unwrap_err();
        assert!(matches!(err, VectorizeError::Decode(_)));
    }

    #[test]
    fn test_vectorize_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "memory safety above all").unwrap();

        let v = vectorizer();
        let example = v.vectorize_file(file.path(), "other").unwrap();
        assert_eq!(example.features(), &v.transform("memory safety above all"));
        assert_eq!(example.labels()[1], 1.0);
    }

    #[test]
    fn test_vectorize_missing_file_is_io_error() {
        let err = vectorizer()
            .vectorize_file("/definitely/not/here.txt", "lang")
            .unwrap_err();
        assert!(matches!(err, VectorizeError::Io(_)));
    }

    #[test]
    fn test_custom_tokenizer_is_honored() {
        let vocab =
            VocabSnapshot::from_words([VocabWord::new("RUST", 0, 5, 2)], 10).unwrap();
        let labels = LabelSet::new(["x"]).unwrap();
        let v = TfidfVectorizer::new(vocab, labels)
            .with_tokenizer(Box::new(WordTokenizer::new().with_keep_case(true)));
        assert!(v.transform("RUST")[0] != 0.0);
        assert_eq!(v.transform("rust")[0], 0.0);
    }

    #[test]
    fn test_shared_vocab_by_reference() {
        let vocab = VocabSnapshot::from_words(
            [VocabWord::new("shared", 0, 2, 1)],
            4,
        )
        .unwrap();
        let labels = LabelSet::new(["a"]).unwrap();
        let v1 = TfidfVectorizer::new(&vocab, labels.clone());
        let v2 = TfidfVectorizer::new(&vocab, labels);
        assert_eq!(v1.transform("shared"), v2.transform("shared"));
    }
}
