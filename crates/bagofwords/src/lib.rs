//! # bagofwords
//!
//! TF-IDF bag-of-words vectorization for supervised text learning.
//!
//! Documents are scored against a pre-built, read-only vocabulary snapshot:
//! each known word writes its TF-IDF weight into a dense feature vector as
//! wide as the vocabulary, and the document's label is encoded one-hot
//! against a fixed label set. Building the vocabulary itself (counting a
//! corpus) happens upstream; this crate only consumes the finished stats.
//!
//! ## Quick Start
//!
//! ```rust
//! use bagofwords::{LabelSet, TfidfVectorizer, VocabSnapshot, VocabWord};
//!
//! let vocab = VocabSnapshot::from_words(
//!     [
//!         VocabWord::new("cat", 0, 12, 4),
//!         VocabWord::new("dog", 1, 7, 3),
//!     ],
//!     10, // documents in the corpus
//! )?;
//! let labels = LabelSet::new(["pets", "other"])?;
//!
//! let vectorizer = TfidfVectorizer::new(vocab, labels);
//! let example = vectorizer.vectorize("the cat chased the dog", "pets")?;
//!
//! assert_eq!(example.features().len(), 2); // one slot per vocabulary word
//! assert_eq!(example.labels().as_slice().unwrap(), &[1.0, 0.0]);
//! # Ok::<(), bagofwords::VectorizeError>(())
//! ```
//!
//! ## Inference-only transform
//!
//! ```rust
//! use bagofwords::{LabelSet, TfidfVectorizer, VocabSnapshot, VocabWord};
//!
//! let vocab = VocabSnapshot::from_words([VocabWord::new("cat", 0, 12, 4)], 10)?;
//! let vectorizer = TfidfVectorizer::new(vocab, LabelSet::new(["x"])?);
//!
//! // No label needed when the vector feeds an already-trained model.
//! let features = vectorizer.transform("cat pictures");
//! assert_eq!(features.len(), 1);
//! # Ok::<(), bagofwords::VectorizeError>(())
//! ```
//!
//! ## Sharing one vocabulary
//!
//! A snapshot is never mutated by vectorization, so one copy can back any
//! number of vectorizers, by reference or behind an `Arc` when callers
//! parallelize across documents.

mod error;
mod labels;
pub mod vectorizer;
mod vocab;

pub use error::{Result, VectorizeError};
pub use labels::LabelSet;
pub use vectorizer::{
    BpeTokenizer, LabeledExample, TfIdfScorer, TfidfVectorizer, Tokenizer, VectorizerParams,
    WordTokenizer,
};
pub use vocab::{VocabCache, VocabSnapshot, VocabWord};
