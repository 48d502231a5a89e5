use ndarray::Array1;
use tracing::debug;

use super::{params::VectorizerParams, scorer::TfIdfScorer, tokenizer::Tokenizer};
use crate::vocab::VocabCache;

/// Score a tokenized document into a dense feature vector.
///
/// The vector is as wide as the vocabulary at call time. Each occurrence of
/// a known word writes its TF-IDF score at the word's index; the score is a
/// function of corpus statistics alone, so repeated occurrences overwrite
/// the slot with the same value. Unknown words and words under the
/// `min_word_frequency` floor contribute nothing.
pub(crate) fn assemble<V: VocabCache>(
    vocab: &V,
    tokenizer: &dyn Tokenizer,
    params: &VectorizerParams,
    text: &str,
) -> Array1<f64> {
    let mut features = Array1::zeros(vocab.num_words());
    let scorer = TfIdfScorer::new(vocab);
    let tokens = tokenizer.tokenize(text);
    debug!(
        num_tokens = tokens.len(),
        num_features = features.len(),
        "Assembling feature vector"
    );

    let min_frequency = params.min_word_frequency();
    for token in &tokens {
        if min_frequency > 0 && vocab.word_frequency(token) < min_frequency {
            continue;
        }
        if let Some(idx) = vocab.index_of(token) {
            features[idx] = scorer.score(token);
        }
    }

    features
}
