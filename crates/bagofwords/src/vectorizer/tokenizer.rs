use ahash::HashSet;
use tiktoken_rs::o200k_base_singleton;

/// Splits a text blob into an ordered sequence of terms.
///
/// Duplicates are preserved; filtering policy (stop words, stemming, case
/// folding) belongs to the tokenizer, not to the vectorizer that consumes
/// its output.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word-boundary tokenizer: splits on any non-alphanumeric character.
///
/// Lowercases by default and optionally drops stop words.
#[derive(Clone, Debug, Default)]
pub struct WordTokenizer {
    keep_case: bool,
    stop_words: Option<HashSet<String>>,
}

impl WordTokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the original casing instead of lowercasing every term.
    #[must_use]
    pub fn with_keep_case(mut self, keep_case: bool) -> Self {
        self.keep_case = keep_case;
        self
    }

    /// Drop the given words after case folding.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = Some(words.into_iter().map(Into::into).collect());
        self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|term| !term.is_empty())
            .map(|term| {
                if self.keep_case {
                    term.to_string()
                } else {
                    term.to_lowercase()
                }
            })
            .filter(|term| {
                self.stop_words
                    .as_ref()
                    .map_or(true, |stop| !stop.contains(term))
            })
            .collect()
    }
}

/// BPE tokenizer over the `o200k_base` encoding.
///
/// Emits the decoded text of each BPE token, for vocabularies whose terms
/// are token pieces rather than whitespace-delimited words.
#[derive(Clone, Copy, Debug, Default)]
pub struct BpeTokenizer;

impl BpeTokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for BpeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let bpe = o200k_base_singleton();
        let bpe = bpe.lock();
        bpe.encode_ordinary(text)
            .into_iter()
            .map(|id| bpe.decode(vec![id]).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer_splits_and_lowercases() {
        let tokens = WordTokenizer::new().tokenize("The cat, the CAT!");
        assert_eq!(tokens, vec!["the", "cat", "the", "cat"]);
    }

    #[test]
    fn test_word_tokenizer_keep_case() {
        let tokens = WordTokenizer::new()
            .with_keep_case(true)
            .tokenize("The CAT");
        assert_eq!(tokens, vec!["The", "CAT"]);
    }

    #[test]
    fn test_word_tokenizer_stop_words() {
        let tokens = WordTokenizer::new()
            .with_stop_words(["the", "a"])
            .tokenize("the cat sat on a mat");
        assert_eq!(tokens, vec!["cat", "sat", "on", "mat"]);
    }

    #[test]
    fn test_word_tokenizer_empty_input() {
        assert!(WordTokenizer::new().tokenize("").is_empty());
        assert!(WordTokenizer::new().tokenize("  ,.; ").is_empty());
    }

    #[test]
    fn test_bpe_tokenizer_round_trips_text() {
        let tokens = BpeTokenizer::new().tokenize("hello world");
        assert!(!tokens.is_empty());
        assert_eq!(tokens.concat(), "hello world");
    }
}
