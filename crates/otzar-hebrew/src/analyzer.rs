//! Text analysis pipeline for the otzar search index.
//!
//! Implements a four-stage pipeline:
//! 1. `DiacriticStripper` - removes Hebrew diacritics from the input
//! 2. `SimpleTokenizer` - splits on whitespace and punctuation
//! 3. `LowerCaser` - converts tokens to lowercase
//! 4. `RemoveLongFilter` - removes tokens longer than 40 bytes
//!
//! Diacritics come off before segmentation: cantillation marks are not
//! word characters, so stripping them per token would be too late — the
//! tokenizer would already have split the word around them.
//!
//! The same analyzer is used when indexing `content` and
//! `book_title_search` and when tokenizing query text, so the corpus and
//! queries share one lexical surface.

use tantivy::tokenizer::{
    LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, Tokenizer,
};

use crate::normalize::is_diacritic;

/// Name of the custom tokenizer registered with Tantivy.
pub const HEB_TOKENIZER: &str = "heb_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Builds the otzar text analyzer.
///
/// The analyzer is an immutable value; share it by cloning rather than
/// through globals.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(DiacriticStripper::new(SimpleTokenizer::default()))
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Tokenizer wrapper that removes Hebrew diacritics before handing the
/// text to the inner tokenizer.
///
/// Token offsets refer to the stripped text, not the original input.
#[derive(Clone)]
pub struct DiacriticStripper<T> {
    inner: T,
    buffer: String,
}

impl<T> DiacriticStripper<T> {
    /// Wraps an inner tokenizer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buffer: String::new(),
        }
    }
}

impl<T: Tokenizer> Tokenizer for DiacriticStripper<T> {
    type TokenStream<'a> = T::TokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        let Self { inner, buffer } = self;
        buffer.clear();
        buffer.extend(text.chars().filter(|c| !is_diacritic(*c)));
        inner.token_stream(buffer)
    }
}

#[cfg(test)]
mod test {
    use std::iter;

    use tantivy::tokenizer::TokenStream;

    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        let mut analyzer = build_analyzer();
        let mut stream = analyzer.token_stream(text);
        iter::from_fn(|| stream.next().map(|t| t.text.clone())).collect()
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(tokens("בְּרֵאשִׁית בָּרָא"), vec!["בראשית", "ברא"]);
    }

    #[test]
    fn cantillation_does_not_split_words() {
        // tevir (U+0596) sits mid-word and is not a word character
        assert_eq!(tokens("בְּרֵאשִׁ֖ית"), vec!["בראשית"]);
    }

    #[test]
    fn bare_and_pointed_words_share_a_surface() {
        assert_eq!(tokens("בָּרָא"), tokens("ברא"));
    }

    #[test]
    fn lowercases() {
        assert_eq!(tokens("HELLO World"), vec!["hello", "world"]);
    }

    #[test]
    fn splits_punctuation_and_digits() {
        assert_eq!(tokens("דף מא, עמוד ב"), vec!["דף", "מא", "עמוד", "ב"]);
        assert_eq!(tokens("psalm-23"), vec!["psalm", "23"]);
    }

    #[test]
    fn diacritic_only_runs_vanish() {
        assert_eq!(tokens("ברא ְֹ ברא"), vec!["ברא", "ברא"]);
    }

    #[test]
    fn removes_long_tokens() {
        let long = "a".repeat(50);
        assert_eq!(tokens(&format!("short {long} word")), vec!["short", "word"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }
}
