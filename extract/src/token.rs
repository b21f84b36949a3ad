//! Tokenizer adapter used for budget accounting and chunk splitting.
//!
//! Token ids are opaque; they are used solely for counting and splitting,
//! never for semantic interpretation. One extraction run must use a single
//! tokenizer configuration throughout so that budgets stay consistent.

use thiserror::Error;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// An error produced while decoding a token sequence back to text.
#[derive(Debug, Clone, Error)]
#[error("tokenizer error: {0}")]
pub struct TokenizerError(pub String);

/// A capability that turns text into an ordered sequence of token ids and
/// back. Sequences from different tokenizer configurations must never be
/// mixed.
pub trait Tokenizer {
    /// Encode text into token ids.
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Decode token ids back into text. A slice boundary may land inside a
    /// multi-byte character; implementations replace the partial fragment
    /// rather than fail, so any in-bounds slice of an encoded sequence
    /// decodes.
    ///
    /// # Errors
    ///
    /// `TokenizerError` if a token id is not part of the vocabulary.
    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError>;
}

/// The `cl100k_base` BPE tokenizer, matching the encoding the completion
/// models bill against.
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Create a tokenizer backed by the embedded `cl100k_base` data.
    #[must_use]
    pub fn new() -> Self {
        // The BPE data ships with the crate, so this only fails if the
        // embedded tables are corrupt.
        let bpe = cl100k_base().expect("failed to load cl100k_base tokenizer");
        Self { bpe }
    }
}

impl Default for TiktokenTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_with_special_tokens(text)
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        // Decode at the byte level so a slice boundary inside a multi-byte
        // character yields a replacement character instead of an error.
        let bytes = self
            .bpe
            .decode_bytes(tokens)
            .map_err(|e| TokenizerError(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Tokenizer, TokenizerError};

    /// A deterministic tokenizer for tests: one character, one token.
    pub(crate) struct CharTokenizer;

    impl Tokenizer for CharTokenizer {
        fn encode(&self, text: &str) -> Vec<u32> {
            text.chars().map(|c| c as u32).collect()
        }

        fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
            tokens
                .iter()
                .map(|t| {
                    char::from_u32(*t)
                        .ok_or_else(|| TokenizerError(format!("invalid token id: {t}")))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let tokenizer = TiktokenTokenizer::new();
        let text = "The quick brown fox jumps over the lazy dog.";

        let tokens = tokenizer.encode(text);
        assert!(!tokens.is_empty());

        let decoded = tokenizer.decode(&tokens).unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_encoding_is_stable() {
        let tokenizer = TiktokenTokenizer::new();
        let text = "Paragraph one.\nParagraph two.";

        assert_eq!(tokenizer.encode(text), tokenizer.encode(text));
    }

    #[test]
    fn test_empty_text_has_no_tokens() {
        let tokenizer = TiktokenTokenizer::new();
        assert!(tokenizer.encode("").is_empty());
    }

    #[test]
    fn test_partial_multibyte_sequence_decodes_lossily() {
        let tokenizer = TiktokenTokenizer::new();

        // The crab emoji spans several tokens; a one-token prefix ends in
        // the middle of its UTF-8 bytes.
        let tokens = tokenizer.encode("🦀");
        assert!(tokens.len() > 1);

        let decoded = tokenizer.decode(&tokens[..1]).unwrap();
        assert!(decoded.contains('\u{FFFD}'));
    }
}
