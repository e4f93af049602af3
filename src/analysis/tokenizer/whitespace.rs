//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::normalizer::Normalizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on Unicode whitespace.
///
/// Unlike [`super::letter::LetterTokenizer`], punctuation stays attached
/// to the adjacent word (`"world!"` is one token). Useful for corpora that
/// are already cleaned up, or when punctuation is significant.
#[derive(Default)]
pub struct WhitespaceTokenizer {
    normalizer: Option<Box<dyn Normalizer>>,
}

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer { normalizer: None }
    }

    /// Set the normalizer applied to each token's text.
    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }
}

impl std::fmt::Debug for WhitespaceTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhitespaceTokenizer")
            .field("normalizer", &self.normalizer.as_ref().map(|n| n.name()))
            .finish()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut position = 0;

        let mut chars = text.char_indices().peekable();
        while let Some(&(start, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }

            let mut end = start;
            let mut word = String::new();
            while let Some(&(offset, c)) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                word.push(c);
                end = offset + c.len_utf8();
                chars.next();
            }

            let normalized = match &self.normalizer {
                Some(normalizer) => normalizer.normalize(&word),
                None => word,
            };
            tokens.push(Token::with_offsets(normalized, position, start, end));
            position += 1;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
