//! Letter-run tokenizer implementation.
//!
//! This module provides the default plain-text tokenizer: it walks the
//! input codepoint by codepoint and emits a token for every maximal run of
//! letter codepoints. Everything else (whitespace, punctuation, symbols)
//! acts as a separator.
//!
//! # Examples
//!
//! ```
//! use lancea::analysis::tokenizer::Tokenizer;
//! use lancea::analysis::tokenizer::letter::LetterTokenizer;
//!
//! let tokenizer = LetterTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, World!").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "World");
//! assert_eq!(tokens[1].start_offset, 7);
//! ```

use crate::analysis::normalizer::Normalizer;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that emits maximal runs of letter codepoints.
///
/// A "letter" is any Unicode alphabetic codepoint or an ASCII decimal
/// digit. Token positions count emitted tokens from 0; offsets are byte
/// offsets into the original text, so a hit can be mapped back onto the
/// document without re-tokenizing.
///
/// An optional normalizer is applied to each token's text before it is
/// emitted; without one, tokens keep their original spelling.
#[derive(Default)]
pub struct LetterTokenizer {
    normalizer: Option<Box<dyn Normalizer>>,
}

impl LetterTokenizer {
    /// Create a new letter tokenizer without a normalizer.
    pub fn new() -> Self {
        LetterTokenizer { normalizer: None }
    }

    /// Set the normalizer applied to each token's text.
    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    fn is_letter(c: char) -> bool {
        c.is_alphabetic() || c.is_ascii_digit()
    }
}

impl std::fmt::Debug for LetterTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LetterTokenizer")
            .field("normalizer", &self.normalizer.as_ref().map(|n| n.name()))
            .finish()
    }
}

impl Tokenizer for LetterTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut position = 0;

        let mut chars = text.char_indices().peekable();
        while let Some(&(start, c)) = chars.peek() {
            if !Self::is_letter(c) {
                chars.next();
                continue;
            }

            let mut end = start;
            let mut word = String::new();
            while let Some(&(offset, c)) = chars.peek() {
                if !Self::is_letter(c) {
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
        "letter"
    }
}
