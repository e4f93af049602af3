//! Tokenizer implementations for text analysis.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// A tokenizer emits one [`crate::analysis::Token`] per term, with the
/// position counting tokens from 0 and the offsets locating the token's
/// bytes in the original text. Tokenizers apply their configured
/// normalizer to the token text before emitting it.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
pub mod letter;
pub mod whitespace;

// Re-export all tokenizers for convenient access
pub use letter::LetterTokenizer;
pub use whitespace::WhitespaceTokenizer;
