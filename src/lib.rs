//! # Lancea
//!
//! An embeddable full-text search library for Rust.
//!
//! Lancea maintains an in-memory positional inverted index over Unicode
//! text and answers Boolean, phrase, and proximity queries with per-hit
//! term positions, byte ranges into the original document, and relevance
//! scores (raw term count, TF-IDF, Okapi BM25).
//!
//! ## Features
//!
//! - Positional inverted index built from caller-supplied tokenizers
//! - Boolean (`a b`, `a | b`), phrase (`"a b"`), and proximity (`a ~ b`)
//!   queries that compose freely
//! - TF-IDF and BM25 scoring
//! - Byte-accurate mapping from hits back to the original document text
//!
//! ## Example
//!
//! ```
//! use lancea::prelude::*;
//!
//! let normalizer = LowercaseNormalizer::new();
//! let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
//!
//! let mut index = InvertedIndex::new();
//! for (id, text) in ["Hello World!", "hello again"].iter().enumerate() {
//!     let tokens = tokenizer.tokenize(text).unwrap();
//!     index.index_document(id as u64, tokens).unwrap();
//! }
//!
//! let expr = parse_query(&index, &normalizer, "hello").unwrap();
//! let postings = perform_search(&index, &expr);
//! assert_eq!(postings.len(), 2);
//! ```

pub mod analysis;
pub mod error;
pub mod index;
pub mod query;
pub mod search;

pub mod prelude {
    //! Convenient re-exports of the main library entry points.

    pub use crate::analysis::{
        IdentityNormalizer, LetterTokenizer, LowercaseNormalizer, Normalizer, Token, Tokenizer,
        WhitespaceTokenizer,
    };
    pub use crate::error::{LanceaError, Result};
    pub use crate::index::{ByteRange, InvertedIndex};
    pub use crate::query::{parse_query, Expression};
    pub use crate::search::{
        bm25_score, perform_search, term_count_score, text_range, tf_idf_score, Postings,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
