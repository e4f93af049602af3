//! Index module for Lancea.
//!
//! This module provides the in-memory positional inverted index: the term
//! dictionary, per-term posting lists with positions, and the per-document
//! byte-range tables that map term positions back onto the original text.

pub mod inverted;
pub mod posting;

// Re-export commonly used types
pub use inverted::{IndexStats, InvertedIndex};
pub use posting::{ByteRange, PositionalList};
