//! The in-memory positional inverted index.
//!
//! The index is populated by a sequence of [`InvertedIndex::index_document`]
//! calls and then queried read-only. There is no deletion or update: the
//! lifecycle is build once, query many.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::error::{LanceaError, Result};
use crate::index::posting::{ByteRange, PositionalList};

/// Dictionary entry for a single term.
#[derive(Clone, Debug, Default)]
struct TermEntry {
    /// Total occurrences of the term across all documents.
    total_occurrences: u64,
    /// The term's positional posting list.
    postings: PositionalList,
}

/// Summary statistics about an index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of indexed documents.
    pub document_count: usize,
    /// Number of distinct terms in the dictionary.
    pub term_count: usize,
    /// Total number of tokens consumed across all documents.
    pub total_token_count: u64,
    /// Mean number of tokens per document.
    pub average_document_term_count: f64,
}

/// An in-memory positional inverted index.
///
/// Maps normalized terms to positional posting lists, and keeps the
/// per-document token counts and byte-range tables needed for scoring and
/// for mapping hits back onto the original document text.
///
/// # Examples
///
/// ```
/// use lancea::analysis::{LetterTokenizer, LowercaseNormalizer, Tokenizer};
/// use lancea::index::InvertedIndex;
///
/// let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
/// let mut index = InvertedIndex::new();
/// index.index_document(0, tokenizer.tokenize("Hello World!").unwrap()).unwrap();
///
/// assert_eq!(index.document_count(), 1);
/// assert!(index.term_exists("hello"));
/// assert_eq!(index.df("world"), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InvertedIndex {
    /// Term dictionary mapping normalized terms to their entries.
    term_dictionary: AHashMap<String, TermEntry>,
    /// Token count per document (duplicates included).
    document_lengths: AHashMap<u64, u64>,
    /// Byte range of every token per document, indexed by term position.
    byte_ranges: AHashMap<u64, Vec<ByteRange>>,
    /// Sum of all document lengths.
    total_token_count: u64,
}

impl InvertedIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Index one document from a stream of tokens.
    ///
    /// The tokens must carry ascending positions starting at 0 and byte
    /// offsets into the document text, as produced by the tokenizers in
    /// [`crate::analysis`]. Token text is used as the index key verbatim,
    /// so any normalization must already have been applied.
    ///
    /// # Errors
    ///
    /// Returns an index error if `document_id` has already been indexed.
    pub fn index_document<I>(&mut self, document_id: u64, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = Token>,
    {
        if self.document_lengths.contains_key(&document_id) {
            return Err(LanceaError::index(format!(
                "document {document_id} is already indexed"
            )));
        }

        let mut term_count = 0u64;
        let mut ranges = Vec::new();

        for token in tokens {
            let entry = self.term_dictionary.entry(token.text).or_default();
            entry.total_occurrences += 1;
            entry
                .postings
                .add_term_position(document_id, token.position as u32);

            ranges.push(ByteRange::new(
                token.start_offset,
                token.end_offset - token.start_offset,
            ));
            term_count += 1;
        }

        self.document_lengths.insert(document_id, term_count);
        self.byte_ranges.insert(document_id, ranges);
        self.total_token_count += term_count;

        Ok(())
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.document_lengths.len()
    }

    /// Token count of a document, or 0 if the document is unknown.
    pub fn document_term_count(&self, document_id: u64) -> u64 {
        self.document_lengths
            .get(&document_id)
            .copied()
            .unwrap_or(0)
    }

    /// Mean token count over all documents.
    pub fn average_document_term_count(&self) -> f64 {
        if self.document_lengths.is_empty() {
            return 0.0;
        }
        self.total_token_count as f64 / self.document_lengths.len() as f64
    }

    /// Check whether a (normalized) term is present in the dictionary.
    pub fn term_exists(&self, term: &str) -> bool {
        self.term_dictionary.contains_key(term)
    }

    /// Total occurrences of a term across all documents, or 0 if unknown.
    pub fn total_occurrences(&self, term: &str) -> u64 {
        self.term_dictionary
            .get(term)
            .map(|entry| entry.total_occurrences)
            .unwrap_or(0)
    }

    /// Document frequency: the number of documents containing the term.
    pub fn df(&self, term: &str) -> usize {
        self.term_dictionary
            .get(term)
            .map(|entry| entry.postings.len())
            .unwrap_or(0)
    }

    /// Number of occurrences of a term within one document.
    pub fn occurrences(&self, term: &str, document_id: u64) -> u64 {
        self.term_dictionary
            .get(term)
            .and_then(|entry| entry.postings.positions_for_document(document_id))
            .map(|positions| positions.len() as u64)
            .unwrap_or(0)
    }

    /// Normalized term frequency: occurrences divided by document length.
    ///
    /// Returns 0.0 when the document does not contain the term.
    pub fn tf(&self, term: &str, document_id: u64) -> f64 {
        let occurrences = self.occurrences(term, document_id);
        if occurrences == 0 {
            return 0.0;
        }
        occurrences as f64 / self.document_term_count(document_id) as f64
    }

    /// The positional posting list for a term, or an empty list if the
    /// term is unknown.
    pub fn positional_list(&self, term: &str) -> &PositionalList {
        match self.term_dictionary.get(term) {
            Some(entry) => &entry.postings,
            None => PositionalList::empty(),
        }
    }

    /// Byte ranges of a document's tokens, indexed by term position.
    pub fn byte_ranges(&self, document_id: u64) -> Option<&[ByteRange]> {
        self.byte_ranges.get(&document_id).map(|v| v.as_slice())
    }

    /// Get summary statistics about the index.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.document_lengths.len(),
            term_count: self.term_dictionary.len(),
            total_token_count: self.total_token_count,
            average_document_term_count: self.average_document_term_count(),
        }
    }
}
