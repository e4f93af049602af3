//! Positional posting lists and byte ranges.
//!
//! A [`PositionalList`] is the per-term record of the inverted index: for
//! every document containing the term, the ascending list of term
//! positions at which it occurs. Entries are kept sorted by document ID so
//! the list can be walked in document order by the query evaluator.

use serde::{Deserialize, Serialize};

/// A byte range locating a token in the original document text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    /// Byte offset of the first byte of the token.
    pub offset: usize,
    /// Length of the token in bytes.
    pub length: usize,
}

impl ByteRange {
    /// Create a new byte range.
    pub fn new(offset: usize, length: usize) -> Self {
        ByteRange { offset, length }
    }

    /// The byte offset one past the end of the range.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Positions of one term within one document.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DocumentPositions {
    document_id: u64,
    positions: Vec<u32>,
}

/// A posting list mapping each containing document to the ascending term
/// positions of occurrence.
///
/// Entries are ordered by document ID. Insertion uses a binary search with
/// an append fast path, since documents are usually indexed in ascending
/// ID order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionalList {
    entries: Vec<DocumentPositions>,
}

static EMPTY: PositionalList = PositionalList {
    entries: Vec::new(),
};

impl PositionalList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PositionalList {
            entries: Vec::new(),
        }
    }

    /// A shared empty posting list, used as the view for unknown terms.
    pub fn empty() -> &'static PositionalList {
        &EMPTY
    }

    /// Record an occurrence of the term at `term_pos` in `document_id`.
    ///
    /// Positions for a given document must arrive in ascending order (the
    /// tokenizer contract guarantees this).
    pub fn add_term_position(&mut self, document_id: u64, term_pos: u32) {
        if let Some(last) = self.entries.last_mut() {
            if last.document_id == document_id {
                last.positions.push(term_pos);
                return;
            }
            if last.document_id < document_id {
                self.entries.push(DocumentPositions {
                    document_id,
                    positions: vec![term_pos],
                });
                return;
            }
        } else {
            self.entries.push(DocumentPositions {
                document_id,
                positions: vec![term_pos],
            });
            return;
        }

        // Out-of-order document: insert at the sorted position.
        match self
            .entries
            .binary_search_by_key(&document_id, |e| e.document_id)
        {
            Ok(pos) => self.entries[pos].positions.push(term_pos),
            Err(pos) => self.entries.insert(
                pos,
                DocumentPositions {
                    document_id,
                    positions: vec![term_pos],
                },
            ),
        }
    }

    /// Number of documents in this posting list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Document ID of the entry at `index` (entries ascend by document ID).
    pub fn document_id(&self, index: usize) -> u64 {
        self.entries[index].document_id
    }

    /// Term positions of the entry at `index`, ascending.
    pub fn positions(&self, index: usize) -> &[u32] {
        &self.entries[index].positions
    }

    /// Term positions for a specific document, if it contains the term.
    pub fn positions_for_document(&self, document_id: u64) -> Option<&[u32]> {
        self.entries
            .binary_search_by_key(&document_id, |e| e.document_id)
            .ok()
            .map(|pos| self.entries[pos].positions.as_slice())
    }

    /// Total number of positions across all documents.
    pub fn position_count(&self) -> u64 {
        self.entries.iter().map(|e| e.positions.len() as u64).sum()
    }
}
