//! Posting views: the unified result contract of the query evaluator.
//!
//! Every query operator produces a [`Postings`] view, and every operator
//! consumes the views of its children through the same trait, so operators
//! compose freely. Two concrete variants exist: [`TermPostings`] borrows a
//! term's posting list straight from the index, and [`HitList`] owns the
//! hit records synthesized by the non-leaf operators.

use crate::index::posting::PositionalList;
use crate::index::InvertedIndex;

/// A read-only view over per-document search hits.
///
/// Documents appear in ascending `document_id` order; within a document,
/// hits appear in ascending `term_position` order. Consumers index
/// documents by `0..len()` and hits by `0..search_hit_count(index)`.
pub trait Postings: std::fmt::Debug {
    /// Number of documents in this view.
    fn len(&self) -> usize;

    /// Check if the view contains no documents.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Document ID of the entry at `index`.
    fn document_id(&self, index: usize) -> u64;

    /// Number of hit spans in the document at `index`.
    fn search_hit_count(&self, index: usize) -> usize;

    /// Starting term position of hit `hit_index` in the document at `index`.
    fn term_position(&self, index: usize, hit_index: usize) -> u32;

    /// Number of consecutive term positions the hit spans (1 for a single
    /// term, k for a k-word phrase).
    fn term_length(&self, index: usize, hit_index: usize) -> u32;

    /// Check whether `term_pos` is the start of one of the hits in the
    /// document at `index`.
    fn contains_position(&self, index: usize, term_pos: u32) -> bool;
}

/// A postings view borrowing a single term's posting list from the index.
///
/// Every position is a hit of length 1.
#[derive(Clone, Copy, Debug)]
pub struct TermPostings<'a> {
    list: &'a PositionalList,
}

impl<'a> TermPostings<'a> {
    /// Create a view over a posting list.
    pub fn new(list: &'a PositionalList) -> Self {
        TermPostings { list }
    }
}

impl Postings for TermPostings<'_> {
    fn len(&self) -> usize {
        self.list.len()
    }

    fn document_id(&self, index: usize) -> u64 {
        self.list.document_id(index)
    }

    fn search_hit_count(&self, index: usize) -> usize {
        self.list.positions(index).len()
    }

    fn term_position(&self, index: usize, hit_index: usize) -> u32 {
        self.list.positions(index)[hit_index]
    }

    fn term_length(&self, _index: usize, _hit_index: usize) -> u32 {
        1
    }

    fn contains_position(&self, index: usize, term_pos: u32) -> bool {
        self.list.positions(index).binary_search(&term_pos).is_ok()
    }
}

impl InvertedIndex {
    /// A postings view over one term, empty if the term is unknown.
    pub fn postings(&self, term: &str) -> TermPostings<'_> {
        TermPostings::new(self.positional_list(term))
    }
}

/// One result span within a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Starting term position of the span.
    pub position: u32,
    /// Number of consecutive term positions the span covers.
    pub length: u32,
}

impl Hit {
    /// Create a new hit.
    pub fn new(position: u32, length: u32) -> Self {
        Hit { position, length }
    }
}

/// All hits of one document, as synthesized by a query operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentHits {
    /// The document the hits belong to.
    pub document_id: u64,
    /// Hit spans, ascending by starting position.
    pub hits: Vec<Hit>,
}

/// An owned postings view over synthesized hit records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitList {
    documents: Vec<DocumentHits>,
}

impl HitList {
    /// Create a new empty hit list.
    pub fn new() -> Self {
        HitList {
            documents: Vec::new(),
        }
    }

    /// Append the hits of one document.
    ///
    /// Documents must be pushed in ascending `document_id` order.
    pub fn push(&mut self, document_hits: DocumentHits) {
        debug_assert!(self
            .documents
            .last()
            .map(|last| last.document_id < document_hits.document_id)
            .unwrap_or(true));
        self.documents.push(document_hits);
    }
}

impl Postings for HitList {
    fn len(&self) -> usize {
        self.documents.len()
    }

    fn document_id(&self, index: usize) -> u64 {
        self.documents[index].document_id
    }

    fn search_hit_count(&self, index: usize) -> usize {
        self.documents[index].hits.len()
    }

    fn term_position(&self, index: usize, hit_index: usize) -> u32 {
        self.documents[index].hits[hit_index].position
    }

    fn term_length(&self, index: usize, hit_index: usize) -> u32 {
        self.documents[index].hits[hit_index].length
    }

    fn contains_position(&self, index: usize, term_pos: u32) -> bool {
        self.documents[index]
            .hits
            .binary_search_by_key(&term_pos, |hit| hit.position)
            .is_ok()
    }
}
