//! Search engine: posting views, the query evaluator, scoring, and hit
//! text-range resolution.

pub mod evaluator;
pub mod highlight;
pub mod postings;
pub mod scorer;
pub mod text_range;

pub use self::evaluator::perform_search;
pub use self::highlight::{highlight, HighlightConfig};
pub use self::postings::{DocumentHits, Hit, HitList, Postings, TermPostings};
pub use self::scorer::{
    bm25_score, bm25_score_with_params, term_count_score, tf_idf_score, Bm25Params,
};
pub use self::text_range::text_range;
