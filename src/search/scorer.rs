//! Relevance scoring for search results.
//!
//! Three scores are available per result document: the raw term count,
//! TF-IDF, and Okapi BM25. All of them are computed from the term leaves
//! of the originating expression against the index statistics. Leaves are
//! collected with multiplicity, so a term repeated in the query is
//! counted repeatedly.

use serde::{Deserialize, Serialize};

use crate::index::InvertedIndex;
use crate::query::Expression;
use crate::search::postings::Postings;

/// TF-IDF smoothing constant, added to both the document count and the
/// document frequency. Scores depend on the exact value.
const IDF_ADJUSTMENT: f64 = 0.001;

/// Okapi BM25 parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Document-length normalization.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.2, b: 0.75 }
    }
}

/// Sum of raw occurrence counts of the query's terms in the result
/// document at `index`.
///
/// Returns 0 when `index` is out of range (scoring an empty result is
/// well-defined).
pub fn term_count_score(
    index: &InvertedIndex,
    expr: &Expression,
    postings: &dyn Postings,
    index_pos: usize,
) -> u64 {
    if index_pos >= postings.len() {
        return 0;
    }
    let document_id = postings.document_id(index_pos);
    expr.terms()
        .iter()
        .map(|term| index.occurrences(term, document_id))
        .sum()
}

/// TF-IDF score of the result document at `index`.
///
/// For each term leaf t: `tf(t, d) · log₂((N + ε) / (df(t) + ε))` with
/// ε = 0.001. Returns 0.0 when `index` is out of range.
pub fn tf_idf_score(
    index: &InvertedIndex,
    expr: &Expression,
    postings: &dyn Postings,
    index_pos: usize,
) -> f64 {
    if index_pos >= postings.len() {
        return 0.0;
    }
    let document_id = postings.document_id(index_pos);
    expr.terms()
        .iter()
        .map(|term| index.tf(term, document_id) * idf(index, term))
        .sum()
}

/// Okapi BM25 score of the result document at `index`, with the standard
/// parameters k1 = 1.2, b = 0.75.
pub fn bm25_score(
    index: &InvertedIndex,
    expr: &Expression,
    postings: &dyn Postings,
    index_pos: usize,
) -> f64 {
    bm25_score_with_params(index, expr, postings, index_pos, Bm25Params::default())
}

/// Okapi BM25 score of the result document at `index` with explicit
/// parameters.
///
/// For each term leaf t with raw frequency f in document d:
/// `idf(t) · f·(k1+1) / (f + k1·(1 − b + b·dl/avgdl))` where
/// `idf(t) = log₂((N − df(t) + 0.5) / (df(t) + 0.5))`.
/// Returns 0.0 when `index` is out of range.
pub fn bm25_score_with_params(
    index: &InvertedIndex,
    expr: &Expression,
    postings: &dyn Postings,
    index_pos: usize,
    params: Bm25Params,
) -> f64 {
    if index_pos >= postings.len() {
        return 0.0;
    }
    let document_id = postings.document_id(index_pos);
    let document_length = index.document_term_count(document_id) as f64;
    let average_length = index.average_document_term_count();
    let document_count = index.document_count() as f64;

    let mut score = 0.0;
    for term in expr.terms() {
        let raw_frequency = index.occurrences(term, document_id) as f64;
        if raw_frequency == 0.0 {
            continue;
        }

        let df = index.df(term) as f64;
        let idf = ((document_count - df + 0.5) / (df + 0.5)).log2();

        let saturation = raw_frequency * (params.k1 + 1.0)
            / (raw_frequency
                + params.k1 * (1.0 - params.b + params.b * document_length / average_length));

        score += idf * saturation;
    }
    score
}

fn idf(index: &InvertedIndex, term: &str) -> f64 {
    let document_count = index.document_count() as f64;
    let df = index.df(term) as f64;
    ((document_count + IDF_ADJUSTMENT) / (df + IDF_ADJUSTMENT)).log2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{LetterTokenizer, LowercaseNormalizer, Tokenizer};
    use crate::query::parse_query;
    use crate::search::evaluator::perform_search;

    fn build_index(texts: &[&str]) -> InvertedIndex {
        let tokenizer =
            LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
        let mut index = InvertedIndex::new();
        for (document_id, text) in texts.iter().enumerate() {
            index
                .index_document(document_id as u64, tokenizer.tokenize(text).unwrap())
                .unwrap();
        }
        index
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_tf_and_df_reference_values() {
        let index = build_index(&[
            "apple orange orange banana",
            "banana orange strawberry strawberry grape",
        ]);

        assert_eq!(index.tf("orange", 0), 0.5);
        assert_eq!(index.tf("orange", 1), 0.2);
        assert_eq!(index.df("orange"), 2);
        assert_eq!(index.df("apple"), 1);
    }

    #[test]
    fn test_term_count_score() {
        let index = build_index(&[
            "apple banana apple",
            "banana cherry",
            "cherry banana cherry cherry",
            "durian banana",
        ]);

        let normalizer = LowercaseNormalizer::new();
        let expr = parse_query(&index, &normalizer, " apple ").unwrap();
        let postings = perform_search(&index, &expr);
        assert_eq!(term_count_score(&index, &expr, postings.as_ref(), 0), 2);

        // Conjunction sums over all term leaves.
        let expr = parse_query(&index, &normalizer, " banana cherry ").unwrap();
        let postings = perform_search(&index, &expr);
        assert_eq!(postings.len(), 2);
        assert_eq!(term_count_score(&index, &expr, postings.as_ref(), 0), 2);
        assert_eq!(term_count_score(&index, &expr, postings.as_ref(), 1), 4);
    }

    #[test]
    fn test_tf_idf_score() {
        let index = build_index(&[
            "apple banana apple",
            "banana cherry",
            "cherry banana cherry cherry",
            "durian banana",
        ]);

        let normalizer = LowercaseNormalizer::new();
        let expr = parse_query(&index, &normalizer, " apple ").unwrap();
        let postings = perform_search(&index, &expr);

        // tf = 2/3, idf = log2(4.001 / 1.001).
        assert_close(
            tf_idf_score(&index, &expr, postings.as_ref(), 0),
            1.3326,
        );
    }

    #[test]
    fn test_tf_idf_score_is_zero_for_ubiquitous_terms() {
        let index = build_index(&["banana apple", "banana cherry"]);

        let normalizer = LowercaseNormalizer::new();
        let expr = parse_query(&index, &normalizer, " banana ").unwrap();
        let postings = perform_search(&index, &expr);

        // df == N makes the smoothed idf log2(1) == 0.
        assert_close(tf_idf_score(&index, &expr, postings.as_ref(), 0), 0.0);
    }

    #[test]
    fn test_bm25_score() {
        let index = build_index(&[
            "apple banana apple",
            "banana cherry",
            "cherry banana cherry cherry",
            "durian banana",
        ]);

        let normalizer = LowercaseNormalizer::new();
        let expr = parse_query(&index, &normalizer, " apple ").unwrap();
        let postings = perform_search(&index, &expr);

        // idf = log2(3.5/1.5), f = 2, dl = 3, avgdl = 2.75.
        assert_close(bm25_score(&index, &expr, postings.as_ref(), 0), 1.6389);

        // Explicit parameters equal to the defaults give the same score.
        assert_close(
            bm25_score_with_params(
                &index,
                &expr,
                postings.as_ref(),
                0,
                Bm25Params { k1: 1.2, b: 0.75 },
            ),
            1.6389,
        );
    }

    #[test]
    fn test_bm25_rewards_higher_frequency() {
        let index = build_index(&[
            "apple banana apple",
            "banana cherry",
            "cherry banana cherry cherry",
            "durian banana",
            "plum fig",
        ]);

        let normalizer = LowercaseNormalizer::new();
        let expr = parse_query(&index, &normalizer, " cherry ").unwrap();
        let postings = perform_search(&index, &expr);
        assert_eq!(postings.len(), 2);

        // Doc 2 contains "cherry" three times, doc 1 once.
        let low = bm25_score(&index, &expr, postings.as_ref(), 0);
        let high = bm25_score(&index, &expr, postings.as_ref(), 1);
        assert!(high > low);
    }

    #[test]
    fn test_scores_on_empty_results_are_zero() {
        let index = build_index(&["apple banana"]);
        let normalizer = LowercaseNormalizer::new();
        let expr = parse_query(&index, &normalizer, " apple ").unwrap();
        let postings = perform_search(&index, &expr);

        assert_eq!(term_count_score(&index, &expr, postings.as_ref(), 5), 0);
        assert_eq!(tf_idf_score(&index, &expr, postings.as_ref(), 5), 0.0);
        assert_eq!(bm25_score(&index, &expr, postings.as_ref(), 5), 0.0);
    }
}
