//! Mapping hits back onto the original document text.

use crate::error::{LanceaError, Result};
use crate::index::posting::ByteRange;
use crate::index::InvertedIndex;
use crate::search::postings::Postings;

/// Resolve a hit to the byte range it covers in the original document.
///
/// For a single-token hit this is the token's stored range; a k-token hit
/// spans from the first token's start to the last token's end, including
/// whatever separator bytes lie between them.
///
/// # Errors
///
/// Returns an error when the document has no byte-range table or the hit
/// extends past it.
///
/// # Examples
///
/// ```
/// use lancea::prelude::*;
///
/// let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
/// let mut index = InvertedIndex::new();
/// index.index_document(0, tokenizer.tokenize("Hello World!").unwrap()).unwrap();
///
/// let expr = parse_query(&index, &LowercaseNormalizer::new(), " world ").unwrap();
/// let postings = perform_search(&index, &expr);
/// let range = text_range(&index, postings.as_ref(), 0, 0).unwrap();
/// assert_eq!((range.offset, range.length), (6, 5));
/// ```
pub fn text_range(
    index: &InvertedIndex,
    postings: &dyn Postings,
    index_pos: usize,
    hit_index: usize,
) -> Result<ByteRange> {
    let document_id = postings.document_id(index_pos);
    let term_pos = postings.term_position(index_pos, hit_index) as usize;
    let term_length = postings.term_length(index_pos, hit_index) as usize;

    let ranges = index.byte_ranges(document_id).ok_or_else(|| {
        LanceaError::index(format!("no byte ranges for document {document_id}"))
    })?;
    if term_pos + term_length > ranges.len() {
        return Err(LanceaError::invalid_argument(format!(
            "hit at position {term_pos} spans past the end of document {document_id}"
        )));
    }

    if term_length == 1 {
        Ok(ranges[term_pos])
    } else {
        let first = ranges[term_pos];
        let last = ranges[term_pos + term_length - 1];
        Ok(ByteRange::new(first.offset, last.end() - first.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{LetterTokenizer, LowercaseNormalizer, Tokenizer};
    use crate::query::parse_query;
    use crate::search::evaluator::perform_search;

    fn sample_index() -> InvertedIndex {
        let tokenizer =
            LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
        let mut index = InvertedIndex::new();
        for (document_id, text) in [
            "This is the first document.",
            "This is the second document.",
            "This is the third document. This is the second sentence in the third.",
        ]
        .iter()
        .enumerate()
        {
            index
                .index_document(document_id as u64, tokenizer.tokenize(text).unwrap())
                .unwrap();
        }
        index
    }

    #[test]
    fn test_single_token_range() {
        let index = sample_index();
        let expr = parse_query(&index, &LowercaseNormalizer::new(), " the ").unwrap();
        let postings = perform_search(&index, &expr);

        let range = text_range(&index, postings.as_ref(), 0, 0).unwrap();
        assert_eq!((range.offset, range.length), (8, 3));

        // Third occurrence of "the" in doc 2.
        let range = text_range(&index, postings.as_ref(), 2, 2).unwrap();
        assert_eq!((range.offset, range.length), (59, 3));
    }

    #[test]
    fn test_phrase_range_spans_separators() {
        let index = sample_index();
        let expr =
            parse_query(&index, &LowercaseNormalizer::new(), r#" "the second sentence" "#)
                .unwrap();
        let postings = perform_search(&index, &expr);

        let range = text_range(&index, postings.as_ref(), 0, 0).unwrap();
        assert_eq!((range.offset, range.length), (36, 19));
    }

    #[test]
    fn test_range_stays_within_document() {
        let index = sample_index();
        let texts = [
            "This is the first document.",
            "This is the second document.",
            "This is the third document. This is the second sentence in the third.",
        ];

        let expr = parse_query(&index, &LowercaseNormalizer::new(), r#" "is the" "#).unwrap();
        let postings = perform_search(&index, &expr);
        for i in 0..postings.len() {
            let text = texts[postings.document_id(i) as usize];
            for h in 0..postings.search_hit_count(i) {
                let range = text_range(&index, postings.as_ref(), i, h).unwrap();
                assert!(range.end() <= text.len());
                // The resolved slice starts and ends on token bytes.
                assert_eq!(&text[range.offset..range.end()], "is the");
            }
        }
    }
}
