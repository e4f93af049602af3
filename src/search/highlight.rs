//! Text highlighting for search results.
//!
//! Wraps every hit of a result document in configurable markup, using the
//! index's byte-range tables to splice tags into the original text
//! without re-tokenizing it.

use crate::error::Result;
use crate::index::posting::ByteRange;
use crate::index::InvertedIndex;
use crate::search::postings::Postings;
use crate::search::text_range::text_range;

/// Configuration for result highlighting.
#[derive(Clone, Debug)]
pub struct HighlightConfig {
    /// Tag to wrap highlighted spans in (e.g. "mark", "em", "strong").
    pub tag: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            tag: "mark".to_string(),
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag used to wrap highlighted spans.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    fn opening_tag(&self) -> String {
        format!("<{}>", self.tag)
    }

    fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Render a result document's text with every hit wrapped in the
/// configured tag.
///
/// `text` must be the exact original text of the document at `index_pos`;
/// the stored byte ranges are offsets into it.
///
/// # Examples
///
/// ```
/// use lancea::prelude::*;
/// use lancea::search::highlight::{highlight, HighlightConfig};
///
/// let text = "Hello World!";
/// let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
/// let mut index = InvertedIndex::new();
/// index.index_document(0, tokenizer.tokenize(text).unwrap()).unwrap();
///
/// let expr = parse_query(&index, &LowercaseNormalizer::new(), " world ").unwrap();
/// let postings = perform_search(&index, &expr);
/// let rendered = highlight(&index, postings.as_ref(), 0, text, &HighlightConfig::new()).unwrap();
/// assert_eq!(rendered, "Hello <mark>World</mark>!");
/// ```
pub fn highlight(
    index: &InvertedIndex,
    postings: &dyn Postings,
    index_pos: usize,
    text: &str,
    config: &HighlightConfig,
) -> Result<String> {
    let mut ranges: Vec<ByteRange> = (0..postings.search_hit_count(index_pos))
        .map(|h| text_range(index, postings, index_pos, h))
        .collect::<Result<_>>()?;
    // Hits ascend by position; overlapping spans (a term inside a phrase)
    // are merged so tags never interleave.
    ranges.dedup_by(|next, prev| {
        if next.offset < prev.end() {
            let end = prev.end().max(next.end());
            prev.length = end - prev.offset;
            true
        } else {
            false
        }
    });

    let opening = config.opening_tag();
    let closing = config.closing_tag();

    let mut rendered = String::with_capacity(text.len() + ranges.len() * (opening.len() + closing.len()));
    let mut cursor = 0;
    for range in ranges {
        rendered.push_str(&text[cursor..range.offset]);
        rendered.push_str(&opening);
        rendered.push_str(&text[range.offset..range.end()]);
        rendered.push_str(&closing);
        cursor = range.end();
    }
    rendered.push_str(&text[cursor..]);

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{LetterTokenizer, LowercaseNormalizer, Tokenizer};
    use crate::query::parse_query;
    use crate::search::evaluator::perform_search;

    const TEXTS: [&str; 2] = [
        "This is the first document.",
        "This is the third document. This is the second sentence in the third.",
    ];

    fn sample_index() -> InvertedIndex {
        let tokenizer =
            LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
        let mut index = InvertedIndex::new();
        for (document_id, text) in TEXTS.iter().enumerate() {
            index
                .index_document(document_id as u64, tokenizer.tokenize(text).unwrap())
                .unwrap();
        }
        index
    }

    fn render(query: &str, index_pos: usize) -> String {
        let index = sample_index();
        let expr = parse_query(&index, &LowercaseNormalizer::new(), query).unwrap();
        let postings = perform_search(&index, &expr);
        let text = TEXTS[postings.document_id(index_pos) as usize];
        highlight(&index, postings.as_ref(), index_pos, text, &HighlightConfig::new()).unwrap()
    }

    #[test]
    fn test_highlight_term_hits() {
        assert_eq!(
            render(" the ", 1),
            "This is <mark>the</mark> third document. \
             This is <mark>the</mark> second sentence in <mark>the</mark> third."
        );
    }

    #[test]
    fn test_highlight_phrase_hit() {
        assert_eq!(
            render(r#" "the first" "#, 0),
            "This is <mark>the first</mark> document."
        );
    }

    #[test]
    fn test_highlight_merges_overlapping_hits() {
        // "the" alone and "the first" as a phrase overlap; the rendered
        // output keeps a single span.
        assert_eq!(
            render(r#" the "the first" "#, 0),
            "This is <mark>the first</mark> document."
        );
    }

    #[test]
    fn test_highlight_custom_tag() {
        let index = sample_index();
        let expr = parse_query(&index, &LowercaseNormalizer::new(), " first ").unwrap();
        let postings = perform_search(&index, &expr);
        let config = HighlightConfig::new().tag("em");
        let rendered =
            highlight(&index, postings.as_ref(), 0, TEXTS[0], &config).unwrap();
        assert_eq!(rendered, "This is the <em>first</em> document.");
    }
}
