//! Loading a tab-separated corpus from disk and searching it.
//!
//! The corpus format is one document per line: a numeric document ID in
//! the first column and the document text in the last, with bookkeeping
//! columns in between.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use lancea::analysis::{LetterTokenizer, LowercaseNormalizer, Tokenizer};
use lancea::error::Result;
use lancea::index::InvertedIndex;
use lancea::query::parse_query;
use lancea::search::{bm25_score, perform_search, term_count_score, text_range, Postings};
use tempfile::TempDir;

const CORPUS: &str = "\
101\tGenesis\t1\t1\tIn the beginning was the orchard, and the orchard was full of apple trees.
205\tGenesis\t1\t2\tThe gardener planted an apple tree by the river.
312\tExodus\t2\t1\tFigs and grapes grew beside the pear trees.
440\tExodus\t2\t2\tThe apple fell far from the apple tree.
523\tPsalms\t3\t1\tSing of rivers, gardens, and quiet orchards.
";

fn load_corpus(path: &std::path::Path) -> Result<InvertedIndex> {
    let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
    let mut index = InvertedIndex::new();

    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        let document_id: u64 = fields[0].parse().expect("numeric document id");
        let text = fields[fields.len() - 1];
        index.index_document(document_id, tokenizer.tokenize(text)?)?;
    }
    Ok(index)
}

fn write_corpus(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("corpus.tsv");
    let mut file = File::create(&path).unwrap();
    file.write_all(CORPUS.as_bytes()).unwrap();
    path
}

#[test]
fn tsv_corpus_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let index = load_corpus(&write_corpus(&dir))?;

    assert_eq!(index.document_count(), 5);
    assert_eq!(index.df("apple"), 3);
    assert_eq!(index.df("orchard"), 1);
    assert_eq!(index.total_occurrences("apple"), 4);

    let normalizer = LowercaseNormalizer::new();
    let expr = parse_query(&index, &normalizer, " apple ").unwrap();
    let postings = perform_search(&index, &expr);

    let doc_ids: Vec<u64> = (0..postings.len()).map(|i| postings.document_id(i)).collect();
    assert_eq!(doc_ids, vec![101, 205, 440]);
    assert_eq!(postings.search_hit_count(2), 2);
    Ok(())
}

#[test]
fn tsv_corpus_phrase_and_ranges() -> Result<()> {
    let dir = TempDir::new()?;
    let index = load_corpus(&write_corpus(&dir))?;

    let normalizer = LowercaseNormalizer::new();
    let expr = parse_query(&index, &normalizer, r#" "apple tree" "#).unwrap();
    let postings = perform_search(&index, &expr);

    let doc_ids: Vec<u64> = (0..postings.len()).map(|i| postings.document_id(i)).collect();
    assert_eq!(doc_ids, vec![205, 440]);

    // "The gardener planted an apple tree by the river."
    let range = text_range(&index, postings.as_ref(), 0, 0)?;
    assert_eq!((range.offset, range.length), (24, 10));

    // Document 440 mentions "apple" twice but only one "apple tree".
    assert_eq!(postings.search_hit_count(1), 1);
    assert_eq!(term_count_score(&index, &expr, postings.as_ref(), 1), 3);

    // Only matched documents are scored; the score of a hit is finite and
    // deterministic.
    let score = bm25_score(&index, &expr, postings.as_ref(), 1);
    assert!(score.is_finite());
    assert_eq!(score, bm25_score(&index, &expr, postings.as_ref(), 1));
    Ok(())
}
