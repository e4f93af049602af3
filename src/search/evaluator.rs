//! Query evaluation over positional posting lists.
//!
//! The evaluator walks the expression tree bottom-up: children are
//! evaluated first, then the operator merges the child postings into a new
//! postings view. All non-leaf operators except `Or` are variants of
//! *intersection*: every child must land on the same document before a
//! hit record is synthesized. `Or` is a k-way merge that emits a record
//! whenever any child matches.
//!
//! The views produced here maintain the ordering contract of
//! [`Postings`]: documents strictly ascending, hit positions ascending
//! within a document. Higher operators rely on this, which is what lets a
//! phrase result feed a proximity operator exactly like a raw term.

use crate::index::InvertedIndex;
use crate::query::Expression;
use crate::search::postings::{DocumentHits, Hit, HitList, Postings};

/// How a matched document's hit record is synthesized during intersection.
#[derive(Clone, Copy, Debug)]
enum Synthesis {
    /// Pool every child's hits into one ascending sequence.
    Conjunction,
    /// Keep only hit positions where all children align consecutively.
    Adjacency,
    /// Keep windows where neighbouring hits are within the gap.
    Proximity(u32),
}

/// Evaluate an expression against an index.
///
/// The result of a [`Expression::Term`] leaf borrows the term's posting
/// list from the index; every other operator returns an owned list of
/// synthesized hits. Either way the caller sees the same [`Postings`]
/// contract.
///
/// # Examples
///
/// ```
/// use lancea::prelude::*;
///
/// let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
/// let mut index = InvertedIndex::new();
/// index.index_document(0, tokenizer.tokenize("a quick brown fox").unwrap()).unwrap();
///
/// let expr = parse_query(&index, &LowercaseNormalizer::new(), r#" "quick brown" "#).unwrap();
/// let postings = perform_search(&index, &expr);
/// assert_eq!(postings.len(), 1);
/// assert_eq!(postings.term_position(0, 0), 1);
/// assert_eq!(postings.term_length(0, 0), 2);
/// ```
pub fn perform_search<'a>(index: &'a InvertedIndex, expr: &Expression) -> Box<dyn Postings + 'a> {
    match expr {
        Expression::Term(term) => Box::new(index.postings(term)),
        Expression::And(nodes) => evaluate_intersection(index, nodes, Synthesis::Conjunction),
        Expression::Adjacent(nodes) => evaluate_intersection(index, nodes, Synthesis::Adjacency),
        Expression::Near { nodes, max_gap } => {
            evaluate_intersection(index, nodes, Synthesis::Proximity(*max_gap))
        }
        Expression::Or(nodes) => match nodes.as_slice() {
            [] => Box::new(HitList::new()),
            [only] => perform_search(index, only),
            _ => {
                let children = evaluate_children(index, nodes);
                Box::new(union(&children))
            }
        },
    }
}

fn evaluate_intersection<'a>(
    index: &'a InvertedIndex,
    nodes: &[Expression],
    synthesis: Synthesis,
) -> Box<dyn Postings + 'a> {
    match nodes {
        [] => Box::new(HitList::new()),
        [only] => perform_search(index, only),
        _ => {
            let children = evaluate_children(index, nodes);
            Box::new(intersect(&children, synthesis))
        }
    }
}

fn evaluate_children<'a>(
    index: &'a InvertedIndex,
    nodes: &[Expression],
) -> Vec<Box<dyn Postings + 'a>> {
    nodes.iter().map(|node| perform_search(index, node)).collect()
}

/// Walk all children in lockstep, synthesizing a hit record whenever every
/// cursor lands on the same document.
///
/// Advancement rule: compare the minimum and maximum document under the
/// cursors. On a match, synthesize and advance every cursor by one;
/// otherwise advance every lagging cursor until it reaches the maximum.
/// The walk ends as soon as any cursor exhausts.
fn intersect(children: &[Box<dyn Postings + '_>], synthesis: Synthesis) -> HitList {
    let mut result = HitList::new();
    let mut cursors = vec![0usize; children.len()];

    'walk: loop {
        let mut min_doc = u64::MAX;
        let mut max_doc = 0u64;
        for (child, &cursor) in children.iter().zip(&cursors) {
            if cursor >= child.len() {
                break 'walk;
            }
            let document_id = child.document_id(cursor);
            min_doc = min_doc.min(document_id);
            max_doc = max_doc.max(document_id);
        }

        if min_doc == max_doc {
            let hits = match synthesis {
                Synthesis::Conjunction => pooled_hits(children, &cursors),
                Synthesis::Adjacency => adjacent_hits(children, &cursors),
                Synthesis::Proximity(max_gap) => near_hits(children, &cursors, max_gap),
            };
            if !hits.is_empty() {
                result.push(DocumentHits {
                    document_id: min_doc,
                    hits,
                });
            }
            for cursor in &mut cursors {
                *cursor += 1;
            }
        } else {
            for (child, cursor) in children.iter().zip(&mut cursors) {
                while *cursor < child.len() && child.document_id(*cursor) < max_doc {
                    *cursor += 1;
                }
            }
        }
    }

    result
}

/// K-way merge over the children: at each step the children sharing the
/// minimum document emit a combined record and advance; exhausted children
/// drop out of the working set.
fn union(children: &[Box<dyn Postings + '_>]) -> HitList {
    let mut result = HitList::new();
    let mut cursors = vec![0usize; children.len()];
    let mut active: Vec<usize> = (0..children.len())
        .filter(|&c| !children[c].is_empty())
        .collect();

    while !active.is_empty() {
        let min_doc = active
            .iter()
            .map(|&c| children[c].document_id(cursors[c]))
            .min()
            .expect("active set is non-empty");

        let mut hits = Vec::new();
        for &c in &active {
            if children[c].document_id(cursors[c]) == min_doc {
                collect_hits(children[c].as_ref(), cursors[c], &mut hits);
                cursors[c] += 1;
            }
        }
        hits.sort_by_key(|hit| hit.position);

        result.push(DocumentHits {
            document_id: min_doc,
            hits,
        });

        active.retain(|&c| cursors[c] < children[c].len());
    }

    result
}

/// Every hit from every child, merged into one ascending sequence.
fn pooled_hits(children: &[Box<dyn Postings + '_>], cursors: &[usize]) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (child, &cursor) in children.iter().zip(cursors) {
        collect_hits(child.as_ref(), cursor, &mut hits);
    }
    // Stable, so hits at the same position keep child order.
    hits.sort_by_key(|hit| hit.position);
    hits
}

/// Phrase synthesis: child s must hit at `start + s` for every slot s.
///
/// The child with the fewest hits acts as the anchor; every candidate
/// start derived from the anchor is verified against the other children
/// with a position-membership test.
fn adjacent_hits(children: &[Box<dyn Postings + '_>], cursors: &[usize]) -> Vec<Hit> {
    let arity = children.len();
    let anchor = (0..arity)
        .min_by_key(|&c| children[c].search_hit_count(cursors[c]))
        .expect("intersection has at least two children");

    let mut hits = Vec::new();
    for h in 0..children[anchor].search_hit_count(cursors[anchor]) {
        let position = children[anchor].term_position(cursors[anchor], h) as i64;
        let start = position - anchor as i64;
        if start < 0 {
            continue;
        }

        let aligned = (0..arity).all(|slot| {
            slot == anchor
                || children[slot].contains_position(cursors[slot], (start + slot as i64) as u32)
        });
        if aligned {
            hits.push(Hit::new(start as u32, arity as u32));
        }
    }
    hits
}

/// Proximity synthesis: walk one hit cursor per child; a window is
/// satisfied when every neighbouring pair of heads (ordered by position)
/// is within the gap.
///
/// On a satisfied window every head emits a hit and all cursors advance;
/// otherwise only the smallest head advances (the first in child order
/// among equal positions, so equal heads cannot loop). The walk ends when
/// any cursor exhausts.
fn near_hits(children: &[Box<dyn Postings + '_>], cursors: &[usize], max_gap: u32) -> Vec<Hit> {
    let arity = children.len();
    let mut hit_cursors = vec![0usize; arity];
    let mut hits = Vec::new();

    'walk: loop {
        for slot in 0..arity {
            if hit_cursors[slot] >= children[slot].search_hit_count(cursors[slot]) {
                break 'walk;
            }
        }

        // Heads ordered by position; the sort is stable, so equal
        // positions keep child order.
        let mut heads: Vec<(Hit, usize)> = (0..arity)
            .map(|slot| {
                let hit = Hit::new(
                    children[slot].term_position(cursors[slot], hit_cursors[slot]),
                    children[slot].term_length(cursors[slot], hit_cursors[slot]),
                );
                (hit, slot)
            })
            .collect();
        heads.sort_by_key(|(hit, _)| hit.position);

        let satisfied = heads.windows(2).all(|pair| {
            let (prev, _) = pair[0];
            let (next, _) = pair[1];
            next.position as i64 - (prev.position as i64 + prev.length as i64 - 1)
                <= max_gap as i64
        });

        if satisfied {
            for (hit, _) in &heads {
                hits.push(*hit);
            }
            for hit_cursor in &mut hit_cursors {
                *hit_cursor += 1;
            }
        } else {
            let (_, slot) = heads[0];
            hit_cursors[slot] += 1;
        }
    }

    // Windows are emitted in walk order; restore the per-document
    // position ordering the postings contract requires.
    hits.sort_by(|a, b| a.position.cmp(&b.position).then(a.length.cmp(&b.length)));
    hits
}

fn collect_hits(child: &dyn Postings, cursor: usize, hits: &mut Vec<Hit>) {
    for h in 0..child.search_hit_count(cursor) {
        hits.push(Hit::new(
            child.term_position(cursor, h),
            child.term_length(cursor, h),
        ));
    }
}
