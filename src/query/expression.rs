//! The query expression tree.

use std::fmt;

/// Default maximum gap between neighbouring hits in a proximity query.
pub const DEFAULT_NEAR_GAP: u32 = 4;

/// A parsed query expression.
///
/// Leaves are single (normalized) terms; the other four variants combine
/// two or more child expressions. Every variant evaluates to a postings
/// view with the same contract, so expressions nest freely: a phrase can
/// be an operand of a proximity query, a group can be an operand of a
/// conjunction, and so on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    /// A single term.
    Term(String),
    /// All children must match the document (positions are pooled).
    And(Vec<Expression>),
    /// At least one child must match the document.
    Or(Vec<Expression>),
    /// Children must match at consecutive term positions (a phrase).
    Adjacent(Vec<Expression>),
    /// Children must match within `max_gap` positions of one another.
    Near {
        /// The proximity operands.
        nodes: Vec<Expression>,
        /// Maximum allowed gap between neighbouring hits.
        max_gap: u32,
    },
}

impl Expression {
    /// Create a term leaf.
    pub fn term<S: Into<String>>(term: S) -> Self {
        Expression::Term(term.into())
    }

    /// Create a proximity node with the default gap.
    pub fn near(nodes: Vec<Expression>) -> Self {
        Expression::Near {
            nodes,
            max_gap: DEFAULT_NEAR_GAP,
        }
    }

    /// Create a proximity node with an explicit gap.
    ///
    /// The query syntax never exposes the gap; this is the programmatic
    /// alternative for hosts that need a different distance.
    pub fn near_with_gap(nodes: Vec<Expression>, max_gap: u32) -> Self {
        Expression::Near { nodes, max_gap }
    }

    /// Collect the term leaves of this expression, in query order and
    /// with multiplicity (a repeated term is collected repeatedly).
    pub fn terms(&self) -> Vec<&str> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a str>) {
        match self {
            Expression::Term(term) => terms.push(term),
            Expression::And(nodes)
            | Expression::Or(nodes)
            | Expression::Adjacent(nodes)
            | Expression::Near { nodes, .. } => {
                for node in nodes {
                    node.collect_terms(terms);
                }
            }
        }
    }
}

impl fmt::Display for Expression {
    /// Render the expression in query syntax. Disjunctions nested inside
    /// another operator are parenthesized, so the output parses back to
    /// the same tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_operand(f: &mut fmt::Formatter<'_>, node: &Expression) -> fmt::Result {
            match node {
                Expression::Or(_) => write!(f, "({node})"),
                _ => write!(f, "{node}"),
            }
        }

        fn write_joined(
            f: &mut fmt::Formatter<'_>,
            nodes: &[Expression],
            separator: &str,
        ) -> fmt::Result {
            for (i, node) in nodes.iter().enumerate() {
                if i > 0 {
                    f.write_str(separator)?;
                }
                write_operand(f, node)?;
            }
            Ok(())
        }

        match self {
            Expression::Term(term) => f.write_str(term),
            Expression::And(nodes) => write_joined(f, nodes, " "),
            Expression::Or(nodes) => write_joined(f, nodes, " | "),
            Expression::Adjacent(nodes) => {
                f.write_str("\"")?;
                write_joined(f, nodes, " ")?;
                f.write_str("\"")
            }
            Expression::Near { nodes, .. } => write_joined(f, nodes, " ~ "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_constructors() {
        let near = Expression::near(vec![Expression::term("a"), Expression::term("b")]);
        match near {
            Expression::Near { max_gap, .. } => assert_eq!(max_gap, DEFAULT_NEAR_GAP),
            _ => panic!("expected Near"),
        }

        let near = Expression::near_with_gap(vec![Expression::term("a")], 2);
        match near {
            Expression::Near { max_gap, .. } => assert_eq!(max_gap, 2),
            _ => panic!("expected Near"),
        }
    }

    #[test]
    fn test_terms_with_multiplicity() {
        let expr = Expression::And(vec![
            Expression::term("apple"),
            Expression::Adjacent(vec![Expression::term("apple"), Expression::term("tree")]),
        ]);

        assert_eq!(expr.terms(), vec!["apple", "apple", "tree"]);
    }

    #[test]
    fn test_display_round_trips_query_syntax() {
        let expr = Expression::And(vec![
            Expression::Or(vec![Expression::term("first"), Expression::term("second")]),
            Expression::Adjacent(vec![Expression::term("is"), Expression::term("the")]),
        ]);
        assert_eq!(expr.to_string(), r#"(first | second) "is the""#);

        let expr = Expression::near(vec![
            Expression::term("second"),
            Expression::term("document"),
        ]);
        assert_eq!(expr.to_string(), "second ~ document");
    }
}
