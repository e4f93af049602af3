//! Query parser for converting query strings into expression trees.
//!
//! The grammar, whitespace-insensitive:
//!
//! ```text
//! root      := or?
//! or        := and ('|' and)*
//! and       := near+
//! near      := primary ('~' primary)*
//! primary   := phrase | term | '(' or ')'
//! phrase    := '"' term+ '"'
//! term      := [A-Za-z0-9-]+
//! ```
//!
//! Juxtaposition is conjunction, `|` is disjunction, `~` is proximity with
//! the default gap, and `"…"` is a phrase. A parent with a single child
//! collapses to that child. Every lexed term is normalized with the
//! caller-supplied normalizer; a term that is absent from the index
//! dictionary fails the whole parse, so an expression is only ever
//! produced for queries that can match something.

use std::iter::Peekable;
use std::str::Chars;

use crate::analysis::normalizer::Normalizer;
use crate::error::{LanceaError, Result};
use crate::index::InvertedIndex;
use crate::query::expression::Expression;

/// Parse a query string against an index.
///
/// Returns `None` when the query is empty, syntactically invalid, or
/// contains a term that is not in the index dictionary. No partial
/// expression is ever returned.
///
/// # Examples
///
/// ```
/// use lancea::analysis::{LetterTokenizer, LowercaseNormalizer, Tokenizer};
/// use lancea::index::InvertedIndex;
/// use lancea::query::parse_query;
///
/// let tokenizer = LetterTokenizer::new().with_normalizer(Box::new(LowercaseNormalizer::new()));
/// let mut index = InvertedIndex::new();
/// index.index_document(0, tokenizer.tokenize("Hello World!").unwrap()).unwrap();
///
/// let normalizer = LowercaseNormalizer::new();
/// assert!(parse_query(&index, &normalizer, " Hello ").is_some());
/// assert!(parse_query(&index, &normalizer, " missing ").is_none());
/// ```
pub fn parse_query(
    index: &InvertedIndex,
    normalizer: &dyn Normalizer,
    input: &str,
) -> Option<Expression> {
    QueryStringParser::new(index, normalizer, input)
        .parse()
        .ok()
        .flatten()
}

/// Internal recursive-descent parser over the query string.
struct QueryStringParser<'a> {
    index: &'a InvertedIndex,
    normalizer: &'a dyn Normalizer,
    chars: Peekable<Chars<'a>>,
}

impl<'a> QueryStringParser<'a> {
    fn new(index: &'a InvertedIndex, normalizer: &'a dyn Normalizer, input: &'a str) -> Self {
        QueryStringParser {
            index,
            normalizer,
            chars: input.chars().peekable(),
        }
    }

    fn parse(mut self) -> Result<Option<Expression>> {
        self.skip_whitespace();
        if self.chars.peek().is_none() {
            // root := or?  An empty query produces no expression.
            return Ok(None);
        }

        let expr = self.parse_or()?;

        self.skip_whitespace();
        if self.chars.peek().is_some() {
            return Err(LanceaError::parse("unexpected trailing input"));
        }

        Ok(Some(expr))
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut nodes = vec![self.parse_and()?];

        loop {
            self.skip_whitespace();
            if self.chars.peek() == Some(&'|') {
                self.chars.next();
                nodes.push(self.parse_and()?);
            } else {
                break;
            }
        }

        Ok(collapse(nodes, Expression::Or))
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some(&c) if c == '"' || c == '(' || is_term_char(c) => {
                    nodes.push(self.parse_near()?);
                }
                _ => break,
            }
        }

        if nodes.is_empty() {
            return Err(LanceaError::parse("expected a term, phrase, or group"));
        }

        Ok(collapse(nodes, Expression::And))
    }

    fn parse_near(&mut self) -> Result<Expression> {
        let mut nodes = vec![self.parse_primary()?];

        loop {
            self.skip_whitespace();
            if self.chars.peek() == Some(&'~') {
                self.chars.next();
                nodes.push(self.parse_primary()?);
            } else {
                break;
            }
        }

        if nodes.len() == 1 {
            return Ok(nodes.pop().unwrap());
        }
        Ok(Expression::near(nodes))
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some(&'"') => self.parse_phrase(),
            Some(&'(') => {
                self.chars.next();
                let inner = self.parse_or()?;
                self.skip_whitespace();
                if self.chars.next() != Some(')') {
                    return Err(LanceaError::parse("expected ')'"));
                }
                Ok(inner)
            }
            Some(&c) if is_term_char(c) => self.parse_term(),
            _ => Err(LanceaError::parse("expected a term, phrase, or group")),
        }
    }

    fn parse_phrase(&mut self) -> Result<Expression> {
        self.chars.next(); // opening quote

        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some(&'"') => {
                    self.chars.next();
                    break;
                }
                Some(&c) if is_term_char(c) => nodes.push(self.parse_term()?),
                _ => return Err(LanceaError::parse("unterminated phrase")),
            }
        }

        if nodes.is_empty() {
            return Err(LanceaError::parse("empty phrase"));
        }

        Ok(collapse(nodes, Expression::Adjacent))
    }

    fn parse_term(&mut self) -> Result<Expression> {
        let mut word = String::new();
        while let Some(&c) = self.chars.peek() {
            if !is_term_char(c) {
                break;
            }
            word.push(c);
            self.chars.next();
        }

        if word.is_empty() {
            return Err(LanceaError::parse("expected a term"));
        }

        let term = self.normalizer.normalize(&word);
        if !self.index.term_exists(&term) {
            return Err(LanceaError::parse(format!("invalid term '{word}'")));
        }

        Ok(Expression::Term(term))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }
}

fn is_term_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn collapse(mut nodes: Vec<Expression>, combine: fn(Vec<Expression>) -> Expression) -> Expression {
    if nodes.len() == 1 {
        nodes.pop().unwrap()
    } else {
        combine(nodes)
    }
}
