//! Query system: the expression tree and the query-string parser.

pub mod expression;
pub mod parser;

pub use self::expression::{Expression, DEFAULT_NEAR_GAP};
pub use self::parser::parse_query;
