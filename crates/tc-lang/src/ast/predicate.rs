use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators understood in per-document query predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryOperator {
    Is,
    IsNot,
    IsGreater,
    IsGreaterEqual,
    IsLess,
    IsLessEqual,
}

impl QueryOperator {
    /// Textual operator for the numeric comparisons; `None` for `IS`/`IS_NOT`
    /// which are encoded structurally.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            QueryOperator::IsGreater => Some(">"),
            QueryOperator::IsGreaterEqual => Some(">="),
            QueryOperator::IsLess => Some("<"),
            QueryOperator::IsLessEqual => Some("<="),
            QueryOperator::Is | QueryOperator::IsNot => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QueryOperator::Is => "IS",
            QueryOperator::IsNot => "IS_NOT",
            QueryOperator::IsGreater => "IS_GREATER",
            QueryOperator::IsGreaterEqual => "IS_GREATER_EQUAL",
            QueryOperator::IsLess => "IS_LESS",
            QueryOperator::IsLessEqual => "IS_LESS_EQUAL",
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `{field, operator, value}` predicate of a document-level query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPredicate {
    pub field: String,
    pub operator: QueryOperator,
    pub value: String,
}
