use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nested `{field: {operator: value}}` filter map ("where" clauses).
///
/// Keys are kept sorted, so iteration yields `(field, operator)` in
/// lexicographic order regardless of how the source JSON was laid out.
pub type FilterMap = BTreeMap<String, BTreeMap<String, Value>>;

/// One `(field, operator, value)` entry of a [`FilterMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub field_name: String,
    pub operator: String,
    pub field_value: Value,
}
