use std::collections::BTreeMap;

use crate::ast::{FilterClause, FilterMap};

/// Flatten a filter map into one clause per `(field, operator)` pair.
///
/// An absent map yields no clauses. Output order follows the map's sorted
/// keys; callers should not attach meaning to it.
pub fn decompile_filters(map: Option<&FilterMap>) -> Vec<FilterClause> {
    let Some(map) = map else {
        return Vec::new();
    };
    map.iter()
        .flat_map(|(field, ops)| {
            ops.iter().map(move |(operator, value)| FilterClause {
                field_name: field.clone(),
                operator: operator.clone(),
                field_value: value.clone(),
            })
        })
        .collect()
}

/// Group clauses back into a nested filter map.
///
/// Two clauses sharing a `(field, operator)` pair collapse into one entry:
/// the later clause wins.
pub fn compile_filters(clauses: &[FilterClause]) -> FilterMap {
    let mut map: FilterMap = BTreeMap::new();
    for clause in clauses {
        let previous = map
            .entry(clause.field_name.clone())
            .or_default()
            .insert(clause.operator.clone(), clause.field_value.clone());
        if previous.is_some() {
            log::debug!(
                "filter {}.{} overwritten by a later clause",
                clause.field_name,
                clause.operator
            );
        }
    }
    map
}
