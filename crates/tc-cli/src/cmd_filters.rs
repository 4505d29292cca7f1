use std::path::Path;

use anyhow::Result;
use tc_lang::ast::{FilterClause, FilterMap};

use crate::input::{parse_json, print_json, read_input};

/// Flatten a filter map; `null` input yields an empty list.
pub fn decompile(raw: &str) -> Result<Vec<FilterClause>> {
    let map: Option<FilterMap> = parse_json(raw, "filter map")?;
    Ok(tc_lang::decompile_filters(map.as_ref()))
}

/// Group a filter-clause list back into a map. Later clauses overwrite
/// earlier ones on the same (field, operator).
pub fn compile(raw: &str) -> Result<FilterMap> {
    let clauses: Vec<FilterClause> = parse_json(raw, "filter clause list")?;
    let map = tc_lang::compile_filters(&clauses);
    let kept: usize = map.values().map(|ops| ops.len()).sum();
    if kept < clauses.len() {
        tc_warn!(
            lang,
            clauses = clauses.len(),
            kept,
            "colliding filter clauses overwritten"
        );
    }
    Ok(map)
}

pub fn run_decompile(input: &Path) -> Result<()> {
    print_json(&decompile(&read_input(input)?)?)
}

pub fn run_compile(input: &Path) -> Result<()> {
    print_json(&compile(&read_input(input)?)?)
}
