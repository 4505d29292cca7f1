use anyhow::Result;
use tc_lang::ast::QueryPredicate;

use crate::input::print_json;

pub fn parse(fragment: &str) -> Result<QueryPredicate> {
    tc_lang::parse_predicate(fragment).map_err(|e| anyhow::anyhow!("{e}"))
}

pub fn render(predicate: &QueryPredicate) -> Result<String> {
    tc_lang::render_predicate(predicate).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Parse a fragment and print either the predicate JSON or, with `canonical`,
/// its canonical fragment text.
pub fn run(fragment: &str, canonical: bool) -> Result<()> {
    let predicate = parse(fragment)?;
    tc_debug!(lang, operator = %predicate.operator, "predicate parsed");
    if canonical {
        println!("{}", render(&predicate)?);
        Ok(())
    } else {
        print_json(&predicate)
    }
}
