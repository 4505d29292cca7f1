use std::path::Path;

use anyhow::Result;
use tc_config::ComposeConfig;
use tc_lang::ast::{BucketSelector, ConditionForm};

use crate::input::{parse_json, print_json, read_input};

/// Decode a bucket-selector JSON document into its editable form.
pub fn decompile(raw: &str, config: &ComposeConfig) -> Result<ConditionForm> {
    let selector: BucketSelector = parse_json(raw, "bucket selector")?;
    let form = tc_lang::decompile_selector(&selector, config.condition.default_connector);
    tc_debug!(
        lang,
        clauses = form.conditions.len(),
        "bucket selector decompiled"
    );
    Ok(form)
}

pub fn run(input: &Path, config: &ComposeConfig) -> Result<()> {
    let raw = read_input(input)?;
    print_json(&decompile(&raw, config)?)
}
