use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tc_config::ComposeConfig;
use tc_lang::ast::{BucketSelector, ConditionClause};

use crate::input::{parse_json, print_json, read_input};

/// Either a bare clause list or an object carrying one under `conditions`
/// (the shape `decompile` prints).
#[derive(Deserialize)]
#[serde(untagged)]
enum ClauseInput {
    List(Vec<ConditionClause>),
    Form { conditions: Vec<ConditionClause> },
}

impl ClauseInput {
    fn into_clauses(self) -> Vec<ConditionClause> {
        match self {
            Self::List(clauses) | Self::Form { conditions: clauses } => clauses,
        }
    }
}

/// Compile a clause list into the engine's bucket-selector object.
pub fn compile(raw: &str, config: &ComposeConfig) -> Result<BucketSelector> {
    let clauses = parse_json::<ClauseInput>(raw, "condition clause list")?.into_clauses();
    let selector = tc_lang::build_bucket_selector(&clauses, &config.condition)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    tc_info!(
        lang,
        clauses = clauses.len(),
        source = %selector.script.source,
        "condition compiled"
    );
    Ok(selector)
}

pub fn run(input: &Path, config: &ComposeConfig) -> Result<()> {
    let raw = read_input(input)?;
    print_json(&compile(&raw, config)?)
}
