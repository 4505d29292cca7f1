use std::collections::BTreeMap;

use orion_error::prelude::*;

use crate::ast::{
    BucketSelector, ConditionClause, ConditionForm, Connector, Script, Threshold, ThresholdOp,
};
use crate::error::{LangReason, LangResult};
use crate::segment::segment_tokens;


/// Prefix the engine expects on every bucket variable in a script.
pub const FIELD_PREFIX: &str = "params.";

/// Knobs for turning a clause list into an engine [`BucketSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Connector assumed for non-anchor clauses that do not name one.
    pub default_connector: Connector,
    pub script_lang: String,
    pub parent_bucket_path: String,
    pub gap_policy: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            default_connector: Connector::And,
            script_lang: "painless".to_string(),
            parent_bucket_path: "composite_agg".to_string(),
            gap_policy: Some("skip".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Decompile: script -> clauses
// ---------------------------------------------------------------------------

/// Decode a script source into its clause list.
///
/// Never fails: short groups decode with the missing parts left empty, and
/// unknown symbols decode to `None` (operator) or `default_connector`.
pub fn decompile_script(source: &str, default_connector: Connector) -> Vec<ConditionClause> {
    let clauses: Vec<ConditionClause> = segment_tokens(source)
        .iter()
        .enumerate()
        .map(|(idx, group)| decompile_group(idx == 0, group, default_connector))
        .collect();
    log::debug!("decompiled {} clause(s) from script", clauses.len());
    clauses
}

fn decompile_group(
    is_anchor: bool,
    group: &[&str],
    default_connector: Connector,
) -> ConditionClause {
    // The anchor group lacks the leading connector token.
    let (boolean_connector, rest) = if is_anchor {
        (None, group)
    } else {
        let connector = group
            .first()
            .and_then(|&tok| Connector::from_symbol(tok))
            .unwrap_or(default_connector);
        (Some(connector), group.get(1..).unwrap_or_default())
    };

    let field = rest
        .first()
        .map(|&tok| tok.strip_prefix(FIELD_PREFIX).unwrap_or(tok).to_string())
        .unwrap_or_default();
    let operator = rest.get(1).and_then(|&tok| ThresholdOp::from_symbol(tok));
    let threshold = rest.get(2).map(|&tok| Threshold::from_token(tok));

    ConditionClause {
        boolean_connector,
        field,
        operator,
        threshold,
    }
}

/// Decode an engine selector into its editable form, copying the metadata
/// through untouched.
pub fn decompile_selector(selector: &BucketSelector, default_connector: Connector) -> ConditionForm {
    ConditionForm {
        conditions: decompile_script(&selector.script.source, default_connector),
        buckets_path: selector.buckets_path.clone(),
        parent_bucket_path: selector.parent_bucket_path.clone(),
        script: selector.script.clone(),
        gap_policy: selector.gap_policy.clone(),
    }
}

// ---------------------------------------------------------------------------
// Compile: clauses -> script
// ---------------------------------------------------------------------------

/// Render a clause list as script source.
///
/// The anchor's connector is dropped; later clauses without one take
/// `default_connector`. Clauses missing an operator or threshold, or whose
/// tokens would not survive whitespace splitting, are rejected.
pub fn compile_script(
    clauses: &[ConditionClause],
    default_connector: Connector,
) -> LangResult<String> {
    let mut tokens: Vec<String> = Vec::with_capacity(clauses.len() * 4);
    for (idx, clause) in clauses.iter().enumerate() {
        if idx > 0 {
            let connector = clause.boolean_connector.unwrap_or(default_connector);
            tokens.push(connector.symbol().to_string());
        }
        tokens.push(format!("{FIELD_PREFIX}{}", checked_field(idx, &clause.field)?));

        let Some(op) = clause.operator else {
            return incomplete(idx, "missing operator");
        };
        tokens.push(op.symbol().to_string());

        let Some(threshold) = &clause.threshold else {
            return incomplete(idx, "missing threshold");
        };
        tokens.push(checked_threshold(idx, threshold)?);
    }
    Ok(tokens.join(" "))
}

/// Build the engine condition object for a clause list.
///
/// `buckets_path` maps every referenced field to itself.
pub fn build_bucket_selector(
    clauses: &[ConditionClause],
    options: &CompileOptions,
) -> LangResult<BucketSelector> {
    let source = compile_script(clauses, options.default_connector)?;
    let buckets_path: BTreeMap<String, String> = clauses
        .iter()
        .map(|c| (c.field.clone(), c.field.clone()))
        .collect();
    log::debug!(
        "built bucket selector: {} clause(s), {} bucket path(s)",
        clauses.len(),
        buckets_path.len()
    );
    Ok(BucketSelector {
        buckets_path,
        parent_bucket_path: options.parent_bucket_path.clone(),
        script: Script {
            source,
            lang: options.script_lang.clone(),
        },
        gap_policy: options.gap_policy.clone(),
    })
}

fn checked_field(idx: usize, field: &str) -> LangResult<&str> {
    if field.is_empty() {
        return incomplete(idx, "missing field");
    }
    if field.chars().any(char::is_whitespace) {
        return StructError::from(LangReason::ScriptToken)
            .with_detail(format!("clause {idx}: field {field:?} contains whitespace"))
            .err();
    }
    Ok(field)
}

fn checked_threshold(idx: usize, threshold: &Threshold) -> LangResult<String> {
    match threshold {
        Threshold::Number(n) if !n.is_finite() => StructError::from(LangReason::ScriptToken)
            .with_detail(format!("clause {idx}: threshold {n} is not finite"))
            .err(),
        Threshold::Text(s) if s.is_empty() => incomplete(idx, "empty threshold"),
        Threshold::Text(s) if s.chars().any(char::is_whitespace) => {
            StructError::from(LangReason::ScriptToken)
                .with_detail(format!("clause {idx}: threshold {s:?} contains whitespace"))
                .err()
        }
        other => Ok(other.to_string()),
    }
}

fn incomplete<T>(idx: usize, what: &str) -> LangResult<T> {
    StructError::from(LangReason::IncompleteClause)
        .with_detail(format!("clause {idx}: {what}"))
        .err()
}
