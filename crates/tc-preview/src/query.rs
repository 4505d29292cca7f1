use std::sync::LazyLock;

use orion_error::prelude::*;
use regex::Regex;
use tc_config::PreviewConfig;

use crate::error::{PreviewReason, PreviewResult};

static AGGREGATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bstats\b|\bspan\s*\(").ok());

static PLAIN_FIELD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").ok());

/// A histogram query ready to hand to the query service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramQuery {
    pub query: String,
    /// Field the span clause buckets on (explicit, detected or synthetic).
    pub timestamp_field: String,
    /// `true` when an `eval <field> = NOW()` clause was appended.
    pub synthesized: bool,
    /// `true` when the base query already aggregates and was left alone.
    pub aggregated: bool,
}

/// Append a count-by-span clause to `base`.
///
/// The timestamp field is `timestamp_field` when given, else the first entry
/// of `config.timestamp_candidates` that appears as a whole word in the
/// query text, else `config.synthetic_field` bound by an appended
/// `eval ... = NOW()`. Queries that already contain `stats` or `span(` are
/// not aggregated a second time.
///
/// Detection is a text heuristic with no grammar awareness: a candidate name
/// used for something other than a timestamp is still picked up.
///
/// Fails with [`PreviewReason::InvalidField`] when the resolved field
/// contains a backtick, which cannot be expressed inside a quoted name.
pub fn build_histogram_query(
    base: &str,
    timestamp_field: Option<&str>,
    config: &PreviewConfig,
) -> PreviewResult<HistogramQuery> {
    let base = base.trim();
    let resolved = timestamp_field
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .or_else(|| find_timestamp_field(base, &config.timestamp_candidates));

    let (mut query, field, synthesized) = match resolved {
        Some(field) if field.contains('`') => {
            return StructError::from(PreviewReason::InvalidField)
                .with_detail(format!("field {field:?} contains a backtick"))
                .err();
        }
        Some(field) => (base.to_string(), field, false),
        None => (
            format!("{base} | eval {} = NOW()", config.synthetic_field),
            config.synthetic_field.clone(),
            true,
        ),
    };

    let aggregated = is_aggregated(base);
    if !aggregated {
        query.push_str(&format!(
            " | stats count() by span({}, {})",
            quote_field(&field),
            config.span
        ));
    }
    log::debug!(
        "histogram query: field={field} synthesized={synthesized} aggregated={aggregated}"
    );

    Ok(HistogramQuery {
        query,
        timestamp_field: field,
        synthesized,
        aggregated,
    })
}

/// First candidate (in list order) that occurs in `query` as a whole word.
pub fn find_timestamp_field(query: &str, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| {
            let pattern = format!(
                r"(?:^|[^A-Za-z0-9_@.]){}(?:$|[^A-Za-z0-9_])",
                regex::escape(candidate)
            );
            Regex::new(&pattern).is_ok_and(|re| re.is_match(query))
        })
        .cloned()
}

/// Whether the query text already carries an aggregation clause.
pub fn is_aggregated(query: &str) -> bool {
    AGGREGATION
        .as_ref()
        .is_some_and(|re| re.is_match(query))
}

fn quote_field(field: &str) -> String {
    let plain = PLAIN_FIELD
        .as_ref()
        .is_some_and(|re| re.is_match(field));
    if plain {
        field.to_string()
    } else {
        format!("`{field}`")
    }
}
