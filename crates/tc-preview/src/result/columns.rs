use std::sync::LazyLock;

use regex::Regex;

use super::ColumnDef;

static BUCKET_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)bucket|window").ok());

static COUNT_FALLBACK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(^doc_count$|^total$|value$)").ok());

fn matches(re: &LazyLock<Option<Regex>>, name: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(name))
}

fn position(schema: &[ColumnDef], pred: impl Fn(&ColumnDef) -> bool) -> Option<usize> {
    schema.iter().position(pred)
}

/// Index of the bucket-key column.
///
/// Tried in order: a column named `span`, one named `span(...)`, one whose
/// name mentions bucket/window, one whose declared type mentions timestamp,
/// and finally one named after a timestamp candidate. Within each test the
/// leftmost matching column wins.
pub(crate) fn key_column(schema: &[ColumnDef], candidates: &[String]) -> Option<usize> {
    position(schema, |c| c.name == "span")
        .or_else(|| position(schema, |c| c.name.starts_with("span(")))
        .or_else(|| position(schema, |c| matches(&BUCKET_NAME, &c.name)))
        .or_else(|| {
            position(schema, |c| {
                c.column_type
                    .as_deref()
                    .is_some_and(|t| t.to_ascii_lowercase().contains("timestamp"))
            })
        })
        .or_else(|| position(schema, |c| candidates.iter().any(|cand| *cand == c.name)))
}

/// Index of the count column, never the same as `key`.
///
/// `count` or `count()` first, then names matching
/// `^doc_count$`, `^total$` or ending in `value`.
pub(crate) fn count_column(schema: &[ColumnDef], key: Option<usize>) -> Option<usize> {
    let eligible = |idx: usize| Some(idx) != key;
    schema
        .iter()
        .enumerate()
        .position(|(idx, c)| eligible(idx) && (c.name == "count" || c.name == "count()"))
        .or_else(|| {
            schema
                .iter()
                .enumerate()
                .position(|(idx, c)| eligible(idx) && matches(&COUNT_FALLBACK, &c.name))
        })
}
