use serde::Deserialize;

use crate::types::HumanDuration;

/// Field names probed, in order, when a query or result does not name its
/// timestamp explicitly.
pub const DEFAULT_TIMESTAMP_CANDIDATES: &[&str] = &[
    "@timestamp",
    "timestamp",
    "time",
    "event_time",
    "eventTime",
    "created_at",
    "date",
    "datetime",
];

/// `[preview]` section: tuning for histogram preview queries and series.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Width of one histogram bucket, both in the generated span clause and
    /// between synthesized buckets.
    pub span: HumanDuration,
    /// Name bound by the injected `eval <name> = NOW()` clause.
    pub synthetic_field: String,
    pub timestamp_candidates: Vec<String>,
    /// Number of buckets produced when a series has to be synthesized.
    pub synthetic_buckets: usize,
    /// Parsed series with fewer buckets than this are synthesized.
    pub min_buckets: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            span: HumanDuration::from_secs(3_600),
            synthetic_field: "__ppl_ts".to_string(),
            timestamp_candidates: DEFAULT_TIMESTAMP_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            synthetic_buckets: 12,
            min_buckets: 2,
        }
    }
}
