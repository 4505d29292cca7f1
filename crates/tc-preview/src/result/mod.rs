use orion_error::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{PreviewReason, PreviewResult};
use crate::series::{HistogramBucket, HistogramSeries};

mod coerce;
mod columns;

#[cfg(test)]
mod tests;

pub(crate) use coerce::{coerce_count, count_value};

/// Column descriptor of a tabular query result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(default, rename = "type")]
    pub column_type: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: None,
        }
    }

    pub fn typed(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: Some(column_type.into()),
        }
    }
}

/// `{schema, datarows, total?}` as returned by the query service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TabularResult {
    #[serde(default)]
    pub schema: Vec<ColumnDef>,
    #[serde(default)]
    pub datarows: Vec<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total: Option<u64>,
}

/// A `total` that is not a usable count is treated as absent so the row-count
/// fallback still applies.
fn lenient_total<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_value))
}

impl TabularResult {
    /// Decode a raw JSON response. Anything but an object with array-typed
    /// `schema` / `datarows` is rejected.
    pub fn from_json(value: Value) -> PreviewResult<Self> {
        if !value.is_object() {
            return StructError::from(PreviewReason::DataFormat)
                .with_detail(format!("query result must be a JSON object, got {value}"))
                .err();
        }
        serde_json::from_value(value).map_err(|e| {
            StructError::from(PreviewReason::DataFormat)
                .with_detail(format!("query result does not match {{schema, datarows}}: {e}"))
        })
    }

    pub fn from_json_str(raw: &str) -> PreviewResult<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            StructError::from(PreviewReason::DataFormat)
                .with_detail(format!("query result is not valid JSON: {e}"))
        })?;
        Self::from_json(value)
    }
}

/// Turn a tabular result into a histogram series.
///
/// Rows whose key cannot be coerced are dropped. `total` is the bucket sum
/// when any bucket survives, else the explicit `total`, else the row count.
/// Never fails: unidentifiable columns simply yield no buckets.
pub fn parse_histogram(result: &TabularResult, timestamp_candidates: &[String]) -> HistogramSeries {
    let key_idx = columns::key_column(&result.schema, timestamp_candidates);
    let count_idx = columns::count_column(&result.schema, key_idx);

    let buckets = match (key_idx, count_idx) {
        (Some(key_idx), Some(count_idx)) => {
            log::debug!(
                "histogram columns: key={} count={}",
                result.schema[key_idx].name,
                result.schema[count_idx].name
            );
            collect_buckets(&result.datarows, key_idx, count_idx)
        }
        _ => {
            if !result.datarows.is_empty() {
                log::debug!(
                    "no key/count column pair in schema {:?}",
                    result.schema.iter().map(|c| &c.name).collect::<Vec<_>>()
                );
            }
            Vec::new()
        }
    };

    let mut series = HistogramSeries { buckets, total: 0 };
    series.total = if series.buckets.is_empty() {
        result.total.unwrap_or(result.datarows.len() as u64)
    } else {
        series.bucket_sum()
    };
    series
}

fn collect_buckets(rows: &[Vec<Value>], key_idx: usize, count_idx: usize) -> Vec<HistogramBucket> {
    let mut buckets: Vec<HistogramBucket> = rows
        .iter()
        .filter_map(|row| {
            let key = row.get(key_idx).and_then(coerce::coerce_key)?;
            let doc_count = row.get(count_idx).map(coerce_count).unwrap_or(0);
            Some(HistogramBucket { key, doc_count })
        })
        .collect();

    let dropped = rows.len() - buckets.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} row(s) with an unparseable bucket key");
    }
    buckets.sort_by_key(|b| b.key);
    buckets
}
