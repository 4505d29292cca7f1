use serde::{Deserialize, Serialize};

/// One `{time, count}` sample of a preview series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Bucket start, epoch milliseconds.
    pub key: i64,
    pub doc_count: u64,
}

/// Buckets in ascending `key` order plus the total they represent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub buckets: Vec<HistogramBucket>,
    pub total: u64,
}

impl HistogramSeries {
    pub fn bucket_sum(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.doc_count))
    }
}
