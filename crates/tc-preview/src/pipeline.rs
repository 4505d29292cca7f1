use chrono::{DateTime, Utc};
use tc_config::PreviewConfig;

use crate::error::PreviewResult;
use crate::query::{HistogramQuery, build_histogram_query};
use crate::result::{TabularResult, parse_histogram};
use crate::series::HistogramSeries;
use crate::synth::synthesize;

/// Query building and result normalization bound to one `[preview]` config.
#[derive(Debug, Clone, Default)]
pub struct PreviewPipeline {
    config: PreviewConfig,
}

impl PreviewPipeline {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn histogram_query(
        &self,
        base: &str,
        timestamp_field: Option<&str>,
    ) -> PreviewResult<HistogramQuery> {
        build_histogram_query(base, timestamp_field, &self.config)
    }

    /// Parse without synthesis.
    pub fn parse(&self, result: &TabularResult) -> HistogramSeries {
        parse_histogram(result, &self.config.timestamp_candidates)
    }

    /// Parse, then replace series too sparse to chart with a synthesized one
    /// carrying the same total.
    pub fn normalize(&self, result: &TabularResult, now: DateTime<Utc>) -> HistogramSeries {
        let parsed = self.parse(result);
        if parsed.buckets.len() >= self.config.min_buckets {
            return parsed;
        }
        log::debug!(
            "synthesizing {} buckets for total {} ({} parsed bucket(s))",
            self.config.synthetic_buckets,
            parsed.total,
            parsed.buckets.len()
        );
        synthesize(
            parsed.total,
            self.config.synthetic_buckets,
            self.config.span.as_millis_i64(),
            now.timestamp_millis(),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::result::ColumnDef;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn span_count(rows: Vec<(i64, u64)>) -> TabularResult {
        TabularResult {
            schema: vec![ColumnDef::new("span"), ColumnDef::new("count()")],
            datarows: rows
                .into_iter()
                .map(|(k, c)| vec![json!(k), json!(c)])
                .collect(),
            total: None,
        }
    }

    #[test]
    fn dense_series_passes_through() {
        let pipeline = PreviewPipeline::default();
        let result = span_count(vec![(2, 5), (1, 3)]);
        let series = pipeline.normalize(&result, now());
        assert_eq!(series, pipeline.parse(&result));
        assert_eq!(series.total, 8);
    }

    #[test]
    fn single_bucket_is_synthesized() {
        let pipeline = PreviewPipeline::default();
        let series = pipeline.normalize(&span_count(vec![(1, 7)]), now());
        assert_eq!(series.buckets.len(), 12);
        assert_eq!(series.bucket_sum(), 7);
        assert_eq!(series.buckets[11].key, 1_700_000_000_000);
        assert_eq!(series.buckets[10].key, 1_700_000_000_000 - 3_600_000);
    }

    #[test]
    fn empty_result_synthesizes_zero_buckets() {
        let pipeline = PreviewPipeline::default();
        let series = pipeline.normalize(&TabularResult::default(), now());
        assert_eq!(series.buckets.len(), 12);
        assert_eq!(series.total, 0);
    }

    #[test]
    fn config_drives_synthesis() {
        let pipeline = PreviewPipeline::new(PreviewConfig {
            span: "5m".parse().unwrap(),
            synthetic_buckets: 4,
            min_buckets: 3,
            ..PreviewConfig::default()
        });
        let series = pipeline.normalize(&span_count(vec![(1, 10), (2, 10)]), now());
        assert_eq!(series.buckets.len(), 4);
        assert_eq!(series.bucket_sum(), 20);
        assert_eq!(series.buckets[3].key - series.buckets[2].key, 300_000);
    }
}
