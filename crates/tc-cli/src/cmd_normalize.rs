use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use tc_config::ComposeConfig;
use tc_preview::{HistogramSeries, PreviewPipeline, TabularResult};

use crate::input::{print_json, read_input};

/// Normalize a raw query result. `synthesize = false` returns the parsed
/// series as-is.
pub fn normalize(
    raw: &str,
    config: &ComposeConfig,
    now: DateTime<Utc>,
    synthesize: bool,
) -> Result<HistogramSeries> {
    let result = TabularResult::from_json_str(raw).map_err(|e| anyhow::anyhow!("{e}"))?;
    let pipeline = PreviewPipeline::new(config.preview.clone());
    let series = if synthesize {
        pipeline.normalize(&result, now)
    } else {
        pipeline.parse(&result)
    };
    tc_info!(
        preview,
        rows = result.datarows.len(),
        buckets = series.buckets.len(),
        total = series.total,
        "query result normalized"
    );
    Ok(series)
}

/// Resolve `--now` (epoch milliseconds) or the wall clock.
pub fn resolve_now(now_ms: Option<i64>) -> Result<DateTime<Utc>> {
    match now_ms {
        Some(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| anyhow::anyhow!("--now {ms} is out of range")),
        None => Ok(Utc::now()),
    }
}

pub fn run(input: &Path, config: &ComposeConfig, now_ms: Option<i64>, synthesize: bool) -> Result<()> {
    let raw = read_input(input)?;
    let series = normalize(&raw, config, resolve_now(now_ms)?, synthesize)?;
    print_json(&series)
}
