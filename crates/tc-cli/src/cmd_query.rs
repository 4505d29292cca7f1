use anyhow::Result;
use tc_config::ComposeConfig;
use tc_preview::{HistogramQuery, PreviewPipeline};

pub fn build(
    base: &str,
    timestamp_field: Option<&str>,
    config: &ComposeConfig,
) -> Result<HistogramQuery> {
    let query = PreviewPipeline::new(config.preview.clone())
        .histogram_query(base, timestamp_field)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    tc_info!(
        preview,
        field = %query.timestamp_field,
        synthesized = query.synthesized,
        aggregated = query.aggregated,
        "histogram query built"
    );
    Ok(query)
}

pub fn run(base: &str, timestamp_field: Option<&str>, config: &ComposeConfig) -> Result<()> {
    println!("{}", build(base, timestamp_field, config)?.query);
    Ok(())
}
