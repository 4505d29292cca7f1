//! Histogram preview normalization: build a count-by-span query, parse the
//! tabular result into a bucket series and synthesize one when the result
//! is too sparse to chart.

pub mod error;
mod pipeline;
mod query;
mod result;
mod series;
mod synth;

pub use error::{PreviewError, PreviewReason, PreviewResult};
pub use pipeline::PreviewPipeline;
pub use query::{HistogramQuery, build_histogram_query, find_timestamp_field, is_aggregated};
pub use result::{ColumnDef, TabularResult, parse_histogram};
pub use series::{HistogramBucket, HistogramSeries};
pub use synth::synthesize;
