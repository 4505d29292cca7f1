#[macro_use]
mod log_macros;

pub mod cmd_compile;
pub mod cmd_decompile;
pub mod cmd_filters;
pub mod cmd_normalize;
pub mod cmd_predicate;
pub mod cmd_query;
pub mod input;
pub mod tracing_init;
