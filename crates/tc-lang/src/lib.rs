pub mod ast;
mod condition;
pub mod error;
mod filter;
pub mod parse_utils;
mod predicate;
mod segment;

pub use condition::{
    CompileOptions, FIELD_PREFIX, build_bucket_selector, compile_script, decompile_script,
    decompile_selector,
};
pub use error::{LangError, LangReason, LangResult};
pub use filter::{compile_filters, decompile_filters};
pub use predicate::{detect_operator, parse_predicate, render_predicate};
pub use segment::{SEGMENT_SIZE, segment_tokens};
