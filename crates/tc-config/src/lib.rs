pub mod compose;
mod condition;
pub mod logging;
pub mod preview;
pub mod types;
mod validate;

pub use compose::ComposeConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use preview::{DEFAULT_TIMESTAMP_CANDIDATES, PreviewConfig};
pub use types::HumanDuration;
