mod condition;
mod filter;
mod predicate;

pub use condition::*;
pub use filter::*;
pub use predicate::*;
