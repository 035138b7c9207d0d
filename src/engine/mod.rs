//! Query evaluation: matching, debouncing, and the engine tying them together

pub mod debounce;
pub mod matcher;
pub mod query;

pub use debounce::Debouncer;
pub use matcher::{Query, filter_entries};
pub use query::{QueryEngine, RenderCallback};
