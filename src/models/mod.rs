//! Data models for the site search index.
//!
//! - [`IndexEntry`] - One document summary from `search_index.json`
//! - [`QueryResult`] - Bounded hits for one query plus the true match count
//! - [`SearchOutcome`] - What a settled query hands to the render callback
//!
//! `IndexEntry` uses serde with custom deserializers (nullable fields, slug
//! validation) from the `parsers::deserializers` module.

pub mod entry;
pub mod outcome;

pub use entry::IndexEntry;
pub use outcome::{QueryResult, SearchOutcome};
