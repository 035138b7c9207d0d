//! Single-flight loading of the search index
//!
//! [`IndexLoader`] fetches the index from an [`IndexSource`] at most once at a
//! time and caches the parsed entries for the lifetime of the loader. Every
//! caller observes the same terminal [`IndexState`].

pub mod single_flight;
pub mod sources;
pub mod state;

pub use single_flight::IndexLoader;
pub use sources::{FileSource, HttpSource, IndexSource, MemorySource};
pub use state::{IndexState, LoadStatus};
