//! Site Search - client-side search over a precomputed site index
//!
//! This library powers the search panel of a statically generated blog. It
//! lazy-loads the `search_index.json` artifact the site generator emits and
//! answers interactive substring queries against it:
//!
//! - Loading the index at most once at a time, whoever asks first
//! - Debouncing keystrokes so only the latest query is evaluated
//! - Case-insensitive matching on title, slug, and tags, in index order
//! - Bounding results while keeping the true match count
//! - Projecting outcomes into a view model the UI layer can draw
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use site_search::render::project;
//! use site_search::{HttpSource, IndexLoader, QueryEngine, SearchConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = SearchConfig::default();
//! let loader = Arc::new(IndexLoader::new(HttpSource::new("https://blog.example.com", &config)?));
//!
//! let view_config = config.clone();
//! let engine = QueryEngine::new(loader, &config, move |outcome| {
//!     println!("{:?}", project(&outcome, &view_config));
//! });
//!
//! engine.prepare().await;
//! engine.submit_query("rust");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod render;

// Re-export commonly used types
pub use config::SearchConfig;
pub use engine::{QueryEngine, RenderCallback};
pub use error::{ErrorKind, LoadError};
pub use loader::{FileSource, HttpSource, IndexLoader, IndexSource, IndexState, LoadStatus, MemorySource};
pub use models::{IndexEntry, QueryResult, SearchOutcome};
pub use parsers::parse_index;
