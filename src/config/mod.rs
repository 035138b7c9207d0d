//! Search configuration.
//!
//! [`SearchConfig`] carries every tunable the engine reads: where the index
//! lives, how long the debounce quiet interval is, how many hits are rendered,
//! and the strings shown for each non-result state. All fields have defaults,
//! so a JSON config file only needs the keys it overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Path of the index artifact relative to the site root
pub const DEFAULT_INDEX_PATH: &str = "/search_index.json";
/// Quiet interval before a typed query is evaluated (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
/// Maximum number of hits handed to the renderer
pub const DEFAULT_MAX_HITS: usize = 50;
/// Maximum accepted size of the index payload: 10MB
pub const DEFAULT_MAX_INDEX_BYTES: u64 = 10 * 1024 * 1024;

const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub index_path: String,
    pub debounce_ms: u64,
    pub max_hits: usize,
    pub max_index_bytes: u64,
    /// Prefix joined with the percent-encoded slug to form a hit's link
    pub post_prefix: String,
    pub messages: Messages,
}

/// Strings the render projection uses for non-result states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub loading: String,
    pub unavailable: String,
    pub no_results: String,
    /// Summary line; `{count}` is replaced by the total match count
    pub summary: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: DEFAULT_INDEX_PATH.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_hits: DEFAULT_MAX_HITS,
            max_index_bytes: DEFAULT_MAX_INDEX_BYTES,
            post_prefix: "/post/".to_string(),
            messages: Messages::default(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: "Loading index...".to_string(),
            unavailable: "Failed to load the search index, please refresh and try again"
                .to_string(),
            no_results: "Nothing found".to_string(),
            summary: "Found {count} results".to_string(),
        }
    }
}

impl Messages {
    pub fn summary_for(&self, count: usize) -> String {
        self.summary.replace("{count}", &count.to_string())
    }
}

impl SearchConfig {
    /// Load a config from a JSON file, filling unspecified keys with defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`SearchConfig::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        let config: SearchConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse search config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the engine relies on
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `index_path` is empty
    /// - `max_hits` is zero
    /// - `debounce_ms` exceeds 10 seconds
    pub fn validate(&self) -> Result<()> {
        if self.index_path.trim().is_empty() {
            bail!("index_path cannot be empty");
        }
        if self.max_hits == 0 {
            bail!("max_hits must be at least 1");
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            bail!("debounce_ms must be at most {} (got {})", MAX_DEBOUNCE_MS, self.debounce_ms);
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn with_debounce(mut self, quiet: Duration) -> Self {
        self.debounce_ms = u64::try_from(quiet.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    pub fn with_index_path(mut self, index_path: impl Into<String>) -> Self {
        self.index_path = index_path.into();
        self
    }
}
