use crate::models::{IndexEntry, QueryResult};

/// A normalized, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    needle: String,
}

impl Query {
    /// Trim and lowercase raw input; `None` when nothing is left to search for
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self { needle: trimmed.to_lowercase() })
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring match against title, slug, or any tag
    pub fn matches(&self, entry: &IndexEntry) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(&self.needle);

        entry.title.as_deref().is_some_and(|title| contains(title))
            || contains(&entry.slug)
            || entry.tags.iter().any(|tag| contains(tag))
    }
}

/// Stable filter of `entries`, keeping at most `limit` hits
///
/// Hits keep their index order. `total_count` counts every match, including
/// the ones cut off by `limit`.
pub fn filter_entries(entries: &[IndexEntry], query: &Query, limit: usize) -> QueryResult {
    let mut hits = Vec::with_capacity(limit.min(entries.len()));
    let mut total_count = 0;

    for entry in entries.iter().filter(|entry| query.matches(entry)) {
        if hits.len() < limit {
            hits.push(entry.clone());
        }
        total_count += 1;
    }

    QueryResult { hits, total_count, truncated: total_count > limit }
}
