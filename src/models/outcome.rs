use super::IndexEntry;

/// Bounded result of one evaluated query
///
/// `total_count` is the number of matching entries before truncation. The
/// summary shown to the reader must use it rather than `hits.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub hits: Vec<IndexEntry>,
    pub total_count: usize,
    pub truncated: bool,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// What the render callback receives for a settled query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was empty or whitespace; render nothing, not "0 results"
    Empty,
    /// Index is not loaded yet; render a loading indicator
    Pending,
    /// Index failed to load; render an error message
    Unavailable,
    Results(QueryResult),
}

impl SearchOutcome {
    pub fn results(&self) -> Option<&QueryResult> {
        match self {
            SearchOutcome::Results(result) => Some(result),
            _ => None,
        }
    }
}
