//! Pure projection from a [`SearchOutcome`] to something a UI can draw.
//!
//! The engine never builds markup. [`project`] turns an outcome into a
//! [`SearchView`] holding exactly what the search panel shows: the hit list
//! with links, a summary line, or a single status message. The DOM (or
//! terminal) layer maps the view to its own widgets.

pub mod links;

pub use links::post_href;

use crate::config::SearchConfig;
use crate::models::{IndexEntry, SearchOutcome};

/// Separator between the date and the tag list in a hit's meta line
const META_SEPARATOR: &str = " · ";

/// One rendered hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitView {
    pub href: String,
    pub title: String,
    /// Date followed by space-joined tags
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// No query: clear the result list and hide the summary
    Blank,
    /// Loading or failure message in place of results
    Status { message: String },
    NoResults { message: String, summary: String },
    Hits { items: Vec<HitView>, summary: String, truncated: bool },
}

/// Project an outcome into a view; identical inputs give identical views
pub fn project(outcome: &SearchOutcome, config: &SearchConfig) -> SearchView {
    let messages = &config.messages;

    match outcome {
        SearchOutcome::Empty => SearchView::Blank,
        SearchOutcome::Pending => SearchView::Status { message: messages.loading.clone() },
        SearchOutcome::Unavailable => SearchView::Status { message: messages.unavailable.clone() },
        SearchOutcome::Results(result) if result.hits.is_empty() => SearchView::NoResults {
            message: messages.no_results.clone(),
            summary: messages.summary_for(result.total_count),
        },
        SearchOutcome::Results(result) => SearchView::Hits {
            items: result.hits.iter().map(|entry| hit_view(entry, &config.post_prefix)).collect(),
            summary: messages.summary_for(result.total_count),
            truncated: result.truncated,
        },
    }
}

fn hit_view(entry: &IndexEntry, post_prefix: &str) -> HitView {
    let meta = if entry.tags.is_empty() {
        entry.date.clone()
    } else {
        let tags = entry.tags.join(" ");
        if entry.date.is_empty() { tags } else { format!("{}{}{}", entry.date, META_SEPARATOR, tags) }
    };

    HitView {
        href: post_href(post_prefix, &entry.slug),
        title: entry.display_title().to_string(),
        meta,
    }
}
