//! Debounced query evaluation against the loaded index.
//!
//! [`QueryEngine`] is the entry point the UI layer talks to. Keystrokes go to
//! [`QueryEngine::submit_query`]; once typing pauses for the quiet interval
//! the latest text is evaluated and the resulting [`SearchOutcome`] is handed
//! to the render callback supplied at construction.
//!
//! # Outcomes
//!
//! - Blank input → [`SearchOutcome::Empty`]
//! - Index `Unloaded` → a detached fetch is started, [`SearchOutcome::Pending`]
//! - Index `Loading` → [`SearchOutcome::Pending`]
//! - Index `Failed` → [`SearchOutcome::Unavailable`] (no retry from here)
//! - Index `Loaded` → [`SearchOutcome::Results`]
//!
//! A query answered `Pending` is not replayed when the index lands; callers
//! that want that can watch [`IndexLoader::subscribe`] and resubmit.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use super::debounce::Debouncer;
use super::matcher::{Query, filter_entries};
use crate::config::SearchConfig;
use crate::loader::{IndexLoader, IndexSource, IndexState, LoadStatus};
use crate::models::SearchOutcome;

/// Receives the outcome of every settled query
pub type RenderCallback = Arc<dyn Fn(SearchOutcome) + Send + Sync>;

pub struct QueryEngine<S> {
    core: Arc<EngineCore<S>>,
    debouncer: Debouncer,
}

struct EngineCore<S> {
    loader: Arc<IndexLoader<S>>,
    max_hits: usize,
    render: RenderCallback,
}

impl<S: IndexSource> QueryEngine<S> {
    pub fn new<F>(loader: Arc<IndexLoader<S>>, config: &SearchConfig, render: F) -> Self
    where
        F: Fn(SearchOutcome) + Send + Sync + 'static,
    {
        let core = EngineCore { loader, max_hits: config.max_hits, render: Arc::new(render) };
        Self { core: Arc::new(core), debouncer: Debouncer::new(config.debounce()) }
    }

    pub fn loader(&self) -> &Arc<IndexLoader<S>> {
        &self.core.loader
    }

    /// Load the index ahead of the first query, e.g. when the search panel opens
    pub async fn prepare(&self) -> LoadStatus {
        self.core.loader.ensure_loaded().await
    }

    /// Debounced entry point for user input
    ///
    /// A later call within the quiet interval supersedes this one. Exactly one
    /// render callback fires per settled query, always for the latest text.
    ///
    /// Must be called within a Tokio runtime.
    pub fn submit_query(&self, text: impl Into<String>) {
        let text = text.into();
        let core = Arc::clone(&self.core);
        self.debouncer.schedule(move || {
            let outcome = core.evaluate(&text);
            debug!(query = %text, outcome = outcome_label(&outcome), "Dispatching search outcome");
            (core.render)(outcome);
        });
    }

    /// Evaluate `text` immediately, bypassing the debounce and the callback
    ///
    /// Outside a Tokio runtime an `Unloaded` index is not fetched; the query
    /// is answered `Pending` and the fetch waits for [`prepare`](Self::prepare)
    /// or a call made from within a runtime.
    pub fn evaluate(&self, text: &str) -> SearchOutcome {
        self.core.evaluate(text)
    }

    /// Drop any scheduled evaluation, e.g. when the search panel closes
    pub fn cancel_pending(&self) {
        self.debouncer.cancel();
    }

    pub fn has_pending_query(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl<S: IndexSource> EngineCore<S> {
    fn evaluate(&self, text: &str) -> SearchOutcome {
        let Some(query) = Query::parse(text) else {
            return SearchOutcome::Empty;
        };

        match self.loader.state() {
            IndexState::Loaded(entries) => {
                SearchOutcome::Results(filter_entries(&entries, &query, self.max_hits))
            }
            IndexState::Loading => SearchOutcome::Pending,
            IndexState::Unloaded => {
                if Handle::try_current().is_ok() {
                    self.loader.prefetch();
                } else {
                    debug!("No Tokio runtime, deferring search index fetch");
                }
                SearchOutcome::Pending
            }
            IndexState::Failed(_) => SearchOutcome::Unavailable,
        }
    }
}

fn outcome_label(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::Empty => "empty",
        SearchOutcome::Pending => "pending",
        SearchOutcome::Unavailable => "unavailable",
        SearchOutcome::Results(_) => "results",
    }
}
