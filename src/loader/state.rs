use std::sync::Arc;

use crate::error::LoadError;
use crate::models::IndexEntry;

/// Lifecycle of the search index
///
/// `Unloaded → Loading → Loaded | Failed`. A load attempt started from
/// `Failed` moves back to `Loading`. Payloads are shared, never mutated.
#[derive(Debug, Clone, Default)]
pub enum IndexState {
    #[default]
    Unloaded,
    Loading,
    Loaded(Arc<[IndexEntry]>),
    Failed(Arc<LoadError>),
}

impl IndexState {
    /// True once a load attempt has reached a terminal state
    pub fn is_settled(&self) -> bool {
        matches!(self, IndexState::Loaded(_) | IndexState::Failed(_))
    }

    pub fn entries(&self) -> Option<&Arc<[IndexEntry]>> {
        match self {
            IndexState::Loaded(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            IndexState::Unloaded => "unloaded",
            IndexState::Loading => "loading",
            IndexState::Loaded(_) => "loaded",
            IndexState::Failed(_) => "failed",
        }
    }
}

/// Answer to a single [`ensure_loaded`](super::IndexLoader::ensure_loaded) call
#[derive(Debug, Clone)]
pub enum LoadStatus {
    Loaded(Arc<[IndexEntry]>),
    Failed(Arc<LoadError>),
    /// Another caller's fetch is in flight
    Pending,
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded(_))
    }

    pub(crate) fn to_state(&self) -> IndexState {
        match self {
            LoadStatus::Loaded(entries) => IndexState::Loaded(Arc::clone(entries)),
            LoadStatus::Failed(err) => IndexState::Failed(Arc::clone(err)),
            LoadStatus::Pending => IndexState::Loading,
        }
    }
}
