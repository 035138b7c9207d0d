use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::sources::IndexSource;
use super::state::{IndexState, LoadStatus};
use crate::error::LoadError;
use crate::models::IndexEntry;
use crate::parsers::parse_index;

/// Owns the index state and guarantees at most one fetch in flight
///
/// The state lives in a `watch` channel: it is the only place the phase is
/// stored, the claim `Unloaded | Failed → Loading` happens under the channel's
/// lock, and consumers can subscribe to be told when the index lands.
///
/// The fetch itself runs in a spawned task that writes the terminal state,
/// even when the source panics. Dropping a caller that is awaiting
/// [`ensure_loaded`](Self::ensure_loaded) or using [`prefetch`](Self::prefetch)
/// therefore never leaves the state stuck in `Loading`.
pub struct IndexLoader<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<IndexState>>,
}

enum Claim {
    Settled(LoadStatus),
    Started(JoinHandle<LoadStatus>),
}

impl<S: IndexSource> IndexLoader<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(IndexState::Unloaded);
        Self { source: Arc::new(source), state: Arc::new(state) }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current phase and payload
    pub fn state(&self) -> IndexState {
        self.state.borrow().clone()
    }

    /// Observe state transitions, e.g. to refresh a loading indicator
    pub fn subscribe(&self) -> watch::Receiver<IndexState> {
        self.state.subscribe()
    }

    /// Return the index, fetching it if no fetch has succeeded yet
    ///
    /// - `Loaded`: returns the cached entries without touching the source
    /// - `Loading`: returns [`LoadStatus::Pending`] without a second fetch
    /// - `Unloaded` / `Failed`: starts a fetch and waits for its terminal state
    ///
    /// Failures are not retried automatically; calling this again after a
    /// `Failed` result starts a fresh attempt.
    ///
    /// Must be called within a Tokio runtime.
    pub async fn ensure_loaded(&self) -> LoadStatus {
        match self.claim() {
            Claim::Settled(status) => status,
            Claim::Started(fetch) => match fetch.await {
                Ok(status) => status,
                Err(err) => {
                    warn!(error = %err, "Search index fetch task ended abnormally");
                    self.abandon()
                }
            },
        }
    }

    /// Like [`ensure_loaded`](Self::ensure_loaded), but never waits
    ///
    /// A fetch started here runs detached and `Pending` is returned at once.
    pub fn prefetch(&self) -> LoadStatus {
        match self.claim() {
            Claim::Settled(status) => status,
            Claim::Started(_detached) => LoadStatus::Pending,
        }
    }

    fn claim(&self) -> Claim {
        let mut settled = None;
        self.state.send_if_modified(|state| match state {
            IndexState::Loaded(entries) => {
                settled = Some(LoadStatus::Loaded(Arc::clone(entries)));
                false
            }
            IndexState::Loading => {
                settled = Some(LoadStatus::Pending);
                false
            }
            IndexState::Unloaded | IndexState::Failed(_) => {
                *state = IndexState::Loading;
                true
            }
        });

        if let Some(status) = settled {
            return Claim::Settled(status);
        }

        debug!(source = %self.source.location(), "Fetching search index");
        let source = Arc::clone(&self.source);
        let settle = SettleOnDrop { state: Some(Arc::clone(&self.state)) };
        Claim::Started(tokio::spawn(async move {
            let status = match load_entries(source.as_ref()).await {
                Ok(entries) => {
                    info!(entries = entries.len(), "Search index loaded");
                    LoadStatus::Loaded(entries.into())
                }
                Err(err) => {
                    warn!(source = %source.location(), error = %err, "Failed to load search index");
                    LoadStatus::Failed(Arc::new(err))
                }
            };
            settle.settle(status.to_state());
            status
        }))
    }

    /// The fetch task ended with a `JoinError`; report whatever it settled to
    fn abandon(&self) -> LoadStatus {
        let mut status = LoadStatus::Pending;
        self.state.send_if_modified(|state| match state {
            IndexState::Loading => {
                let err = Arc::new(LoadError::Interrupted);
                status = LoadStatus::Failed(Arc::clone(&err));
                *state = IndexState::Failed(err);
                true
            }
            IndexState::Loaded(entries) => {
                status = LoadStatus::Loaded(Arc::clone(entries));
                false
            }
            IndexState::Failed(err) => {
                status = LoadStatus::Failed(Arc::clone(err));
                false
            }
            IndexState::Unloaded => false,
        });
        status
    }
}

/// Owned by the fetch task; moves `Loading` to `Failed(Interrupted)` if the
/// task is dropped before settling, e.g. when the source panics
struct SettleOnDrop {
    state: Option<Arc<watch::Sender<IndexState>>>,
}

impl SettleOnDrop {
    fn settle(mut self, next: IndexState) {
        if let Some(state) = self.state.take() {
            state.send_replace(next);
        }
    }
}

impl Drop for SettleOnDrop {
    fn drop(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };
        state.send_if_modified(|current| {
            if !matches!(current, IndexState::Loading) {
                return false;
            }
            warn!("Search index fetch ended without settling");
            *current = IndexState::Failed(Arc::new(LoadError::Interrupted));
            true
        });
    }
}

async fn load_entries<S: IndexSource>(source: &S) -> Result<Vec<IndexEntry>, LoadError> {
    let payload = source.fetch().await?;
    parse_index(&payload)
}
