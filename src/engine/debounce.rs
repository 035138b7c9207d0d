use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Runs only the most recent of a burst of jobs, after a quiet interval
///
/// Each [`schedule`](Self::schedule) call aborts the previously scheduled
/// task and bumps a generation counter. A job that wakes up after being
/// superseded sees a newer generation and does nothing, so a stale job can
/// never run even if the abort arrives too late.
pub struct Debouncer {
    quiet: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, generation: Arc::new(AtomicU64::new(0)), pending: Mutex::new(None) }
    }

    /// Schedule `job` to run once the quiet interval passes without another call
    ///
    /// Must be called within a Tokio runtime.
    pub fn schedule<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let quiet = self.quiet;

        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if latest.load(Ordering::SeqCst) == generation {
                job();
            }
        });

        if let Some(previous) = self.pending.lock().replace(task) {
            previous.abort();
        }
    }

    /// Discard whatever is scheduled
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    /// True while a scheduled job has not yet run or been cancelled
    pub fn is_pending(&self) -> bool {
        self.pending.lock().as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
