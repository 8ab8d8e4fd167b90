//! Periodic and out-of-band sync for a shared quote book
//!
//! The remote fetch runs without the book lock held, so user actions may
//! interleave with it. The merge itself runs under the lock and sees the
//! collection as it stands when the fetch resolves; the last completed write
//! wins. Passes are never cancelled by one another.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::library::QuoteBook;
use crate::traits::*;
use crate::types::*;

/// Quote book shared between the timer and user actions
pub type SharedQuoteBook<P, S> = Arc<Mutex<QuoteBook<P, S>>>;

/// Wrap a quote book for shared use
pub fn share<P: KeyValueStore, S: KeyValueStore>(book: QuoteBook<P, S>) -> SharedQuoteBook<P, S> {
    Arc::new(Mutex::new(book))
}

/// Run one full sync pass against a shared quote book
pub async fn sync_shared<P, S>(book: &SharedQuoteBook<P, S>) -> QuoteResult<SyncSummary>
where
    P: KeyValueStore,
    S: KeyValueStore,
{
    let remote = {
        let mut guard = book.lock().await;
        guard.announce_sync();
        guard.remote()
    };

    let fetched = remote.fetch_items().await;
    book.lock().await.apply_remote(fetched)
}

/// Handle to a running periodic sync task
#[derive(Debug)]
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop the periodic task. A merge already under way is not interrupted.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn a task that syncs immediately and then every `interval`.
///
/// A zero interval is rejected with `QuoteError::Config`.
pub fn spawn_periodic_sync<P, S>(
    book: SharedQuoteBook<P, S>,
    interval: Duration,
) -> QuoteResult<SyncHandle>
where
    P: KeyValueStore + 'static,
    S: KeyValueStore + 'static,
{
    if interval.is_zero() {
        return Err(QuoteError::Config(
            "sync interval must be greater than zero".to_string(),
        ));
    }

    info!(interval_secs = interval.as_secs(), "Starting periodic sync");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match sync_shared(&book).await {
                Ok(summary) => debug!(
                    added = summary.added,
                    updated = summary.updated,
                    "Periodic sync pass finished"
                ),
                // Already reported to the user by the book; the next tick retries
                Err(e) => debug!(error = %e, "Periodic sync pass failed"),
            }
        }
    });

    Ok(SyncHandle { task })
}
