// src/broadcast.rs
//! Single owner of the current update list.
//!
//! One writer path (the cycle runner) publishes immutable snapshots
//! through a watch channel; display surfaces read the latest snapshot
//! or subscribe for change notification. Cycles are serialized so a
//! manual refresh never races the timer tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::feed::source::FeedSource;
use crate::feed::types::Update;

/// Default refresh cadence for the published sheet.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// `Loading` until the first cycle completes, success or failure; then
/// `Ready` forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    Loading,
    Ready,
}

/// Immutable view of the feed at one point in time. Cheap to clone;
/// the update list is shared, not copied.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub updates: Arc<Vec<Update>>,
    pub state: FeedState,
    pub last_refresh_unix: Option<i64>,
}

impl Snapshot {
    fn initial() -> Self {
        Self {
            updates: Arc::new(Vec::new()),
            state: FeedState::Loading,
            last_refresh_unix: None,
        }
    }

    /// Number of current updates that count toward the homework badge.
    pub fn homework_count(&self) -> usize {
        self.updates.iter().filter(|u| u.is_homework()).count()
    }
}

struct Inner {
    source: Option<Box<dyn FeedSource>>,
    tx: watch::Sender<Snapshot>,
    // Held for the whole cycle: at most one fetch in flight.
    cycle_lock: Mutex<()>,
}

/// Cloneable handle to the shared update list.
#[derive(Clone)]
pub struct UpdatesHandle {
    inner: Arc<Inner>,
}

impl UpdatesHandle {
    /// `source` is `None` when no feed URL is configured; that is a
    /// valid empty-feed state, not a startup failure.
    pub fn new(source: Option<Box<dyn FeedSource>>) -> Self {
        let (tx, _rx) = watch::channel(Snapshot::initial());
        Self {
            inner: Arc::new(Inner {
                source,
                tx,
                cycle_lock: Mutex::new(()),
            }),
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.tx.borrow().clone()
    }

    /// Subscribe for change notification. The receiver starts with the
    /// current snapshot already marked seen.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.tx.subscribe()
    }

    /// Run one full cycle now and return the fresh snapshot once it has
    /// been published. This is the pull-to-refresh path; it never
    /// returns an error to the caller.
    ///
    /// On fetch-level failure (network, non-2xx, missing URL) the
    /// last-known-good list is retained; a successful fetch always
    /// replaces the list, even with an empty parse result.
    pub async fn refresh(&self) -> Snapshot {
        let _guard = self.inner.cycle_lock.lock().await;

        // One "today" for the whole batch.
        let today = Local::now().date_naive();

        let updates = match &self.inner.source {
            None => {
                tracing::warn!("no feed URL configured, yielding empty update list");
                None
            }
            Some(source) => match crate::feed::run_once(source.as_ref(), today).await {
                Ok(outcome) => {
                    tracing::info!(
                        kept = outcome.updates.len(),
                        rows = outcome.stats.rows_seen,
                        blank = outcome.stats.blank_rows,
                        inactive = outcome.stats.dropped_inactive,
                        expired = outcome.stats.dropped_expired,
                        "feed cycle complete"
                    );
                    Some(Arc::new(outcome.updates))
                }
                // Fetch failed; keep what we have.
                Err(_) => None,
            },
        };

        let snapshot = {
            let prev = self.inner.tx.borrow();
            Snapshot {
                updates: updates.unwrap_or_else(|| prev.updates.clone()),
                state: FeedState::Ready,
                last_refresh_unix: Some(chrono::Utc::now().timestamp()),
            }
        };
        self.inner.tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Run one cycle immediately, then every `interval` until the
    /// returned task is aborted. Abort on teardown so the timer does
    /// not keep firing against a dropped consumer.
    pub fn spawn_poller(&self, interval: Duration) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                // First tick fires immediately: the initial cycle.
                ticker.tick().await;
                handle.refresh().await;
            }
        })
    }
}
