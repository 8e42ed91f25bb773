//! Bookmark List Synchronizer.
//!
//! Owns the in-memory ordered view of one owner's bookmarks and reconciles
//! three independent update sources into it: the initial fetch, the remote
//! change feed, and the local "bookmark added" signal (which triggers an
//! authoritative re-fetch — the store assigns `id` and `created_at`, so the
//! fresh list is trusted over optimistic local data).
//!
//! All mutations happen inside one driver task; the sources are serialized
//! by `select!`, so the view never needs internal locking. Consumers watch
//! [`ListView`] snapshots.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::signal::AddedListener;
use crate::store::{BookmarkStore, FeedSubscription};
use crate::types::bookmark::Bookmark;
use crate::types::errors::{StoreError, SyncError};
use crate::types::event::ChangeEvent;

/// Render-ready snapshot of the bookmark list.
///
/// Invariants at every observable point: `items` is duplicate-free by `id`
/// and sorted by `created_at` descending.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub items: Vec<Bookmark>,
    /// True once the initial fetch has resolved; a front end renders a
    /// loading state until then.
    pub ready: bool,
    /// Last fetch failure, user-visible. Cleared by the next successful fetch.
    pub error: Option<String>,
}

impl ListView {
    /// Installs a fetched snapshot and marks the view ready.
    pub fn reset(&mut self, items: Vec<Bookmark>) {
        self.items = items;
        self.sort();
        self.ready = true;
        self.error = None;
    }

    /// Applies one change-feed event.
    ///
    /// Each arm is a no-op when its precondition does not hold (`Inserted`
    /// with the id already present, `Updated`/`Deleted` with it absent), so
    /// duplicate or reordered delivery cannot corrupt the view.
    pub fn apply(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Inserted(bookmark) => {
                if self.position_of(&bookmark.id).is_none() {
                    self.items.push(bookmark);
                    self.sort();
                }
            }
            ChangeEvent::Updated(bookmark) => {
                if let Some(pos) = self.position_of(&bookmark.id) {
                    self.items[pos] = bookmark;
                    self.sort();
                }
            }
            ChangeEvent::Deleted { id } => {
                if let Some(pos) = self.position_of(&id) {
                    self.items.remove(pos);
                }
            }
        }
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|b| b.id == id)
    }

    fn sort(&mut self) {
        // Stable, so equal keys keep their relative order. The SQLite store
        // never produces equal keys; other stores might.
        self.items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

type FetchResult = (u64, Result<Vec<Bookmark>, StoreError>);

/// The synchronizer: lifecycle handle around the driver task.
pub struct ListSynchronizer {
    store: Arc<dyn BookmarkStore>,
    owner_id: String,
    view_tx: Arc<watch::Sender<ListView>>,
    driver: Option<DriverHandle>,
}

struct DriverHandle {
    shutdown: oneshot::Sender<()>,
    #[allow(dead_code)]
    task: JoinHandle<()>,
}

impl ListSynchronizer {
    /// Creates a synchronizer for one owner. The owner id comes from the
    /// resolved session; the synchronizer never runs without one.
    pub fn new(store: Arc<dyn BookmarkStore>, owner_id: &str) -> Self {
        let (view_tx, _) = watch::channel(ListView::default());
        Self {
            store,
            owner_id: owner_id.to_string(),
            view_tx: Arc::new(view_tx),
            driver: None,
        }
    }

    /// A receiver of render-ready view snapshots.
    pub fn view(&self) -> watch::Receiver<ListView> {
        self.view_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_some()
    }

    /// Starts the synchronizer: opens the change feed, spawns the driver
    /// task, and issues the initial fetch.
    ///
    /// `added` is the listening half of the local "bookmark added" signal;
    /// each notification triggers a full re-fetch. Fetch failures are
    /// reported on the view and logged, never retried automatically.
    ///
    /// # Errors
    /// `SyncError::AlreadyStarted` if a subscription is already active.
    pub fn start(&mut self, added: AddedListener) -> Result<(), SyncError> {
        if self.driver.is_some() {
            return Err(SyncError::AlreadyStarted);
        }

        let feed = self.store.subscribe(&self.owner_id);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tracing::debug!(owner = %self.owner_id, "synchronizer starting");
        let task = tokio::spawn(drive(
            self.store.clone(),
            self.owner_id.clone(),
            self.view_tx.clone(),
            feed,
            added,
            shutdown_rx,
        ));
        self.driver = Some(DriverHandle {
            shutdown: shutdown_tx,
            task,
        });
        Ok(())
    }

    /// Stops the synchronizer: the driver exits, dropping the feed
    /// subscription and the signal listener. Idempotent. Any in-flight fetch
    /// completes into a closed channel and is discarded.
    pub fn stop(&mut self) {
        if let Some(handle) = self.driver.take() {
            tracing::debug!(owner = %self.owner_id, "synchronizer stopping");
            // The driver may already have exited on its own; that is fine.
            let _ = handle.shutdown.send(());
        }
    }
}

impl Drop for ListSynchronizer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The single logical thread of the synchronizer. Owns the feed
/// subscription and the signal listener; both are released when it exits.
///
/// `fetch_seq` is the generation of the most recently issued fetch; a
/// completed fetch is applied only if it carries that value (last one wins).
async fn drive(
    store: Arc<dyn BookmarkStore>,
    owner_id: String,
    view: Arc<watch::Sender<ListView>>,
    mut feed: FeedSubscription,
    mut added: AddedListener,
    mut shutdown: oneshot::Receiver<()>,
) {
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut fetch_seq: u64 = 0;

    issue_fetch(&store, &owner_id, &fetch_tx, &mut fetch_seq);

    let mut feed_open = true;
    let mut added_open = true;

    loop {
        tokio::select! {
            // Resolves on stop() or when the synchronizer itself is dropped.
            _ = &mut shutdown => break,
            Some((seq, result)) = fetch_rx.recv() => {
                if seq != fetch_seq {
                    tracing::debug!(seq, current = fetch_seq, "discarding superseded fetch");
                    continue;
                }
                match result {
                    Ok(items) => view.send_modify(|list| list.reset(items)),
                    Err(e) => {
                        tracing::warn!(owner = %owner_id, error = %e, "bookmark fetch failed");
                        // The fetch resolved, so the loading state ends even
                        // on failure; the error is shown instead.
                        view.send_modify(|list| {
                            list.ready = true;
                            list.error = Some(e.to_string());
                        });
                    }
                }
            }
            event = feed.recv(), if feed_open => match event {
                Some(change) => {
                    tracing::debug!(owner = %owner_id, ?change, "applying feed event");
                    view.send_modify(|list| list.apply(change));
                }
                // Feed gone; reconnection is the store client's concern.
                // Keep serving fetches and local signals until stopped.
                None => feed_open = false,
            },
            signal = added.recv(), if added_open => match signal {
                Some(()) => issue_fetch(&store, &owner_id, &fetch_tx, &mut fetch_seq),
                None => added_open = false,
            },
        }
    }
}

/// Starts a full fetch of the owner's bookmarks on the blocking pool,
/// superseding any fetch still in flight.
fn issue_fetch(
    store: &Arc<dyn BookmarkStore>,
    owner_id: &str,
    fetch_tx: &mpsc::UnboundedSender<FetchResult>,
    fetch_seq: &mut u64,
) {
    *fetch_seq += 1;
    let seq = *fetch_seq;
    let store = store.clone();
    let owner_id = owner_id.to_string();
    let tx = fetch_tx.clone();
    tokio::task::spawn_blocking(move || {
        let result = store.list(&owner_id);
        // Receiver gone means the synchronizer stopped; discard.
        let _ = tx.send((seq, result));
    });
}
