//! Bookmark store capability surface.
//!
//! [`BookmarkStore`] is the boundary the rest of the application talks to:
//! create, list, delete bookmark records, plus a push-based change feed
//! scoped to one owner. The in-process implementation is [`SqliteStore`];
//! view code goes through [`OwnerScopedStore`], which injects the owner from
//! the authenticated session.

pub mod scoped;
pub mod sqlite;

pub use scoped::OwnerScopedStore;
pub use sqlite::SqliteStore;

use tokio::sync::broadcast;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;
use crate::types::event::{ChangeEvent, FeedEvent};

/// Capability surface for bookmark storage and its change feed.
///
/// `list` returns one owner's rows ordered by `created_at` descending. The
/// subscription returned by `subscribe` delivers insert/update/delete events
/// for that owner only; dropping it releases the feed.
pub trait BookmarkStore: Send + Sync {
    fn insert(&self, record: &NewBookmark) -> Result<Bookmark, StoreError>;
    fn list(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError>;
    fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
    fn subscribe(&self, owner_id: &str) -> FeedSubscription;
}

/// A live change feed filtered to one owner's bookmarks.
///
/// Wraps a broadcast receiver; events for other owners are skipped before
/// they reach the caller. Dropping the subscription unsubscribes.
pub struct FeedSubscription {
    owner_id: String,
    rx: broadcast::Receiver<FeedEvent>,
}

impl FeedSubscription {
    /// Creates a subscription over a store's broadcast feed. Store
    /// implementations call this from `subscribe`.
    pub fn new(owner_id: &str, rx: broadcast::Receiver<FeedEvent>) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            rx,
        }
    }

    /// Receives the next change event for this owner.
    ///
    /// Returns `None` once the store side of the feed is gone. A lagged
    /// receiver skips the missed messages and keeps going — recovering the
    /// gap is a fresh synchronizer start, not the feed's job.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.owner_id == self.owner_id => return Some(event.change),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "change feed lagged; events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
