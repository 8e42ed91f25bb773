//! SQLite-backed bookmark store.
//!
//! Implements [`BookmarkStore`] over the shared [`Database`] connection and
//! publishes every successful mutation on a broadcast channel that backs the
//! change feed. Stands in for the managed backend the application would talk
//! to in production.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::store::{BookmarkStore, FeedSubscription};
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;
use crate::types::event::{ChangeEvent, FeedEvent};

/// Feed buffer size. A slow subscriber past this many undelivered events
/// observes a lag and skips ahead.
const FEED_CAPACITY: usize = 256;

/// Bookmark store backed by SQLite, with an in-process change feed.
pub struct SqliteStore {
    db: Arc<Database>,
    feed: broadcast::Sender<FeedEvent>,
    last_ts: AtomicI64,
}

impl SqliteStore {
    /// Creates a store over the given database.
    pub fn new(db: Arc<Database>) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            db,
            feed,
            last_ts: AtomicI64::new(0),
        }
    }

    /// Assigns a creation timestamp in unix milliseconds.
    ///
    /// Strictly monotonic per store instance, so `created_at` is a total
    /// order and the sole sort key never ties.
    fn next_created_at(&self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        let mut prev = self.last_ts.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.last_ts.compare_exchange_weak(
                prev,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(observed) => prev = observed,
            }
        }
    }

    /// Publishes a feed event. A send error only means no subscriber is
    /// currently listening, which is fine.
    fn publish(&self, owner_id: &str, change: ChangeEvent) {
        let _ = self.feed.send(FeedEvent {
            owner_id: owner_id.to_string(),
            change,
        });
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl BookmarkStore for SqliteStore {
    /// Inserts a new bookmark, assigning `id` and `created_at`, and emits an
    /// `Inserted` event on the feed.
    fn insert(&self, record: &NewBookmark) -> Result<Bookmark, StoreError> {
        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            title: record.title.clone(),
            url: record.url.clone(),
            owner_id: record.owner_id.clone(),
            created_at: self.next_created_at(),
        };

        self.db
            .connection()
            .execute(
                "INSERT INTO bookmarks (id, owner_id, title, url, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    bookmark.id,
                    bookmark.owner_id,
                    bookmark.title,
                    bookmark.url,
                    bookmark.created_at
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(id = %bookmark.id, owner = %bookmark.owner_id, "bookmark inserted");
        self.publish(&record.owner_id, ChangeEvent::Inserted(bookmark.clone()));
        Ok(bookmark)
    }

    /// Lists one owner's bookmarks, newest first.
    fn list(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, owner_id, title, url, created_at \
                 FROM bookmarks WHERE owner_id = ?1 ORDER BY created_at DESC",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner_id], Self::row_to_bookmark)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(results)
    }

    /// Deletes a bookmark by ID and emits a `Deleted` event on the feed.
    fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        // Read the owner first so the feed event can be scoped.
        let owner_id: String = {
            let conn = self.db.connection();
            match conn.query_row(
                "SELECT owner_id FROM bookmarks WHERE id = ?1",
                params![id],
                |row| row.get(0),
            ) {
                Ok(owner) => owner,
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    return Err(StoreError::NotFound(id.to_string()))
                }
                Err(e) => return Err(StoreError::Database(e.to_string())),
            }
        };

        let affected = self
            .db
            .connection()
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        tracing::debug!(id = %id, owner = %owner_id, "bookmark deleted");
        self.publish(
            &owner_id,
            ChangeEvent::Deleted { id: id.to_string() },
        );
        Ok(())
    }

    /// Opens a change feed filtered to one owner.
    fn subscribe(&self, owner_id: &str) -> FeedSubscription {
        FeedSubscription::new(owner_id, self.feed.subscribe())
    }
}
