//! Bookmark row state.
//!
//! One rendered bookmark with its delete action. The row never removes
//! itself from the list: the store's `Deleted` feed event reaching the
//! synchronizer is the single source of list truth.

use chrono::DateTime;
use url::Url;

use crate::store::OwnerScopedStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::StoreError;

/// State behind one bookmark row.
pub struct BookmarkRow {
    bookmark: Bookmark,
    store: OwnerScopedStore,
    deleting: bool,
    error: Option<String>,
}

impl BookmarkRow {
    pub fn new(bookmark: Bookmark, store: OwnerScopedStore) -> Self {
        Self {
            bookmark,
            store,
            deleting: false,
            error: None,
        }
    }

    pub fn bookmark(&self) -> &Bookmark {
        &self.bookmark
    }

    /// True while a delete request is pending; the rendered button is
    /// disabled in this state.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Issues the delete for this row's bookmark.
    ///
    /// A no-op while a delete is already pending. On success the row stays
    /// in the pending state until the feed removes it from the view; on
    /// failure it re-enables with a user-visible message.
    pub fn delete(&mut self) -> Result<(), StoreError> {
        if self.deleting {
            return Ok(());
        }
        self.deleting = true;
        self.error = None;

        match self.store.delete(&self.bookmark.id) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!(id = %self.bookmark.id, error = %e, "bookmark delete failed");
                self.deleting = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// The bookmark's host with a leading `www.` stripped, or the raw URL if
    /// it does not parse.
    pub fn display_domain(&self) -> String {
        display_domain(&self.bookmark.url)
    }

    /// The creation date as e.g. `Jan 5, 2026`.
    pub fn display_date(&self) -> String {
        display_date(self.bookmark.created_at)
    }
}

/// Host of `url` minus a leading `www.`; falls back to the input when it is
/// not a parseable URL with a host.
pub fn display_domain(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
        Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
        None => url.to_string(),
    }
}

/// Formats a unix-millisecond timestamp as `Mon D, YYYY`.
pub fn display_date(created_at: i64) -> String {
    match DateTime::from_timestamp_millis(created_at) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => String::new(),
    }
}
