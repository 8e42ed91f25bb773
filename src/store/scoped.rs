//! Owner-scoped store handle.
//!
//! View code (form, rows) never supplies an owner id. An [`OwnerScopedStore`]
//! is created from a resolved session and injects the owner on every write,
//! mirroring a row-level-security policy at the store boundary rather than
//! trusting client-side assignment.

use std::sync::Arc;

use crate::auth::Session;
use crate::store::{BookmarkStore, FeedSubscription};
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;

/// Per-session store handle scoped to one owner.
#[derive(Clone)]
pub struct OwnerScopedStore {
    inner: Arc<dyn BookmarkStore>,
    owner_id: String,
}

impl OwnerScopedStore {
    /// Scopes a store to the session's user. The owner id is taken from the
    /// verified session only.
    pub fn new(inner: Arc<dyn BookmarkStore>, session: &Session) -> Self {
        Self {
            inner,
            owner_id: session.user_id.clone(),
        }
    }

    /// The owner this handle is scoped to.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Inserts a bookmark owned by this scope's user.
    pub fn insert(&self, title: &str, url: &str) -> Result<Bookmark, StoreError> {
        self.inner.insert(&NewBookmark {
            title: title.to_string(),
            url: url.to_string(),
            owner_id: self.owner_id.clone(),
        })
    }

    /// Lists this owner's bookmarks, newest first.
    pub fn list(&self) -> Result<Vec<Bookmark>, StoreError> {
        self.inner.list(&self.owner_id)
    }

    /// Deletes one of this owner's bookmarks by ID.
    ///
    /// A row belonging to another owner is reported as `NotFound` — the
    /// scope does not reveal foreign rows.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let owned = self
            .list()?
            .iter()
            .any(|bookmark| bookmark.id == id);
        if !owned {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.inner.delete_by_id(id)
    }

    /// Opens a change feed for this owner's bookmarks.
    pub fn subscribe(&self) -> FeedSubscription {
        self.inner.subscribe(&self.owner_id)
    }
}
