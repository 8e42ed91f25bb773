use serde::{Deserialize, Serialize};

/// A saved bookmark, as returned by the store.
///
/// `id` and `created_at` are assigned by the store at insert time and are
/// immutable afterwards. `created_at` is unix milliseconds and is the sole
/// sort key for list views (descending, newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub owner_id: String,
    pub created_at: i64,
}

/// Insert payload for a new bookmark.
///
/// `owner_id` comes from the authenticated session, never from form input —
/// see `store::OwnerScopedStore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub owner_id: String,
}
