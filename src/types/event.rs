use serde::{Deserialize, Serialize};

use crate::types::bookmark::Bookmark;

/// A single change-feed notification for one bookmark row.
///
/// Delivery order is not guaranteed to match mutation order at the store, and
/// the same event may be delivered more than once. Consumers must treat each
/// variant as idempotent (see `managers::list_synchronizer`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChangeEvent {
    /// A row was inserted; carries the full record.
    Inserted(Bookmark),
    /// A row was updated; carries the new version of the record.
    Updated(Bookmark),
    /// A row was deleted; only the id survives.
    Deleted { id: String },
}

/// Envelope broadcast by the store to all feed subscribers.
///
/// `owner_id` lets a subscription filter down to one owner's rows before
/// handing the event to the view.
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub owner_id: String,
    pub change: ChangeEvent,
}
