//! Item domain types.

use chrono::{DateTime, Utc};

use curio_core::{ItemId, UserId};

/// A catalog item (domain type).
///
/// Every item carries the identity of its owner; the repository filters on
/// it for every read and mutation, so an `Item` handed to a view is always
/// one the requesting user owns.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Owner of this item, fixed at creation.
    pub owner: UserId,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}
