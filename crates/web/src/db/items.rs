//! Item repository.
//!
//! Every method takes the caller's resolved identity and conditions each
//! query on both the item id and the owner id. A row that exists under a
//! different owner is reported as absence, never as a permission error, so
//! the existence of other users' items is never revealed.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use curio_core::{ItemId, UserId};

use super::RepositoryError;
use crate::models::item::Item;

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    user_id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Self {
            id: ItemId::new(r.id),
            owner: UserId::new(r.user_id),
            name: r.name,
            description: r.description,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all items belonging to `owner`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM item
            WHERE user_id = ?
            ORDER BY id ASC
            ",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Create a new item owned by `owner`.
    ///
    /// The owner always comes from the resolved identity, never from client
    /// input. Empty name/description strings are valid.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> Result<Item, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ItemRow>(
            r"
            INSERT INTO item (user_id, name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, name, description, created_at, updated_at
            ",
        )
        .bind(owner)
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a single item for editing, filtered by owner.
    ///
    /// Returns `None` both when the id does not exist and when it exists
    /// under a different owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_edit(
        &self,
        owner: UserId,
        item_id: ItemId,
    ) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM item
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(item_id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Replace an item's name and description, filtered by owner.
    ///
    /// The ownership filter is part of the `UPDATE` itself; a non-owned or
    /// missing id affects zero rows and is reported as `NotFound`, never as
    /// a partial update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned row matches.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        owner: UserId,
        item_id: ItemId,
        name: &str,
        description: &str,
    ) -> Result<(), RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            UPDATE item
            SET name = ?, description = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(item_id)
        .bind(owner)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an item, filtered by owner.
    ///
    /// Idempotent: deleting a missing or non-owned id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, owner: UserId, item_id: ItemId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM item
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(item_id)
        .bind(owner)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::UserRepository;
    use crate::db::test_support::memory_pool;
    use curio_core::Username;

    async fn seed_user(pool: &SqlitePool, name: &str) -> UserId {
        let username = Username::parse(name).unwrap();
        UserRepository::new(pool)
            .create(&username, "hash")
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_and_insertion_ordered() {
        let pool = memory_pool().await;
        let repo = ItemRepository::new(&pool);
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;

        repo.create(alice, "first", "a").await.unwrap();
        repo.create(bob, "intruder", "b").await.unwrap();
        repo.create(alice, "second", "c").await.unwrap();

        let items = repo.list_for_owner(alice).await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert!(items.iter().all(|i| i.owner == alice));
    }

    #[tokio::test]
    async fn test_empty_fields_are_valid() {
        let pool = memory_pool().await;
        let repo = ItemRepository::new(&pool);
        let alice = seed_user(&pool, "alice").await;

        let item = repo.create(alice, "", "").await.unwrap();
        assert_eq!(item.name, "");
        assert_eq!(item.description, "");
    }

    #[tokio::test]
    async fn test_get_for_edit_hides_other_owners() {
        let pool = memory_pool().await;
        let repo = ItemRepository::new(&pool);
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;

        let item = repo.create(alice, "book", "a good one").await.unwrap();

        assert!(repo.get_for_edit(alice, item.id).await.unwrap().is_some());
        // Indistinguishable from a missing id.
        assert!(repo.get_for_edit(bob, item.id).await.unwrap().is_none());
        assert!(
            repo.get_for_edit(alice, ItemId::new(9999))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_requires_ownership() {
        let pool = memory_pool().await;
        let repo = ItemRepository::new(&pool);
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;

        let item = repo.create(alice, "book", "a good one").await.unwrap();

        let err = repo.update(bob, item.id, "stolen", "x").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        // The item is unchanged afterward.
        let unchanged = repo.get_for_edit(alice, item.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "book");
        assert_eq!(unchanged.description, "a good one");

        repo.update(alice, item.id, "book II", "even better")
            .await
            .unwrap();
        let updated = repo.get_for_edit(alice, item.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "book II");
        assert_eq!(updated.owner, alice);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_owner_scoped() {
        let pool = memory_pool().await;
        let repo = ItemRepository::new(&pool);
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;

        let item = repo.create(alice, "book", "a good one").await.unwrap();

        // Someone else's delete is a silent no-op.
        repo.delete(bob, item.id).await.unwrap();
        assert_eq!(repo.list_for_owner(alice).await.unwrap().len(), 1);

        repo.delete(alice, item.id).await.unwrap();
        assert!(repo.list_for_owner(alice).await.unwrap().is_empty());

        // Deleting again is not an error.
        repo.delete(alice, item.id).await.unwrap();
    }
}
