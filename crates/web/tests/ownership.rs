//! End-to-end ownership scenario over the credential store, auth service,
//! and item repository, against a fresh in-memory database.

#![allow(clippy::unwrap_used)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use curio_web::db::{ItemRepository, RepositoryError, UserRepository};
use curio_web::services::auth::{AuthError, AuthService};

/// A fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same `:memory:` database.
async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

#[tokio::test]
async fn register_login_and_ownership_scenario() {
    let pool = memory_pool().await;
    let auth = AuthService::new(&pool);
    let items = ItemRepository::new(&pool);

    // Register "alice"/"pw1" - succeeds.
    let alice = auth.register("alice", "pw1").await.unwrap();

    // Register "alice"/"pw2" - already taken, original record untouched.
    assert!(matches!(
        auth.register("alice", "pw2").await.unwrap_err(),
        AuthError::UsernameTaken
    ));

    // Login "alice"/"pw2" - rejected.
    assert!(matches!(
        auth.login("alice", "pw2").await.unwrap_err(),
        AuthError::InvalidCredentials
    ));

    // Login "alice"/"pw1" - resolves the same identity.
    let logged_in = auth.login("alice", "pw1").await.unwrap();
    assert_eq!(logged_in.id, alice.id);

    // Create an item as alice.
    let book = items.create(alice.id, "book", "a good one").await.unwrap();

    let listed = items.list_for_owner(alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().unwrap().name, "book");

    // A separate account.
    let bob = auth.register("bob", "pw3").await.unwrap();

    // Bob cannot see alice's item; it looks like it doesn't exist.
    assert!(items.get_for_edit(bob.id, book.id).await.unwrap().is_none());

    // Bob's update is reported as absence and changes nothing.
    assert!(matches!(
        items.update(bob.id, book.id, "mine now", "x").await.unwrap_err(),
        RepositoryError::NotFound
    ));

    // Bob's delete is a silent no-op.
    items.delete(bob.id, book.id).await.unwrap();

    // Alice still has her item, unchanged.
    let listed = items.list_for_owner(alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    let survivor = listed.first().unwrap();
    assert_eq!(survivor.id, book.id);
    assert_eq!(survivor.name, "book");
    assert_eq!(survivor.description, "a good one");

    // Bob sees only his own (empty) list.
    assert!(items.list_for_owner(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_never_leaks_across_owners() {
    let pool = memory_pool().await;
    let auth = AuthService::new(&pool);
    let items = ItemRepository::new(&pool);

    let alice = auth.register("alice", "pw").await.unwrap();
    let bob = auth.register("bob", "pw").await.unwrap();

    for i in 0..5 {
        items
            .create(alice.id, &format!("a{i}"), "")
            .await
            .unwrap();
        items.create(bob.id, &format!("b{i}"), "").await.unwrap();
    }

    let alices = items.list_for_owner(alice.id).await.unwrap();
    assert_eq!(alices.len(), 5);
    assert!(alices.iter().all(|i| i.owner == alice.id));

    let bobs = items.list_for_owner(bob.id).await.unwrap();
    assert_eq!(bobs.len(), 5);
    assert!(bobs.iter().all(|i| i.owner == bob.id));
}

#[tokio::test]
async fn stale_identity_resolves_to_nothing() {
    let pool = memory_pool().await;
    let auth = AuthService::new(&pool);

    let alice = auth.register("alice", "pw").await.unwrap();
    assert!(auth.get_user(alice.id).await.unwrap().is_some());

    // Simulate an out-of-band account removal; a session bound to this id
    // must now resolve exactly like an invalid one.
    sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(alice.id.as_i64())
        .execute(&pool)
        .await
        .unwrap();

    assert!(auth.get_user(alice.id).await.unwrap().is_none());

    let repo = UserRepository::new(&pool);
    assert!(repo.get_by_id(alice.id).await.unwrap().is_none());
}
