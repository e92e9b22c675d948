//! Authentication service.
//!
//! Registration and password login over the credential store.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use curio_core::Username;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Authentication service.
///
/// Handles user registration and credential verification. Session
/// establishment lives at the route/middleware layer; this service only
/// answers "who are these credentials".
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// The password is hashed with Argon2id (fresh salt per call) before it
    /// reaches the store; the plaintext is never persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username format is invalid.
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Verify a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown username, a
    /// malformed username, and a wrong password alike - the caller cannot
    /// tell which it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        // A username that can't exist is the same as one that doesn't.
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn get_user(
        &self,
        user_id: curio_core::UserId,
    ) -> Result<Option<User>, AuthError> {
        Ok(self.users.get_by_id(user_id).await?)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let registered = auth.register("alice", "pw1").await.unwrap();
        let logged_in = auth.login("alice", "pw1").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_taken() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "pw1").await.unwrap();
        let err = auth.register("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));

        // The original credentials still work.
        assert!(auth.login("alice", "pw1").await.is_ok());
        assert!(matches!(
            auth.login("alice", "pw2").await.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_identical() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "pw1").await.unwrap();

        let unknown = auth.login("nobody", "anything").await.unwrap_err();
        let wrong = auth.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_invalid_username_rejected_at_registration() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let err = auth.register("", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUsername(_)));

        // At login the same input is just a failed credential check.
        let err = auth.login("", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);

        assert!(verify_password("same-password", &a).is_ok());
        assert!(verify_password("other-password", &a).is_err());
    }
}
