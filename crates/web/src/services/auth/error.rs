//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] curio_core::UsernameError),

    /// Invalid credentials (wrong password or user not found).
    ///
    /// The two cases are deliberately indistinguishable so that login
    /// failures cannot be used to enumerate usernames.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already taken.
    #[error("username already taken")]
    UsernameTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
