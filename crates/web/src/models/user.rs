//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use curio_core::{UserId, Username};

/// An account (domain type).
///
/// The password hash never leaves the credential store; verification happens
/// inside the auth service.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Account username (unique, case-sensitive).
    pub username: Username,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
