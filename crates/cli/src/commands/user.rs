//! User provisioning command.
//!
//! A one-shot interactive prompt producing a single user record, for
//! provisioning accounts without going through the web signup flow.
//!
//! # Usage
//!
//! ```bash
//! curio-cli user create
//! ```
//!
//! # Environment Variables
//!
//! - `CURIO_DATABASE_URL` - `SQLite` connection string (falls back to `DATABASE_URL`)

use dialoguer::{Input, Password};
use thiserror::Error;

use curio_web::services::auth::{AuthError, AuthService};

use super::{EnvError, database_url_from_env};

/// Errors that can occur during user provisioning.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error(transparent)]
    Env(#[from] EnvError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Interactive prompt failed (e.g. no TTY).
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// User already exists.
    #[error("User already exists with username: {0}")]
    UserExists(String),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Authentication-layer error.
    #[error("Auth error: {0}")]
    Auth(AuthError),
}

/// Create a new user from an interactive prompt.
///
/// The password goes through the same Argon2id hashing as the web signup
/// flow; the migrations must have been applied first.
///
/// # Errors
///
/// Returns `UserError` if the prompt fails, the username is taken or
/// invalid, or the store is unreachable.
pub async fn create() -> Result<(), UserError> {
    dotenvy::dotenv().ok();

    let database_url = database_url_from_env()?;

    tracing::info!("Connecting to database...");
    let pool = curio_web::db::create_pool(&database_url).await?;

    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let auth = AuthService::new(&pool);
    let user = match auth.register(&username, &password).await {
        Ok(user) => user,
        Err(AuthError::UsernameTaken) => return Err(UserError::UserExists(username)),
        Err(AuthError::InvalidUsername(e)) => {
            return Err(UserError::InvalidUsername(e.to_string()));
        }
        Err(e) => return Err(UserError::Auth(e)),
    };

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );

    Ok(())
}
