//! CLI command implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
}

/// Get the database URL with fallback to generic `DATABASE_URL`.
pub fn database_url_from_env() -> Result<SecretString, EnvError> {
    if let Ok(value) = std::env::var("CURIO_DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(EnvError::MissingEnvVar("CURIO_DATABASE_URL"))
}
