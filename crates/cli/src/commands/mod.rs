//! CLI command implementations.

pub mod admin;
pub mod init;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Persistence gateway error.
    #[error("Store error: {0}")]
    Store(#[from] bistro_api::db::StoreError),

    /// Could not read a seed file.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Could not parse a seed file.
    #[error("Failed to parse {path}: {source}")]
    ParseFile {
        path: String,
        source: serde_json::Error,
    },

    /// No user registered under the given email.
    #[error("No user registered with email: {0}")]
    UnknownUser(String),
}

/// Connect to the database named by the environment.
///
/// Honors `BISTRO_DATABASE_URL` with a `DATABASE_URL` fallback, the same
/// convention the API uses.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("BISTRO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("BISTRO_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = bistro_api::db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
