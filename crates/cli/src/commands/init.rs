//! One-shot schema creation.
//!
//! Deliberately not a migration framework: the statements are idempotent
//! (`IF NOT EXISTS`) and describe the whole schema in one place.

use super::CliError;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id uuid PRIMARY KEY,
        email text NOT NULL UNIQUE,
        name text NOT NULL,
        role text,
        created_at timestamptz NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS menu (
        id uuid PRIMARY KEY,
        name text NOT NULL,
        category text NOT NULL,
        price numeric(10, 2) NOT NULL,
        recipe text NOT NULL,
        image text NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS reviews (
        id uuid PRIMARY KEY,
        name text NOT NULL,
        details text NOT NULL,
        rating double precision NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS carts (
        id uuid PRIMARY KEY,
        email text NOT NULL,
        menu_item_id uuid NOT NULL,
        name text NOT NULL,
        image text NOT NULL,
        price numeric(10, 2) NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS carts_email_idx ON carts (email)",
    "CREATE TABLE IF NOT EXISTS payments (
        id uuid PRIMARY KEY,
        email text NOT NULL,
        total_amount numeric(10, 2) NOT NULL,
        cart_item_ids uuid[] NOT NULL,
        menu_item_ids uuid[] NOT NULL,
        created_at timestamptz NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS payments_email_idx ON payments (email)",
];

/// Create every table and index.
///
/// # Errors
///
/// Returns `CliError` if the connection or any statement fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    tracing::info!("Schema is up to date ({} statements)", SCHEMA.len());
    Ok(())
}
