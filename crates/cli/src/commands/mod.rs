//! CLI subcommand implementations.

pub mod migrate;
pub mod qr_codes;
pub mod shop;

use secrecy::ExposeSecret;
use sqlx::PgPool;

use qr_codes_admin::config::{ConfigError, get_database_url};

/// Connect to the admin database named by `ADMIN_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<PgPool, ConnectError> {
    dotenvy::dotenv().ok();

    let database_url = get_database_url("ADMIN_DATABASE_URL")?;
    tracing::info!("Connecting to admin database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;
    Ok(pool)
}

/// Errors that can occur while opening the database connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
