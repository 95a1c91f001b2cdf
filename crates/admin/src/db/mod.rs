//! Database operations for the admin `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `admin.qr_code` - QR codes, one row per code, scoped by shop
//! - `admin.shopify_token` - Offline Admin API access tokens, one per shop
//! - `admin.session` - Session storage (managed by `tower-sessions`)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p qr-codes-cli -- migrate
//! ```

pub mod memory;
pub mod qr_codes;
pub mod shopify;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryQrCodeStore;
pub use qr_codes::{PgQrCodeStore, QrCodeStore};
pub use shopify::{ShopifyToken, ShopifyTokenRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
