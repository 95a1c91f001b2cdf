//! Database migration commands.
//!
//! Migrations live in `crates/admin/migrations/` and are embedded into the
//! binary at compile time. They are never run on server startup.
//!
//! ```bash
//! qr-cli migrate
//! ```

use thiserror::Error;

use super::ConnectError;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn admin() -> Result<(), MigrationError> {
    let pool = super::connect().await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;
    tracing::info!("Admin migrations complete");

    Ok(())
}
