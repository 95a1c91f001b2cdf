//! QR code inspection commands.

use thiserror::Error;

use qr_codes_admin::db::{PgQrCodeStore, QrCodeStore, RepositoryError};
use qr_codes_core::{ShopDomain, ShopDomainError};

use super::ConnectError;

#[derive(Debug, Error)]
pub enum QrCodesError {
    #[error("Invalid shop domain: {0}")]
    InvalidShop(#[from] ShopDomainError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

/// Print a shop's QR codes, newest first.
///
/// # Errors
///
/// Returns an error if the shop domain is invalid or the query fails.
pub async fn list(shop: &str) -> Result<(), QrCodesError> {
    let shop = ShopDomain::parse(shop)?;

    let pool = super::connect().await?;
    let codes = PgQrCodeStore::new(pool).list(&shop).await?;

    #[allow(clippy::print_stdout)]
    {
        if codes.is_empty() {
            println!("No QR codes for {shop}");
        }
        for code in &codes {
            println!(
                "{:>6}  {:<8}  {:>6} scans  {}  {}",
                code.id,
                code.destination.as_str(),
                code.scans,
                code.created_at.format("%Y-%m-%d"),
                code.title,
            );
        }
    }

    Ok(())
}
