//! Shop connection management.
//!
//! The admin app reads each shop's offline Admin API access token from
//! `admin.shopify_token`. These commands write and remove that row.
//!
//! ```bash
//! qr-cli shop connect -s your-store.myshopify.com -t shpat_...
//! SHOPIFY_ACCESS_TOKEN=shpat_... qr-cli shop connect -s your-store.myshopify.com
//! qr-cli shop disconnect -s your-store.myshopify.com
//! ```

use thiserror::Error;

use qr_codes_admin::config::{ConfigError, validate_secret_strength};
use qr_codes_admin::db::{RepositoryError, ShopifyTokenRepository};
use qr_codes_core::{ShopDomain, ShopDomainError};

use super::ConnectError;

/// Environment variable read when `--token` is not given.
const TOKEN_ENV_VAR: &str = "SHOPIFY_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Invalid shop domain: {0}")]
    InvalidShop(#[from] ShopDomainError),

    #[error("No access token given; pass --token or set {TOKEN_ENV_VAR}")]
    MissingToken,

    #[error("Rejected access token: {0}")]
    InvalidToken(#[from] ConfigError),

    #[error("No scopes given")]
    MissingScopes,

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

/// Store (or replace) a shop's access token.
///
/// # Errors
///
/// Returns an error if the shop, token or scopes are invalid, or the
/// database write fails.
pub async fn connect(shop: &str, token: Option<String>, scopes: &str) -> Result<(), ShopError> {
    let shop = ShopDomain::parse(shop)?;
    let token = token
        .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
        .filter(|t| !t.is_empty())
        .ok_or(ShopError::MissingToken)?;
    validate_secret_strength(&token, TOKEN_ENV_VAR)?;
    let scopes = split_scopes(scopes);
    if scopes.is_empty() {
        return Err(ShopError::MissingScopes);
    }

    let pool = super::connect().await?;
    ShopifyTokenRepository::new(&pool)
        .save(&shop, &token, &scopes)
        .await?;

    tracing::info!(%shop, scopes = %scopes.join(","), "Shop connected");
    Ok(())
}

/// Remove a shop's access token.
///
/// # Errors
///
/// Returns an error if the shop domain is invalid or the database delete fails.
pub async fn disconnect(shop: &str) -> Result<(), ShopError> {
    let shop = ShopDomain::parse(shop)?;

    let pool = super::connect().await?;
    if ShopifyTokenRepository::new(&pool).delete(&shop).await? {
        tracing::info!(%shop, "Shop disconnected");
    } else {
        tracing::warn!(%shop, "Shop had no stored access token");
    }

    Ok(())
}

fn split_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
