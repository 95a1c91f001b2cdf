//! Shopify access token repository.
//!
//! Stores one offline Admin API access token per shop. Tokens are written
//! by `qr-cli shop connect` and read on each request that needs the catalog.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use sqlx::PgPool;

use qr_codes_core::ShopDomain;

use super::RepositoryError;

// =============================================================================
// Types
// =============================================================================

/// A shop's Admin API access token.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyToken {
    /// Shop domain (e.g., your-store.myshopify.com).
    pub shop: ShopDomain,
    /// Offline access token (redacted in debug output).
    pub access_token: SecretString,
    /// Granted scopes.
    pub scopes: Vec<String>,
    /// When the token was last stored.
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for ShopifyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyToken")
            .field("shop", &self.shop)
            .field("access_token", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Internal row type for `PostgreSQL` queries.
#[derive(Debug, sqlx::FromRow)]
struct ShopifyTokenRow {
    shop: ShopDomain,
    access_token: String,
    scope: String,
    updated_at: DateTime<Utc>,
}

impl From<ShopifyTokenRow> for ShopifyToken {
    fn from(row: ShopifyTokenRow) -> Self {
        Self {
            shop: row.shop,
            access_token: SecretString::from(row.access_token),
            scopes: parse_scopes(&row.scope),
            updated_at: row.updated_at,
        }
    }
}

/// Split a comma-separated scope list, dropping blanks.
fn parse_scopes(scope: &str) -> Vec<String> {
    scope
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for Shopify access token database operations.
pub struct ShopifyTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopifyTokenRepository<'a> {
    /// Create a new Shopify token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the token for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_shop(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<ShopifyToken>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopifyTokenRow>(
            r"
            SELECT shop, access_token, scope, updated_at
            FROM admin.shopify_token
            WHERE shop = $1
            ",
        )
        .bind(shop)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ShopifyToken::from))
    }

    /// Save or replace the token for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn save(
        &self,
        shop: &ShopDomain,
        access_token: &str,
        scopes: &[String],
    ) -> Result<(), RepositoryError> {
        let scope = scopes.join(",");

        sqlx::query(
            r"
            INSERT INTO admin.shopify_token (shop, access_token, scope)
            VALUES ($1, $2, $3)
            ON CONFLICT(shop) DO UPDATE SET
                access_token = EXCLUDED.access_token,
                scope = EXCLUDED.scope,
                updated_at = now()
            ",
        )
        .bind(shop)
        .bind(access_token)
        .bind(scope)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete the token for a shop.
    ///
    /// Returns whether a token was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, shop: &ShopDomain) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM admin.shopify_token WHERE shop = $1")
            .bind(shop)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scopes() {
        assert_eq!(
            parse_scopes("read_products, write_products,,"),
            vec!["read_products", "write_products"]
        );
        assert!(parse_scopes("").is_empty());
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = ShopifyToken {
            shop: ShopDomain::parse("store.myshopify.com").unwrap(),
            access_token: SecretString::from("shpat_super_secret"),
            scopes: vec!["read_products".to_string()],
            updated_at: Utc::now(),
        };
        let debug_output = format!("{token:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_super_secret"));
    }
}
