//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use qr_codes_core::ShopDomain;

use crate::config::AdminConfig;
use crate::db::{QrCodeStore, RepositoryError, ShopifyTokenRepository};
use crate::services::QrCodeManager;
use crate::shopify::{AdminClient, ShopAdminClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    shopify: AdminClient,
    qr_codes: QrCodeManager,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Admin configuration
    /// * `pool` - `PostgreSQL` connection pool (sessions and access tokens)
    /// * `store` - QR code storage
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool, store: Arc<dyn QrCodeStore>) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        let qr_codes = QrCodeManager::new(store, config.base_url.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                shopify,
                qr_codes,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the shared Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Get a reference to the QR code lifecycle manager.
    #[must_use]
    pub fn qr_codes(&self) -> &QrCodeManager {
        &self.inner.qr_codes
    }

    /// A Shopify client bound to `shop` and its stored access token.
    ///
    /// A shop without a token still gets a client; its calls fail with
    /// `AdminShopifyError::NoAccessToken`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the token lookup fails.
    pub async fn shopify_for(&self, shop: &ShopDomain) -> Result<ShopAdminClient, RepositoryError> {
        let token = ShopifyTokenRepository::new(self.pool())
            .get_by_shop(shop)
            .await?;

        if token.is_none() {
            tracing::debug!(%shop, "No Shopify access token stored");
        }

        Ok(self
            .shopify()
            .for_shop(shop, token.map(|t| t.access_token)))
    }
}
