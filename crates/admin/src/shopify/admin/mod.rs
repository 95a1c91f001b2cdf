//! Shopify Admin API GraphQL client.
//!
//! [`AdminClient`] holds the shared HTTP client and API version. Calls are
//! made through a [`ShopAdminClient`], which binds the shared client to one
//! shop and its offline access token.

use std::sync::Arc;

use async_trait::async_trait;
use graphql_client::GraphQLQuery;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use qr_codes_core::ShopDomain;

use crate::config::ShopifyAdminConfig;
use crate::services::qr_codes::ProductCatalog;

use super::{
    AdminShopifyError, GraphQLError,
    types::{CatalogProduct, CreatedProduct, Image},
};

pub mod queries;

use queries::{
    QrCodeProduct, SampleProductCreate, VariantPriceUpdate, format_user_errors, qr_code_product,
};

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; shared across all requests.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    api_version: String,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("api_version", &self.inner.api_version)
            .finish_non_exhaustive()
    }
}

/// An [`AdminClient`] bound to one shop.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopAdminClient {
    client: AdminClient,
    shop: ShopDomain,
    access_token: Option<SecretString>,
}

impl std::fmt::Debug for ShopAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopAdminClient")
            .field("shop", &self.shop)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                api_version: config.api_version.clone(),
            }),
        }
    }

    /// Get the configured API version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// Bind this client to a shop.
    ///
    /// A missing token is not an error here: every call made through the
    /// returned client fails with [`AdminShopifyError::NoAccessToken`].
    #[must_use]
    pub fn for_shop(&self, shop: &ShopDomain, access_token: Option<SecretString>) -> ShopAdminClient {
        ShopAdminClient {
            client: self.clone(),
            shop: shop.clone(),
            access_token,
        }
    }
}

impl ShopAdminClient {
    /// The shop this client is bound to.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation against this shop.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let access_token = self
            .access_token
            .as_ref()
            .ok_or_else(|| AdminShopifyError::NoAccessToken(self.shop.to_string()))?;
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop,
            self.client.api_version()
        );

        let body = Q::build_query(variables);

        let response = self
            .client
            .inner
            .client
            .post(&endpoint)
            .header("X-Shopify-Access-Token", access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<Q::ResponseData> = response.json().await?;
        into_data(graphql_response)
    }

    // =========================================================================
    // Product methods
    // =========================================================================

    /// Get a product by ID.
    ///
    /// Returns `Ok(None)` when Shopify has no such product (deleted, or not
    /// visible to this app).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(shop = %self.shop, product_id = %id))]
    pub async fn get_product(&self, id: &str) -> Result<Option<CatalogProduct>, AdminShopifyError> {
        let variables = qr_code_product::Variables { id: id.to_string() };
        let response = self.execute::<QrCodeProduct>(variables).await?;
        Ok(response.product.map(convert_product))
    }

    /// Create a product with one default variant priced at `price`.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` if Shopify rejects the input,
    /// or another error if the request fails.
    #[instrument(skip(self), fields(shop = %self.shop))]
    pub async fn create_product(
        &self,
        title: &str,
        price: &str,
    ) -> Result<CreatedProduct, AdminShopifyError> {
        use queries::sample_product_create::{ProductCreateInput, Variables};

        let variables = Variables {
            product: ProductCreateInput {
                title: title.to_string(),
            },
        };

        let payload = self
            .execute::<SampleProductCreate>(variables)
            .await?
            .product_create
            .ok_or_else(|| AdminShopifyError::UserError("Product creation failed".to_string()))?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserError(format_user_errors(
                &payload.user_errors,
            )));
        }

        let product = payload
            .product
            .ok_or_else(|| AdminShopifyError::UserError("Product creation failed".to_string()))?;

        let mut created = CreatedProduct {
            id: product.id,
            title: product.title,
            handle: product.handle,
            status: product.status,
            variant_id: None,
            price: None,
        };

        if let Some(variant) = product.variants.nodes.into_iter().next() {
            created.price = Some(self.set_variant_price(&created.id, &variant.id, price).await?);
            created.variant_id = Some(variant.id);
        }

        tracing::info!(product_id = %created.id, "Created product");
        Ok(created)
    }

    /// Set a single variant's price, returning the price Shopify stored.
    async fn set_variant_price(
        &self,
        product_id: &str,
        variant_id: &str,
        price: &str,
    ) -> Result<String, AdminShopifyError> {
        use queries::variant_price_update::{VariantInput, Variables};

        let variables = Variables {
            product_id: product_id.to_string(),
            variants: vec![VariantInput {
                id: variant_id.to_string(),
                price: price.to_string(),
            }],
        };

        let payload = self
            .execute::<VariantPriceUpdate>(variables)
            .await?
            .product_variants_bulk_update
            .ok_or_else(|| AdminShopifyError::UserError("Variant update failed".to_string()))?;

        if !payload.user_errors.is_empty() {
            return Err(AdminShopifyError::UserError(format_user_errors(
                &payload.user_errors,
            )));
        }

        Ok(payload
            .product_variants
            .and_then(|variants| variants.into_iter().next())
            .map_or_else(|| price.to_string(), |v| v.price))
    }
}

#[async_trait]
impl ProductCatalog for ShopAdminClient {
    async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, AdminShopifyError> {
        self.get_product(id).await
    }
}

/// Unwrap a GraphQL response into its data, converting GraphQL errors.
fn into_data<T>(response: GraphQLResponse<T>) -> Result<T, AdminShopifyError> {
    if let Some(errors) = response.errors
        && !errors.is_empty()
    {
        return Err(AdminShopifyError::GraphQL(errors));
    }

    response
        .data
        .ok_or_else(|| AdminShopifyError::GraphQL(vec![GraphQLError::new("No data in response")]))
}

fn convert_product(product: qr_code_product::Product) -> CatalogProduct {
    CatalogProduct {
        id: product.id,
        title: product.title,
        handle: product.handle,
        featured_image: product
            .featured_media
            .and_then(|m| m.preview)
            .and_then(|p| p.image)
            .map(|i| Image {
                url: i.url,
                alt_text: i.alt_text,
            }),
    }
}
