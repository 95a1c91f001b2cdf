//! Shopify Admin API client.
//!
//! # Security
//!
//! Every call is made with a shop's offline Admin API access token. Tokens
//! live in `admin.shopify_token` and are loaded per request for the
//! authenticated shop; the client itself is shop-agnostic.
//!
//! # Architecture
//!
//! - Uses `graphql-client` request/response shapes for GraphQL operations
//! - Direct API calls to Shopify (no local product sync)
//! - Rate limiting surfaces as [`AdminShopifyError::RateLimited`]
//!
//! # Example
//!
//! ```rust,ignore
//! use qr_codes_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify);
//! let shop_client = client.for_shop(&shop, Some(token));
//!
//! // Look up a product referenced by a QR code
//! let product = shop_client.get_product("gid://shopify/Product/123").await?;
//! ```

mod admin;
pub mod types;

pub use admin::{AdminClient, ShopAdminClient};
pub use types::*;

use serde::Deserialize;
use thiserror::Error;

/// Failures talking to the Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL errors: {}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP 429; the payload is the `Retry-After` delay in seconds.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The stored token was rejected (revoked or missing scopes).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A mutation returned `userErrors`.
    #[error("User error: {0}")]
    UserError(String),

    /// The shop has never been connected with `qr-cli shop connect`.
    #[error("No access token for shop {0}")]
    NoAccessToken(String),
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    /// Response path the error applies to, when Shopify reports one.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
