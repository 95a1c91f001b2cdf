//! Domain types returned by the Shopify Admin API client.
//!
//! These are decoupled from the GraphQL response shapes in `admin::queries`
//! so the rest of the crate never depends on wire details.

use serde::{Deserialize, Serialize};

/// Product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A product as seen by QR code enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product GID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// First image, if the product has media.
    pub featured_image: Option<Image>,
}

/// A product created through the Admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProduct {
    /// Product GID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Product status (`ACTIVE`, `DRAFT`, `ARCHIVED`).
    pub status: String,
    /// Default variant GID, if Shopify returned one.
    pub variant_id: Option<String>,
    /// Default variant price as a decimal string.
    pub price: Option<String>,
}
