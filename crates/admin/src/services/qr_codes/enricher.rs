//! Read-time product enrichment.
//!
//! A stored QR code keeps only the product GID and handle. Titles and images
//! are looked up from the catalog on every read and never written back, so a
//! product that is renamed or deleted in Shopify shows up that way
//! immediately.

use async_trait::async_trait;

use crate::models::{ProductSummary, QrCode};
use crate::shopify::{AdminShopifyError, CatalogProduct};

/// Id-keyed product lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Look up a product by GID, `Ok(None)` if the catalog has no such product.
    async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, AdminShopifyError>;
}

/// Attach current product details to a QR code.
///
/// Never fails: a product the catalog no longer returns, or a lookup that
/// errors, yields `deleted = true` with the stored handle as the title.
pub async fn enrich(catalog: &dyn ProductCatalog, qr_code: &QrCode) -> ProductSummary {
    match catalog.product(&qr_code.product_id).await {
        Ok(Some(product)) => found(product),
        Ok(None) => missing(qr_code),
        Err(AdminShopifyError::NoAccessToken(shop)) => {
            tracing::debug!(%shop, qr_code_id = %qr_code.id, "No access token, skipping enrichment");
            missing(qr_code)
        }
        Err(e) => {
            tracing::warn!(
                qr_code_id = %qr_code.id,
                product_id = %qr_code.product_id,
                error = %e,
                "Product lookup failed"
            );
            missing(qr_code)
        }
    }
}

fn found(product: CatalogProduct) -> ProductSummary {
    let (image, alt) = product
        .featured_image
        .map_or((None, String::new()), |image| {
            (Some(image.url), image.alt_text.unwrap_or_default())
        });

    ProductSummary {
        title: product.title,
        image,
        alt,
        deleted: false,
    }
}

fn missing(qr_code: &QrCode) -> ProductSummary {
    let title = if qr_code.product_handle.is_empty() {
        qr_code.title.clone()
    } else {
        qr_code.product_handle.clone()
    };

    ProductSummary {
        title,
        image: None,
        alt: String::new(),
        deleted: true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use qr_codes_core::{Destination, QrCodeId, ShopDomain};

    use super::*;
    use crate::shopify::Image;

    struct FakeCatalog(HashMap<String, Result<CatalogProduct, ()>>);

    #[async_trait]
    impl ProductCatalog for FakeCatalog {
        async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, AdminShopifyError> {
            match self.0.get(id) {
                Some(Ok(product)) => Ok(Some(product.clone())),
                Some(Err(())) => Err(AdminShopifyError::RateLimited(2)),
                None => Ok(None),
            }
        }
    }

    fn qr_code(product_id: &str, handle: &str) -> QrCode {
        QrCode {
            id: QrCodeId::new(1),
            shop: ShopDomain::parse("store.myshopify.com").unwrap(),
            title: "Poster".to_string(),
            product_id: product_id.to_string(),
            product_variant_id: String::new(),
            product_handle: handle.to_string(),
            destination: Destination::Product,
            scans: 0,
            created_at: Utc::now(),
        }
    }

    fn product(id: &str, image: Option<Image>) -> CatalogProduct {
        CatalogProduct {
            id: id.to_string(),
            title: "Red Snowboard".to_string(),
            handle: "red-snowboard".to_string(),
            featured_image: image,
        }
    }

    #[tokio::test]
    async fn test_found_product() {
        let id = "gid://shopify/Product/1";
        let image = Image {
            url: "https://cdn.shopify.com/red.png".to_string(),
            alt_text: Some("Red board".to_string()),
        };
        let catalog = FakeCatalog(HashMap::from([(id.to_string(), Ok(product(id, Some(image))))]));

        let summary = enrich(&catalog, &qr_code(id, "old-handle")).await;
        assert_eq!(summary.title, "Red Snowboard");
        assert_eq!(summary.image.as_deref(), Some("https://cdn.shopify.com/red.png"));
        assert_eq!(summary.alt, "Red board");
        assert!(!summary.deleted);
    }

    #[tokio::test]
    async fn test_found_product_without_image() {
        let id = "gid://shopify/Product/1";
        let catalog = FakeCatalog(HashMap::from([(id.to_string(), Ok(product(id, None)))]));

        let summary = enrich(&catalog, &qr_code(id, "red-snowboard")).await;
        assert_eq!(summary.image, None);
        assert_eq!(summary.alt, "");
        assert!(!summary.deleted);
    }

    #[tokio::test]
    async fn test_deleted_product_falls_back_to_handle() {
        let catalog = FakeCatalog(HashMap::new());
        let summary = enrich(&catalog, &qr_code("gid://shopify/Product/9", "gone-board")).await;
        assert!(summary.deleted);
        assert_eq!(summary.title, "gone-board");
        assert_eq!(summary.image, None);
    }

    #[tokio::test]
    async fn test_deleted_product_without_handle_uses_title() {
        let catalog = FakeCatalog(HashMap::new());
        let summary = enrich(&catalog, &qr_code("gid://shopify/Product/9", "")).await;
        assert_eq!(summary.title, "Poster");
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades() {
        let id = "gid://shopify/Product/1";
        let catalog = FakeCatalog(HashMap::from([(id.to_string(), Err(()))]));
        let summary = enrich(&catalog, &qr_code(id, "red-snowboard")).await;
        assert!(summary.deleted);
        assert_eq!(summary.title, "red-snowboard");
    }
}
