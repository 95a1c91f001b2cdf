//! Integration tests for the QR codes admin app.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process lifecycle tests (no database or Shopify needed)
//! cargo test -p qr-codes-integration-tests
//!
//! # HTTP tests against a running admin server
//! task db:start
//! cargo test -p qr-codes-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `qr_code_lifecycle` - Create, read, update, delete and scan through the manager
//! - `qr_code_tenancy` - Shop isolation and concurrent writes
//! - `admin_qr_codes` - HTTP surface of a running admin server
//!
//! This library holds the shared fixtures: an in-memory product catalog and
//! draft builders.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use qr_codes_admin::db::MemoryQrCodeStore;
use qr_codes_admin::models::QrCodeDraft;
use qr_codes_admin::services::{ProductCatalog, QrCodeManager};
use qr_codes_admin::shopify::{AdminShopifyError, CatalogProduct, Image};
use qr_codes_core::ShopDomain;

/// Base URL that public scan links are built from in tests.
pub const PUBLIC_BASE_URL: &str = "https://qr.example.test";

/// A product catalog backed by a map, counting lookups.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    products: HashMap<String, CatalogProduct>,
    failing: Vec<String>,
    lookups: AtomicUsize,
}

impl FakeCatalog {
    /// An empty catalog: every product looks deleted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product with an image and one variant.
    #[must_use]
    pub fn with_product(mut self, id: &str, title: &str, handle: &str) -> Self {
        self.products.insert(
            id.to_string(),
            CatalogProduct {
                id: id.to_string(),
                title: title.to_string(),
                handle: handle.to_string(),
                featured_image: Some(Image {
                    url: format!("https://cdn.example.test/{handle}.png"),
                    alt_text: Some(format!("{title} photo")),
                }),
            },
        );
        self
    }

    /// Make lookups of `id` fail as if the Admin API were unreachable.
    #[must_use]
    pub fn with_failure(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }

    /// Number of product lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for FakeCatalog {
    async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, AdminShopifyError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|f| f == id) {
            return Err(AdminShopifyError::Unauthorized(format!("lookup failed for {id}")));
        }
        Ok(self.products.get(id).cloned())
    }
}

/// Parse a shop domain, panicking on invalid test input.
///
/// # Panics
///
/// Panics if `domain` is not a valid shop domain.
#[must_use]
pub fn shop(domain: &str) -> ShopDomain {
    ShopDomain::parse(domain).unwrap_or_else(|e| panic!("invalid test shop {domain}: {e}"))
}

/// A manager over a fresh in-memory store, returning both.
#[must_use]
pub fn manager() -> (QrCodeManager, MemoryQrCodeStore) {
    let store = MemoryQrCodeStore::new();
    let manager = QrCodeManager::new(Arc::new(store.clone()), PUBLIC_BASE_URL);
    (manager, store)
}

/// A complete, valid draft.
#[must_use]
pub fn draft(title: &str, product_id: &str, handle: &str, destination: &str) -> QrCodeDraft {
    QrCodeDraft {
        title: Some(title.to_string()),
        product_id: Some(product_id.to_string()),
        product_variant_id: None,
        product_handle: Some(handle.to_string()),
        destination: Some(destination.to_string()),
    }
}
