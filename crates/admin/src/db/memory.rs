//! In-memory [`QrCodeStore`] for tests and local development.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use qr_codes_core::{QrCodeId, ShopDomain};

use super::RepositoryError;
use super::qr_codes::QrCodeStore;
use crate::models::{QrCode, QrCodeFields};

/// A [`QrCodeStore`] held in process memory.
///
/// Ids are assigned from a counter starting at 1 and are never reused.
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryQrCodeStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    codes: BTreeMap<QrCodeId, QrCode>,
}

impl MemoryQrCodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored codes across all shops.
    pub async fn len(&self) -> usize {
        self.inner.read().await.codes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.codes.is_empty()
    }
}

fn owned_by(code: &QrCode, shop: &ShopDomain) -> bool {
    &code.shop == shop
}

#[async_trait]
impl QrCodeStore for MemoryQrCodeStore {
    async fn list(&self, shop: &ShopDomain) -> Result<Vec<QrCode>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .codes
            .values()
            .rev()
            .filter(|code| owned_by(code, shop))
            .cloned()
            .collect())
    }

    async fn get(&self, shop: &ShopDomain, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .codes
            .get(&id)
            .filter(|code| owned_by(code, shop))
            .cloned())
    }

    async fn create(
        &self,
        shop: &ShopDomain,
        fields: &QrCodeFields,
    ) -> Result<QrCode, RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = QrCodeId::new(inner.last_id);

        let code = QrCode {
            id,
            shop: shop.clone(),
            title: fields.title.clone(),
            product_id: fields.product_id.clone(),
            product_variant_id: fields.product_variant_id.clone(),
            product_handle: fields.product_handle.clone(),
            destination: fields.destination,
            scans: 0,
            created_at: Utc::now(),
        };
        inner.codes.insert(id, code.clone());
        Ok(code)
    }

    async fn update(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
        fields: &QrCodeFields,
    ) -> Result<QrCode, RepositoryError> {
        let mut inner = self.inner.write().await;
        let code = inner
            .codes
            .get_mut(&id)
            .filter(|code| owned_by(code, shop))
            .ok_or(RepositoryError::NotFound)?;

        code.title.clone_from(&fields.title);
        code.product_id.clone_from(&fields.product_id);
        code.product_variant_id.clone_from(&fields.product_variant_id);
        code.product_handle.clone_from(&fields.product_handle);
        code.destination = fields.destination;
        Ok(code.clone())
    }

    async fn delete(&self, shop: &ShopDomain, id: QrCodeId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        match inner.codes.get(&id) {
            Some(code) if owned_by(code, shop) => {
                inner.codes.remove(&id);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    async fn record_scan(&self, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError> {
        let mut inner = self.inner.write().await;
        Ok(inner.codes.get_mut(&id).map(|code| {
            code.scans += 1;
            code.clone()
        }))
    }
}
