//! QR code lifecycle manager.
//!
//! Every operation takes the owning shop explicitly. Reads go store, then
//! enricher, then view projection; writes go validator, then store. Nothing
//! is written before validation passes and no read path writes.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::instrument;

use qr_codes_core::{QrCodeId, QrCodeRef, ShopDomain};

use super::{ProductCatalog, QrCodeError, enrich, validator};
use crate::db::{QrCodeStore, RepositoryError};
use crate::models::{
    FieldErrors, QrCodeDetail, QrCodeDraft, QrCodeListItem, QrCodeTemplate, QrCodeView,
};

/// What the caller asked for.
#[derive(Debug, Clone)]
pub enum Intent {
    /// All codes for the shop.
    List,
    /// One code, or the blank template for `new`.
    Read(QrCodeRef),
    /// Create or replace a code from a submitted draft.
    Submit {
        target: SubmitIntent,
        draft: QrCodeDraft,
    },
    /// Remove a code.
    Delete(QrCodeId),
}

impl Intent {
    /// Whether running this intent reads product details from the catalog.
    #[must_use]
    pub const fn needs_catalog(&self) -> bool {
        matches!(self, Self::List | Self::Read(QrCodeRef::Existing(_)))
    }
}

/// Whether a submission creates a code or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIntent {
    Create,
    Update(QrCodeId),
}

impl From<QrCodeRef> for SubmitIntent {
    fn from(target: QrCodeRef) -> Self {
        match target {
            QrCodeRef::New => Self::Create,
            QrCodeRef::Existing(id) => Self::Update(id),
        }
    }
}

/// Where the caller should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The QR code listing.
    List,
    /// A single QR code.
    QrCode(QrCodeId),
}

impl Navigation {
    /// Path of the page, relative to the app root.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::List => "/qrcodes".to_string(),
            Self::QrCode(id) => format!("/qrcodes/{id}"),
        }
    }
}

/// Result of a submission that did not fail in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Stored under this id.
    Saved(QrCodeId),
    /// Validation failed; nothing was stored.
    Rejected(FieldErrors),
}

/// Result of a delete that did not fail in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The code existed and is now gone.
    Deleted,
    /// There was nothing to delete.
    AlreadyGone,
}

/// Result of dispatching an [`Intent`].
#[derive(Debug, Clone)]
pub enum Outcome {
    List(Vec<QrCodeListItem>),
    Detail(QrCodeDetail),
    Redirect(Navigation),
    Rejected(FieldErrors),
}

/// Product lookups in flight at once while listing.
const ENRICH_CONCURRENCY: usize = 8;

/// Orchestrates the QR code lifecycle over a [`QrCodeStore`].
#[derive(Clone)]
pub struct QrCodeManager {
    store: Arc<dyn QrCodeStore>,
    public_base_url: String,
}

impl std::fmt::Debug for QrCodeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrCodeManager")
            .field("public_base_url", &self.public_base_url)
            .finish_non_exhaustive()
    }
}

impl QrCodeManager {
    /// Create a manager. `public_base_url` prefixes the scan URLs of views.
    #[must_use]
    pub fn new(store: Arc<dyn QrCodeStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into(),
        }
    }

    /// Run one intent to completion.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError::NotFound` when reading a code that does not
    /// exist for the shop, and `QrCodeError::Store` when storage fails.
    pub async fn dispatch(
        &self,
        shop: &ShopDomain,
        intent: Intent,
        catalog: &dyn ProductCatalog,
    ) -> Result<Outcome, QrCodeError> {
        match intent {
            Intent::List => self.list(shop, catalog).await.map(Outcome::List),
            Intent::Read(target) => self.get(shop, target, catalog).await.map(Outcome::Detail),
            Intent::Submit { target, draft } => {
                Ok(match self.submit(shop, target, draft).await? {
                    Submission::Saved(id) => Outcome::Redirect(Navigation::QrCode(id)),
                    Submission::Rejected(errors) => Outcome::Rejected(errors),
                })
            }
            Intent::Delete(id) => {
                self.remove(shop, id).await?;
                Ok(Outcome::Redirect(Navigation::List))
            }
        }
    }

    /// List the shop's codes, newest first, each with product details.
    ///
    /// Up to [`ENRICH_CONCURRENCY`] lookups run at once and rows keep the
    /// store's order. One failing lookup only marks its own row.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError::Store` if the store cannot be read.
    #[instrument(skip(self, catalog), fields(shop = %shop))]
    pub async fn list(
        &self,
        shop: &ShopDomain,
        catalog: &dyn ProductCatalog,
    ) -> Result<Vec<QrCodeListItem>, QrCodeError> {
        let codes = self.store.list(shop).await?;

        let rows: Vec<_> = stream::iter(codes)
            .map(|code| async move {
                let product = enrich(catalog, &code).await;
                QrCodeListItem::new(code, product)
            })
            .buffered(ENRICH_CONCURRENCY)
            .collect()
            .await;

        Ok(rows)
    }

    /// Read one code, or the blank template for the `new` sentinel.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError::NotFound` if the shop has no such code, or
    /// `QrCodeError::Store` if the store cannot be read.
    #[instrument(skip(self, catalog), fields(shop = %shop, target = %target))]
    pub async fn get(
        &self,
        shop: &ShopDomain,
        target: QrCodeRef,
        catalog: &dyn ProductCatalog,
    ) -> Result<QrCodeDetail, QrCodeError> {
        let QrCodeRef::Existing(id) = target else {
            return Ok(QrCodeDetail::Template(QrCodeTemplate::default()));
        };

        let code = self
            .store
            .get(shop, id)
            .await?
            .ok_or(QrCodeError::NotFound(id))?;
        let product = enrich(catalog, &code).await;

        Ok(QrCodeDetail::Existing(Box::new(QrCodeView::new(
            code,
            product,
            &self.public_base_url,
        ))))
    }

    /// Validate a draft and create or replace the code.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError::NotFound` if updating a code the shop does not
    /// have, or `QrCodeError::Store` if the write fails.
    #[instrument(skip(self, draft), fields(shop = %shop, target = ?target))]
    pub async fn submit(
        &self,
        shop: &ShopDomain,
        target: SubmitIntent,
        draft: QrCodeDraft,
    ) -> Result<Submission, QrCodeError> {
        let fields = match validator::parse(draft) {
            Ok(fields) => fields,
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "QR code rejected");
                return Ok(Submission::Rejected(errors));
            }
        };

        let code = match target {
            SubmitIntent::Create => self.store.create(shop, &fields).await?,
            SubmitIntent::Update(id) => self
                .store
                .update(shop, id, &fields)
                .await
                .map_err(QrCodeError::for_id(id))?,
        };

        tracing::info!(qr_code_id = %code.id, "Saved QR code");
        Ok(Submission::Saved(code.id))
    }

    /// Delete a code. Deleting a code that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError::Store` if the delete fails.
    #[instrument(skip(self), fields(shop = %shop, qr_code_id = %id))]
    pub async fn remove(&self, shop: &ShopDomain, id: QrCodeId) -> Result<Removal, QrCodeError> {
        match self.store.delete(shop, id).await {
            Ok(()) => {
                tracing::info!("Deleted QR code");
                Ok(Removal::Deleted)
            }
            Err(RepositoryError::NotFound) => {
                tracing::debug!("QR code already gone");
                Ok(Removal::AlreadyGone)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Count a scan and return the URL the scanner should be sent to.
    ///
    /// # Errors
    ///
    /// Returns `QrCodeError::NotFound` for an unknown id, or
    /// `QrCodeError::Store` if the update fails.
    #[instrument(skip(self), fields(qr_code_id = %id))]
    pub async fn scan(&self, id: QrCodeId) -> Result<String, QrCodeError> {
        let code = self
            .store
            .record_scan(id)
            .await?
            .ok_or(QrCodeError::NotFound(id))?;
        Ok(code.destination_url())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::db::MemoryQrCodeStore;
    use crate::models::Field;
    use crate::shopify::{AdminShopifyError, CatalogProduct};

    struct EmptyCatalog;

    #[async_trait]
    impl ProductCatalog for EmptyCatalog {
        async fn product(&self, _id: &str) -> Result<Option<CatalogProduct>, AdminShopifyError> {
            Ok(None)
        }
    }

    fn shop() -> ShopDomain {
        ShopDomain::parse("store.myshopify.com").unwrap()
    }

    fn manager() -> (QrCodeManager, MemoryQrCodeStore) {
        let store = MemoryQrCodeStore::new();
        (
            QrCodeManager::new(Arc::new(store.clone()), "https://qr.example.com"),
            store,
        )
    }

    fn draft() -> QrCodeDraft {
        QrCodeDraft {
            title: Some("Red Snowboard QR".to_string()),
            product_id: Some("gid://shopify/Product/1".to_string()),
            product_variant_id: None,
            product_handle: Some("red-snowboard".to_string()),
            destination: Some("product".to_string()),
        }
    }

    #[tokio::test]
    async fn test_read_new_returns_template() {
        let (manager, _) = manager();
        let detail = manager.get(&shop(), QrCodeRef::New, &EmptyCatalog).await.unwrap();
        assert_eq!(detail, QrCodeDetail::Template(QrCodeTemplate::default()));
    }

    #[tokio::test]
    async fn test_rejected_submission_does_not_write() {
        let (manager, store) = manager();
        let outcome = manager
            .dispatch(
                &shop(),
                Intent::Submit {
                    target: SubmitIntent::Create,
                    draft: QrCodeDraft::default(),
                },
                &EmptyCatalog,
            )
            .await
            .unwrap();

        let Outcome::Rejected(errors) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors.get(Field::Title).is_some());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_redirects_to_new_code() {
        let (manager, _) = manager();
        let outcome = manager
            .dispatch(
                &shop(),
                Intent::Submit {
                    target: SubmitIntent::Create,
                    draft: draft(),
                },
                &EmptyCatalog,
            )
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            Outcome::Redirect(Navigation::QrCode(id)) if id == QrCodeId::new(1)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_code_is_not_found() {
        let (manager, _) = manager();
        let err = manager
            .submit(&shop(), SubmitIntent::Update(QrCodeId::new(5)), draft())
            .await
            .unwrap_err();
        assert!(matches!(err, QrCodeError::NotFound(id) if id == QrCodeId::new(5)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (manager, _) = manager();
        let Submission::Saved(id) = manager
            .submit(&shop(), SubmitIntent::Create, draft())
            .await
            .unwrap()
        else {
            panic!("expected save");
        };

        assert_eq!(manager.remove(&shop(), id).await.unwrap(), Removal::Deleted);
        assert_eq!(manager.remove(&shop(), id).await.unwrap(), Removal::AlreadyGone);

        let outcome = manager
            .dispatch(&shop(), Intent::Delete(id), &EmptyCatalog)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Redirect(Navigation::List)));
    }

    #[tokio::test]
    async fn test_scan_counts_and_resolves() {
        let (manager, store) = manager();
        let Submission::Saved(id) = manager
            .submit(&shop(), SubmitIntent::Create, draft())
            .await
            .unwrap()
        else {
            panic!("expected save");
        };

        let url = manager.scan(id).await.unwrap();
        assert_eq!(url, "https://store.myshopify.com/products/red-snowboard");
        assert_eq!(store.get(&shop(), id).await.unwrap().unwrap().scans, 1);

        assert!(matches!(
            manager.scan(QrCodeId::new(99)).await,
            Err(QrCodeError::NotFound(_))
        ));
    }

    #[test]
    fn test_navigation_paths() {
        assert_eq!(Navigation::List.path(), "/qrcodes");
        assert_eq!(Navigation::QrCode(QrCodeId::new(3)).path(), "/qrcodes/3");
    }

    #[test]
    fn test_submit_intent_from_ref() {
        assert_eq!(SubmitIntent::from(QrCodeRef::New), SubmitIntent::Create);
        assert_eq!(
            SubmitIntent::from(QrCodeRef::Existing(QrCodeId::new(2))),
            SubmitIntent::Update(QrCodeId::new(2))
        );
    }

    #[test]
    fn test_needs_catalog() {
        assert!(Intent::List.needs_catalog());
        assert!(Intent::Read(QrCodeRef::Existing(QrCodeId::new(1))).needs_catalog());
        assert!(!Intent::Read(QrCodeRef::New).needs_catalog());
        assert!(
            !Intent::Submit {
                target: SubmitIntent::Create,
                draft: draft(),
            }
            .needs_catalog()
        );
        assert!(!Intent::Delete(QrCodeId::new(1)).needs_catalog());
    }

    #[tokio::test]
    async fn test_list_order_survives_bounded_lookups() {
        let (manager, _) = manager();
        let count = ENRICH_CONCURRENCY * 3 + 1;
        for _ in 0..count {
            manager
                .submit(&shop(), SubmitIntent::Create, draft())
                .await
                .unwrap();
        }

        let rows = manager.list(&shop(), &EmptyCatalog).await.unwrap();
        let ids: Vec<i32> = rows.iter().map(|row| row.id.as_i32()).collect();
        let expected: Vec<i32> = (1..=i32::try_from(count).unwrap()).rev().collect();
        assert_eq!(ids, expected);
        assert!(rows.iter().all(|row| row.product_deleted));
    }
}
