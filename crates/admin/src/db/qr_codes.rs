//! QR code persistence.
//!
//! [`QrCodeStore`] is the seam between the lifecycle manager and storage.
//! Every operation except scan tracking is scoped by shop: a code owned by
//! another shop is indistinguishable from one that does not exist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use qr_codes_core::{Destination, QrCodeId, ShopDomain};

use super::RepositoryError;
use crate::models::{QrCode, QrCodeFields};

/// Storage for QR codes.
#[async_trait]
pub trait QrCodeStore: Send + Sync {
    /// All codes owned by `shop`, newest first.
    async fn list(&self, shop: &ShopDomain) -> Result<Vec<QrCode>, RepositoryError>;

    /// One code owned by `shop`.
    async fn get(&self, shop: &ShopDomain, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError>;

    /// Insert a new code with zero scans, returning it with its assigned id.
    async fn create(
        &self,
        shop: &ShopDomain,
        fields: &QrCodeFields,
    ) -> Result<QrCode, RepositoryError>;

    /// Replace the editable fields of a code owned by `shop`.
    ///
    /// Returns `RepositoryError::NotFound` if no such code exists for the shop.
    async fn update(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
        fields: &QrCodeFields,
    ) -> Result<QrCode, RepositoryError>;

    /// Remove a code owned by `shop`.
    ///
    /// Returns `RepositoryError::NotFound` if no such code exists for the shop.
    async fn delete(&self, shop: &ShopDomain, id: QrCodeId) -> Result<(), RepositoryError>;

    /// Count one scan of a code and return the updated record.
    ///
    /// Scans come from anonymous shoppers, so this is looked up by id alone.
    async fn record_scan(&self, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError>;
}

/// Internal row type for `PostgreSQL` queries.
#[derive(Debug, sqlx::FromRow)]
struct QrCodeRow {
    id: QrCodeId,
    shop: String,
    title: String,
    product_id: String,
    product_variant_id: String,
    product_handle: String,
    destination: Destination,
    scans: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<QrCodeRow> for QrCode {
    type Error = RepositoryError;

    fn try_from(row: QrCodeRow) -> Result<Self, Self::Error> {
        let shop = ShopDomain::parse(&row.shop).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid shop for QR code {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            shop,
            title: row.title,
            product_id: row.product_id,
            product_variant_id: row.product_variant_id,
            product_handle: row.product_handle,
            destination: row.destination,
            scans: row.scans,
            created_at: row.created_at,
        })
    }
}

const COLUMNS: &str = "id, shop, title, product_id, product_variant_id, product_handle, \
                       destination, scans, created_at";

/// `PostgreSQL`-backed [`QrCodeStore`].
#[derive(Clone)]
pub struct PgQrCodeStore {
    pool: PgPool,
}

impl PgQrCodeStore {
    /// Create a new store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrCodeStore for PgQrCodeStore {
    #[instrument(skip(self), fields(shop = %shop))]
    async fn list(&self, shop: &ShopDomain) -> Result<Vec<QrCode>, RepositoryError> {
        let rows = sqlx::query_as::<_, QrCodeRow>(&format!(
            "SELECT {COLUMNS} FROM admin.qr_code WHERE shop = $1 ORDER BY id DESC"
        ))
        .bind(shop)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QrCode::try_from).collect()
    }

    #[instrument(skip(self), fields(shop = %shop, qr_code_id = %id))]
    async fn get(&self, shop: &ShopDomain, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError> {
        let row = sqlx::query_as::<_, QrCodeRow>(&format!(
            "SELECT {COLUMNS} FROM admin.qr_code WHERE id = $1 AND shop = $2"
        ))
        .bind(id)
        .bind(shop)
        .fetch_optional(&self.pool)
        .await?;

        row.map(QrCode::try_from).transpose()
    }

    #[instrument(skip(self, fields), fields(shop = %shop))]
    async fn create(
        &self,
        shop: &ShopDomain,
        fields: &QrCodeFields,
    ) -> Result<QrCode, RepositoryError> {
        let row = sqlx::query_as::<_, QrCodeRow>(&format!(
            r"
            INSERT INTO admin.qr_code
                (shop, title, product_id, product_variant_id, product_handle, destination)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "
        ))
        .bind(shop)
        .bind(&fields.title)
        .bind(&fields.product_id)
        .bind(&fields.product_variant_id)
        .bind(&fields.product_handle)
        .bind(fields.destination)
        .fetch_one(&self.pool)
        .await?;

        QrCode::try_from(row)
    }

    #[instrument(skip(self, fields), fields(shop = %shop, qr_code_id = %id))]
    async fn update(
        &self,
        shop: &ShopDomain,
        id: QrCodeId,
        fields: &QrCodeFields,
    ) -> Result<QrCode, RepositoryError> {
        let row = sqlx::query_as::<_, QrCodeRow>(&format!(
            r"
            UPDATE admin.qr_code
            SET title = $3,
                product_id = $4,
                product_variant_id = $5,
                product_handle = $6,
                destination = $7
            WHERE id = $1 AND shop = $2
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(shop)
        .bind(&fields.title)
        .bind(&fields.product_id)
        .bind(&fields.product_variant_id)
        .bind(&fields.product_handle)
        .bind(fields.destination)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        QrCode::try_from(row)
    }

    #[instrument(skip(self), fields(shop = %shop, qr_code_id = %id))]
    async fn delete(&self, shop: &ShopDomain, id: QrCodeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin.qr_code WHERE id = $1 AND shop = $2")
            .bind(id)
            .bind(shop)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(qr_code_id = %id))]
    async fn record_scan(&self, id: QrCodeId) -> Result<Option<QrCode>, RepositoryError> {
        let row = sqlx::query_as::<_, QrCodeRow>(&format!(
            "UPDATE admin.qr_code SET scans = scans + 1 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(QrCode::try_from).transpose()
    }
}
