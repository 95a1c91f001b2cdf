//! QR code domain models.
//!
//! [`QrCode`] is the persisted record. Everything else is either inbound
//! (the merchant's submitted draft) or outbound (view projections carrying
//! read-time enrichment that is never written back).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qr_codes_core::{Destination, QrCodeId, ShopDomain, ShopifyGid};

/// A stored QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Store-assigned id, immutable.
    pub id: QrCodeId,
    /// Owning shop, immutable.
    pub shop: ShopDomain,
    /// Merchant-facing label.
    pub title: String,
    /// Linked product GID.
    pub product_id: String,
    /// Linked variant GID, empty when none was picked.
    pub product_variant_id: String,
    /// Product handle at the time the code was saved.
    pub product_handle: String,
    /// Scan destination.
    pub destination: Destination,
    /// Number of times the code has been scanned.
    pub scans: i32,
    /// When the code was created.
    pub created_at: DateTime<Utc>,
}

impl QrCode {
    /// The URL a scan of this code resolves to.
    ///
    /// `product` links to `https://{shop}/products/{handle}`. `cart` links to
    /// `https://{shop}/cart/{variant}:1`, where `{variant}` is the numeric tail
    /// of the variant GID; without a usable variant it links to the empty
    /// cart at `https://{shop}/cart`.
    #[must_use]
    pub fn destination_url(&self) -> String {
        let origin = self.shop.storefront_origin();

        match self.destination {
            Destination::Product => format!("{origin}/products/{}", self.product_handle),
            Destination::Cart => cart_variant_id(&self.product_variant_id).map_or_else(
                || format!("{origin}/cart"),
                |variant| format!("{origin}/cart/{variant}:1"),
            ),
        }
    }
}

/// Numeric variant id usable in a cart permalink.
fn cart_variant_id(variant: &str) -> Option<String> {
    let id = ShopifyGid::parse(variant)
        .ok()
        .filter(|gid| gid.resource_type() == "ProductVariant")
        .map_or_else(|| variant.to_owned(), |gid| gid.id().to_owned());

    (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then_some(id)
}

/// The validated, editable field set of a QR code.
///
/// Create and update both take the complete set; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeFields {
    /// Merchant-facing label, non-empty.
    pub title: String,
    /// Linked product GID, non-empty.
    pub product_id: String,
    /// Linked variant GID, possibly empty.
    pub product_variant_id: String,
    /// Product handle, possibly empty.
    pub product_handle: String,
    /// Scan destination.
    pub destination: Destination,
}

/// A submitted QR code form, exactly as the client sent it.
///
/// Every field is optional and untyped here; [`QrCodeDraft::normalized`] and
/// the validator turn it into [`QrCodeFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeDraft {
    pub title: Option<String>,
    pub product_id: Option<String>,
    pub product_variant_id: Option<String>,
    pub product_handle: Option<String>,
    pub destination: Option<String>,
}

impl QrCodeDraft {
    /// Replace absent optional fields (`productVariantId`, `productHandle`)
    /// with empty strings.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            product_variant_id: Some(self.product_variant_id.unwrap_or_default()),
            product_handle: Some(self.product_handle.unwrap_or_default()),
            ..self
        }
    }
}

/// A form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    ProductId,
    Destination,
}

/// Validation errors keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Record an error for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// The error message for a field, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Fields with errors, in a stable order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Product details attached to a QR code at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Current product title, or the stored handle if the product is gone.
    pub title: String,
    /// First product image URL.
    pub image: Option<String>,
    /// Alt text for the image, empty when there is none.
    pub alt: String,
    /// The catalog no longer returns this product.
    pub deleted: bool,
}

/// One row of the QR code listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeListItem {
    pub id: QrCodeId,
    pub title: String,
    pub product_image: Option<String>,
    pub product_title: String,
    pub product_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub scans: i32,
}

impl QrCodeListItem {
    #[must_use]
    pub fn new(qr_code: QrCode, product: ProductSummary) -> Self {
        Self {
            id: qr_code.id,
            title: qr_code.title,
            product_image: product.image,
            product_title: product.title,
            product_deleted: product.deleted,
            created_at: qr_code.created_at,
            scans: qr_code.scans,
        }
    }
}

/// A single QR code with its derived, read-time fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeView {
    #[serde(flatten)]
    pub qr_code: QrCode,
    pub product_title: String,
    pub product_image: Option<String>,
    pub product_alt: String,
    pub product_deleted: bool,
    pub destination_url: String,
    /// Public address that a printed code encodes.
    pub public_url: String,
}

impl QrCodeView {
    #[must_use]
    pub fn new(qr_code: QrCode, product: ProductSummary, public_base_url: &str) -> Self {
        let destination_url = qr_code.destination_url();
        let public_url = format!(
            "{}/qrcodes/{}/scan",
            public_base_url.trim_end_matches('/'),
            qr_code.id
        );

        Self {
            qr_code,
            product_title: product.title,
            product_image: product.image,
            product_alt: product.alt,
            product_deleted: product.deleted,
            destination_url,
            public_url,
        }
    }
}

/// The blank form served for the `"new"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeTemplate {
    pub destination: Destination,
    pub title: String,
}

impl Default for QrCodeTemplate {
    fn default() -> Self {
        Self {
            destination: Destination::Product,
            title: String::new(),
        }
    }
}

/// What a read of one QR code returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QrCodeDetail {
    /// Blank form for an unsaved code.
    Template(QrCodeTemplate),
    /// A stored code with enrichment.
    Existing(Box<QrCodeView>),
}
