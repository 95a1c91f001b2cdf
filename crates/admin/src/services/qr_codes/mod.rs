//! QR code lifecycle.
//!
//! - [`validator`] - Field rules for a submitted draft
//! - [`enricher`] - Read-time product details from the Shopify catalog
//! - [`manager`] - Intent dispatch over the store, validator and enricher

pub mod enricher;
pub mod manager;
pub mod validator;

use thiserror::Error;

use qr_codes_core::QrCodeId;

use crate::db::RepositoryError;

pub use enricher::{ProductCatalog, enrich};
pub use manager::{Intent, Navigation, Outcome, QrCodeManager, Removal, Submission, SubmitIntent};
pub use validator::{parse, validate};

/// Errors that can occur during QR code operations.
///
/// Validation failures are not errors here; they come back as
/// [`Outcome::Rejected`] / [`Submission::Rejected`].
#[derive(Debug, Error)]
pub enum QrCodeError {
    /// No QR code with this id exists for the shop.
    #[error("QR code {0} not found")]
    NotFound(QrCodeId),

    /// Storage failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
}

impl QrCodeError {
    /// Map a store error for a specific id, turning `NotFound` into
    /// [`QrCodeError::NotFound`].
    pub(crate) fn for_id(id: QrCodeId) -> impl FnOnce(RepositoryError) -> Self {
        move |err| match err {
            RepositoryError::NotFound => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}
