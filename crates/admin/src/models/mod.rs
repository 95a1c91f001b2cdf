//! Domain models for the admin app.

pub mod qr_code;
pub mod session;

pub use qr_code::{
    Field, FieldErrors, ProductSummary, QrCode, QrCodeDetail, QrCodeDraft, QrCodeFields,
    QrCodeListItem, QrCodeTemplate, QrCodeView,
};
pub use session::CurrentShop;
