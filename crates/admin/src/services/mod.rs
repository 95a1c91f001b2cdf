//! Business logic services for admin.
//!
//! # Services
//!
//! - `qr_codes` - QR code lifecycle (validation, enrichment, persistence)

pub mod qr_codes;

pub use qr_codes::{ProductCatalog, QrCodeError, QrCodeManager};
