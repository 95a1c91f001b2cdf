//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//! GET  /health/ready              - Readiness check (database)
//!
//! # QR codes (authenticated shop)
//! GET    /qrcodes                 - QR code listing with product details
//! GET    /qrcodes/{id}            - One QR code, or the blank template for `new`
//! POST   /qrcodes/{id}            - Create (`new`) or update a QR code
//! DELETE /qrcodes/{id}            - Delete a QR code
//! POST   /qrcodes/{id}/delete     - Delete a QR code (HTML forms)
//!
//! # Products (authenticated shop)
//! POST /products/sample           - Create a sample snowboard product
//!
//! # Public
//! GET  /qrcodes/{id}/scan         - Count a scan and redirect to the destination
//! ```

pub mod products;
pub mod qr_codes;
pub mod scan;

use axum::Router;

use crate::state::AppState;

/// Build the application router (without health checks or layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(qr_codes::router())
        .merge(scan::router())
        .merge(products::router())
}
