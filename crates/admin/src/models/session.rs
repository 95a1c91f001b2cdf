//! Session-related types for the authenticated shop.
//!
//! Merchant authentication happens upstream (the embedded-app identity
//! provider); it records which shop the session belongs to under
//! [`keys::CURRENT_SHOP`].

use serde::{Deserialize, Serialize};

use qr_codes_core::ShopDomain;

/// Session-stored shop identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentShop {
    /// The shop every request in this session acts for.
    pub shop: ShopDomain,
}

/// Session keys for shop authentication data.
pub mod keys {
    /// Key for storing the current authenticated shop.
    pub const CURRENT_SHOP: &str = "current_shop";
}
