//! QR Codes Core - Shared types library.
//!
//! This crate provides common types used across all QR code components:
//! - `admin` - Merchant-facing QR code management app
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, shop domains, Shopify GIDs
//!   and scan destinations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
