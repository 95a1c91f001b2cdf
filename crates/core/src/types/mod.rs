//! Core types for QR codes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod destination;
pub mod gid;
pub mod id;
pub mod shop;

pub use destination::{Destination, DestinationError};
pub use gid::{GidError, ShopifyGid};
pub use id::*;
pub use shop::{ShopDomain, ShopDomainError};
