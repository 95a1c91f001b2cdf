//! Scan destination for a QR code.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a scanned QR code sends the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "admin.qr_destination", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// The product detail page in the online store.
    #[default]
    Product,
    /// Checkout with the product variant already in the cart.
    Cart,
}

impl Destination {
    /// Every accepted destination.
    pub const ALL: [Self; 2] = [Self::Product, Self::Cart];

    /// Returns the wire value (`product` or `cart`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Cart => "cart",
        }
    }
}

/// Error returned when parsing an unknown destination.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid destination: {0}")]
pub struct DestinationError(String);

impl FromStr for Destination {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Self::Product),
            "cart" => Ok(Self::Cart),
            _ => Err(DestinationError(s.to_owned())),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!("product".parse::<Destination>().unwrap(), Destination::Product);
        assert_eq!("cart".parse::<Destination>().unwrap(), Destination::Cart);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Cart".parse::<Destination>().is_err());
        assert!("checkout".parse::<Destination>().is_err());
        assert!("".parse::<Destination>().is_err());
    }

    #[test]
    fn test_default_is_product() {
        assert_eq!(Destination::default(), Destination::Product);
    }

    #[test]
    fn test_serde_uses_wire_values() {
        assert_eq!(serde_json::to_string(&Destination::Cart).unwrap(), "\"cart\"");
        let parsed: Destination = serde_json::from_str("\"product\"").unwrap();
        assert_eq!(parsed, Destination::Product);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for destination in Destination::ALL {
            assert_eq!(destination.to_string().parse::<Destination>().unwrap(), destination);
        }
    }
}
