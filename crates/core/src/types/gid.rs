//! Shopify global IDs (`gid://shopify/{Type}/{id}`).

use core::fmt;

/// Errors that can occur when parsing a [`ShopifyGid`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GidError {
    /// The input does not start with `gid://shopify/`.
    #[error("not a Shopify GID: {0}")]
    BadPrefix(String),
    /// The resource type or id segment is missing.
    #[error("malformed Shopify GID: {0}")]
    Malformed(String),
}

/// A parsed Shopify global ID.
///
/// ```
/// use qr_codes_core::ShopifyGid;
///
/// let gid = ShopifyGid::parse("gid://shopify/ProductVariant/42").unwrap();
/// assert_eq!(gid.resource_type(), "ProductVariant");
/// assert_eq!(gid.id(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShopifyGid {
    resource_type: String,
    id: String,
}

impl ShopifyGid {
    const PREFIX: &'static str = "gid://shopify/";

    /// Parse a GID. A trailing query string (`?...`) is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GidError`] if the prefix is wrong or a segment is missing.
    pub fn parse(s: &str) -> Result<Self, GidError> {
        let rest = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| GidError::BadPrefix(s.to_owned()))?;
        let rest = rest.split('?').next().unwrap_or_default();

        match rest.split_once('/') {
            Some((resource_type, id))
                if !resource_type.is_empty() && !id.is_empty() && !id.contains('/') =>
            {
                Ok(Self {
                    resource_type: resource_type.to_owned(),
                    id: id.to_owned(),
                })
            }
            _ => Err(GidError::Malformed(s.to_owned())),
        }
    }

    /// The resource type, e.g. `Product`.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The trailing id segment, e.g. `42`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ShopifyGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", Self::PREFIX, self.resource_type, self.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product() {
        let gid = ShopifyGid::parse("gid://shopify/Product/123").unwrap();
        assert_eq!(gid.resource_type(), "Product");
        assert_eq!(gid.id(), "123");
        assert_eq!(gid.to_string(), "gid://shopify/Product/123");
    }

    #[test]
    fn test_parse_ignores_query() {
        let gid = ShopifyGid::parse("gid://shopify/ProductVariant/9?inventory=1").unwrap();
        assert_eq!(gid.id(), "9");
    }

    #[test]
    fn test_parse_bad_prefix() {
        assert!(matches!(
            ShopifyGid::parse("123"),
            Err(GidError::BadPrefix(_))
        ));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            ShopifyGid::parse("gid://shopify/Product"),
            Err(GidError::Malformed(_))
        ));
        assert!(matches!(
            ShopifyGid::parse("gid://shopify/Product/"),
            Err(GidError::Malformed(_))
        ));
        assert!(matches!(
            ShopifyGid::parse("gid://shopify/Product/1/2"),
            Err(GidError::Malformed(_))
        ));
    }
}
