//! GraphQL operation definitions for Shopify Admin API.
//!
//! Each operation implements [`GraphQLQuery`] by hand: the query text, its
//! variables and the subset of the response we read. Only the fields the
//! QR code app needs are requested.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product lookup
// =============================================================================

/// Look up a single product by GID for QR code enrichment.
pub struct QrCodeProduct;

pub mod qr_code_product {
    use super::{Deserialize, Serialize};

    pub const QUERY: &str = r"
query QrCodeProduct($id: ID!) {
  product(id: $id) {
    id
    title
    handle
    featuredMedia {
      preview {
        image {
          url
          altText
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<Product>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Product {
        pub id: String,
        pub title: String,
        pub handle: String,
        pub featured_media: Option<Media>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Media {
        pub preview: Option<MediaPreview>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MediaPreview {
        pub image: Option<Image>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Image {
        pub url: String,
        pub alt_text: Option<String>,
    }
}

impl GraphQLQuery for QrCodeProduct {
    type Variables = qr_code_product::Variables;
    type ResponseData = qr_code_product::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: qr_code_product::QUERY,
            operation_name: "QrCodeProduct",
        }
    }
}

// =============================================================================
// Sample product creation
// =============================================================================

/// Create a product with a single default variant.
pub struct SampleProductCreate;

pub mod sample_product_create {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation SampleProductCreate($product: ProductCreateInput!) {
  productCreate(product: $product) {
    product {
      id
      title
      handle
      status
      variants(first: 1) {
        nodes {
          id
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub product: ProductCreateInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct ProductCreateInput {
        pub title: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub product: Option<Product>,
        pub user_errors: Vec<UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Product {
        pub id: String,
        pub title: String,
        pub handle: String,
        pub status: String,
        pub variants: VariantConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantConnection {
        pub nodes: Vec<VariantNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantNode {
        pub id: String,
    }
}

impl GraphQLQuery for SampleProductCreate {
    type Variables = sample_product_create::Variables;
    type ResponseData = sample_product_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: sample_product_create::QUERY,
            operation_name: "SampleProductCreate",
        }
    }
}

/// Set the price of product variants.
pub struct VariantPriceUpdate;

pub mod variant_price_update {
    use super::{Deserialize, Serialize, UserError};

    pub const QUERY: &str = r"
mutation VariantPriceUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
  productVariantsBulkUpdate(productId: $productId, variants: $variants) {
    productVariants {
      price
    }
    userErrors {
      field
      message
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_id: String,
        pub variants: Vec<VariantInput>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct VariantInput {
        pub id: String,
        pub price: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_variants_bulk_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub product_variants: Option<Vec<VariantNode>>,
        pub user_errors: Vec<UserError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantNode {
        pub price: String,
    }
}

impl GraphQLQuery for VariantPriceUpdate {
    type Variables = variant_price_update::Variables;
    type ResponseData = variant_price_update::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: variant_price_update::QUERY,
            operation_name: "VariantPriceUpdate",
        }
    }
}

// =============================================================================
// Shared
// =============================================================================

/// A mutation user error (invalid input rather than a transport failure).
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Join mutation user errors into one message, `field.path: message; ...`.
pub fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| {
            let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
            format!("{}: {}", field, e.message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_body() {
        let body = QrCodeProduct::build_query(qr_code_product::Variables {
            id: "gid://shopify/Product/1".to_string(),
        });
        assert_eq!(body.operation_name, "QrCodeProduct");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variables"]["id"], "gid://shopify/Product/1");
        assert!(json["query"].as_str().unwrap().contains("featuredMedia"));
    }

    #[test]
    fn test_product_response_without_media() {
        let data: qr_code_product::ResponseData = serde_json::from_value(serde_json::json!({
            "product": {
                "id": "gid://shopify/Product/1",
                "title": "Red Snowboard",
                "handle": "red-snowboard",
                "featuredMedia": null
            }
        }))
        .unwrap();
        let product = data.product.unwrap();
        assert!(product.featured_media.is_none());
    }

    #[test]
    fn test_deleted_product_response() {
        let data: qr_code_product::ResponseData =
            serde_json::from_value(serde_json::json!({ "product": null })).unwrap();
        assert!(data.product.is_none());
    }

    #[test]
    fn test_variant_update_variables_are_camel_case() {
        let json = serde_json::to_value(variant_price_update::Variables {
            product_id: "gid://shopify/Product/1".to_string(),
            variants: vec![variant_price_update::VariantInput {
                id: "gid://shopify/ProductVariant/2".to_string(),
                price: "12.50".to_string(),
            }],
        })
        .unwrap();
        assert_eq!(json["productId"], "gid://shopify/Product/1");
        assert_eq!(json["variants"][0]["price"], "12.50");
    }

    #[test]
    fn test_format_user_errors() {
        let errors = vec![
            UserError {
                field: Some(vec!["product".to_string(), "title".to_string()]),
                message: "can't be blank".to_string(),
            },
            UserError {
                field: None,
                message: "Something else".to_string(),
            },
        ];
        assert_eq!(
            format_user_errors(&errors),
            "product.title: can't be blank; : Something else"
        );
    }
}
