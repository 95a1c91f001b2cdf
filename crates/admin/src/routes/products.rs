//! Product route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use rand::{Rng, seq::IndexedRandom};
use tracing::instrument;

use crate::{error::AppError, middleware::RequireShop, shopify::CreatedProduct, state::AppState};

const SAMPLE_COLORS: [&str; 4] = ["Red", "Orange", "Yellow", "Green"];

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/products/sample", post(create_sample))
}

/// Title and price (in cents) for a sample product.
fn sample_product<R: Rng + ?Sized>(rng: &mut R) -> (String, u32) {
    let color = SAMPLE_COLORS.choose(rng).copied().unwrap_or(SAMPLE_COLORS[0]);
    (format!("{color} Snowboard"), rng.random_range(100..10_000))
}

/// Format cents as a decimal price string.
fn format_price(cents: u32) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Create a sample snowboard product in the shop.
///
/// Gives a fresh development store something to link QR codes to.
#[instrument(skip_all)]
pub async fn create_sample(
    RequireShop(current): RequireShop,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedProduct>), AppError> {
    let (title, cents) = sample_product(&mut rand::rng());
    let client = state.shopify_for(&current.shop).await?;
    let product = client.create_product(&title, &format_price(cents)).await?;

    tracing::info!(shop = %current.shop, product_id = %product.id, %title, "Created sample product");
    Ok((StatusCode::CREATED, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_product() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let (title, cents) = sample_product(&mut rng);
            assert!(title.ends_with(" Snowboard"));
            assert!(SAMPLE_COLORS.iter().any(|c| title.starts_with(c)));
            assert!((100..10_000).contains(&cents));
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(100), "1.00");
        assert_eq!(format_price(1205), "12.05");
        assert_eq!(format_price(9999), "99.99");
    }
}
