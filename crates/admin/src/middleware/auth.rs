//! Shop authentication extractors for admin.
//!
//! The shop is established upstream and stored in the session; these
//! extractors only read it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::set_sentry_shop;
use crate::models::{CurrentShop, session::keys};

/// Extractor that requires an authenticated shop.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireShop(shop): RequireShop) -> impl IntoResponse {
///     format!("Hello, {}!", shop.shop)
/// }
/// ```
pub struct RequireShop(pub CurrentShop);

/// Error returned when a handler needs a shop and the session has none.
#[derive(Debug)]
pub enum ShopAuthRejection {
    /// The session layer is not installed on this route.
    MissingSession,
    /// No shop is recorded in the session.
    Unauthorized,
}

impl IntoResponse for ShopAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession => {
                tracing::error!("RequireShop used on a route without a session layer");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireShop
where
    S: Send + Sync,
{
    type Rejection = ShopAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(ShopAuthRejection::MissingSession)?;

        let current: CurrentShop = session
            .get(keys::CURRENT_SHOP)
            .await
            .ok()
            .flatten()
            .ok_or(ShopAuthRejection::Unauthorized)?;

        set_sentry_shop(current.shop.as_str());
        Ok(Self(current))
    }
}

/// Record the authenticated shop in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_shop(
    session: &Session,
    shop: &CurrentShop,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_SHOP, shop).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use qr_codes_core::ShopDomain;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use super::*;

    async fn whoami(RequireShop(current): RequireShop) -> String {
        current.shop.to_string()
    }

    async fn login(session: Session) -> StatusCode {
        let shop = CurrentShop {
            shop: ShopDomain::parse("store.myshopify.com").unwrap(),
        };
        set_current_shop(&session, &shop).await.unwrap();
        StatusCode::NO_CONTENT
    }

    fn app() -> Router {
        let store = MemoryStore::default();
        Router::new()
            .route("/whoami", get(whoami))
            .route("/login", get(login))
            .layer(SessionManagerLayer::new(store).with_secure(false))
    }

    #[tokio::test]
    async fn test_rejects_without_shop() {
        let response = app()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_accepts_session_shop() {
        let app = app();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let cookie = response
            .headers()
            .get("set-cookie")
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("cookie", cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_session_layer() {
        let response = Router::new()
            .route("/whoami", get(whoami))
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
