//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::QrCodeError;
use crate::shopify::AdminShopifyError;

/// Application-level error type for the admin app.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No shop is attached to the session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QrCodeError> for AppError {
    fn from(err: QrCodeError) -> Self {
        match err {
            QrCodeError::NotFound(id) => Self::NotFound(format!("QR code {id}")),
            QrCodeError::Store(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Shopify(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shopify(AdminShopifyError::NoAccessToken(_)) => StatusCode::CONFLICT,
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Shopify(AdminShopifyError::NoAccessToken(_)) => {
                "Shop is not connected to Shopify".to_string()
            }
            Self::Shopify(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Tag Sentry events with the shop a request acts for.
pub fn set_sentry_shop(shop: &str) {
    sentry::configure_scope(|scope| {
        scope.set_tag("shop", shop);
    });
}

#[cfg(test)]
mod tests {
    use qr_codes_core::QrCodeId;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("QR code 12".to_string());
        assert_eq!(err.to_string(), "Not found: QR code 12");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Shopify(AdminShopifyError::RateLimited(5))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Shopify(AdminShopifyError::NoAccessToken(
                "store.myshopify.com".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_qr_code_errors_map_to_app_errors() {
        let err = AppError::from(QrCodeError::NotFound(QrCodeId::new(4)));
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);

        let err = AppError::from(QrCodeError::Store(RepositoryError::DataCorruption(
            "bad row".to_string(),
        )));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
