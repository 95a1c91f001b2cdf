//! Public scan endpoint.
//!
//! This is the URL a printed QR code encodes. It needs no session: the
//! shopper scanning the code is anonymous.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::instrument;

use qr_codes_core::QrCodeRef;

use crate::{error::AppError, state::AppState};

/// Build the scan router.
pub fn router() -> Router<AppState> {
    Router::new().route("/qrcodes/{id}/scan", get(scan))
}

/// Count a scan and redirect to the code's destination.
#[instrument(skip(state))]
pub async fn scan(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound(format!("QR code {id}"));

    let id = id
        .parse::<QrCodeRef>()
        .ok()
        .and_then(QrCodeRef::id)
        .ok_or_else(not_found)?;

    let destination = state.qr_codes().scan(id).await?;
    tracing::debug!(%destination, "Redirecting scan");

    Ok((StatusCode::FOUND, [(LOCATION, destination)]).into_response())
}
