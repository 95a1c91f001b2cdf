//! QR code route handlers.
//!
//! Each handler turns the request into an [`Intent`], dispatches it for the
//! session's shop, and renders the [`Outcome`]. The shop's access token is
//! only read for intents that look up products.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::instrument;

use qr_codes_core::{QrCodeId, QrCodeRef};

use crate::{
    error::AppError,
    middleware::RequireShop,
    models::{FieldErrors, QrCodeDraft},
    services::qr_codes::{Intent, Outcome},
    state::AppState,
};

/// Build the QR code router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/qrcodes", get(index))
        .route("/qrcodes/{id}", get(show).post(submit).delete(delete))
        .route("/qrcodes/{id}/delete", post(delete))
}

/// Body of a rejected submission.
#[derive(Debug, Serialize)]
struct RejectedResponse {
    errors: FieldErrors,
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::List(rows) => Json(rows).into_response(),
            Self::Detail(detail) => Json(detail).into_response(),
            Self::Redirect(navigation) => Redirect::to(&navigation.path()).into_response(),
            Self::Rejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(RejectedResponse { errors }),
            )
                .into_response(),
        }
    }
}

/// Parse the `{id}` path segment.
fn parse_target(raw: &str) -> Result<QrCodeRef, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("QR code {raw}")))
}

/// Parse the `{id}` path segment, refusing the `new` sentinel.
fn parse_existing(raw: &str) -> Result<QrCodeId, AppError> {
    parse_target(raw)?
        .id()
        .ok_or_else(|| AppError::BadRequest("QR code has not been saved".to_string()))
}

/// Run an intent for the session's shop.
async fn run(state: &AppState, current: RequireShop, intent: Intent) -> Result<Outcome, AppError> {
    let RequireShop(current) = current;
    let catalog = if intent.needs_catalog() {
        state.shopify_for(&current.shop).await?
    } else {
        state.shopify().for_shop(&current.shop, None)
    };
    Ok(state
        .qr_codes()
        .dispatch(&current.shop, intent, &catalog)
        .await?)
}

/// List the shop's QR codes.
#[instrument(skip_all)]
pub async fn index(
    current: RequireShop,
    State(state): State<AppState>,
) -> Result<Outcome, AppError> {
    run(&state, current, Intent::List).await
}

/// Show one QR code, or the blank template for `new`.
#[instrument(skip(current, state))]
pub async fn show(
    current: RequireShop,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, AppError> {
    let target = parse_target(&id)?;
    run(&state, current, Intent::Read(target)).await
}

/// Create (`new`) or update a QR code.
#[instrument(skip(current, state, draft))]
pub async fn submit(
    current: RequireShop,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(draft): Form<QrCodeDraft>,
) -> Result<Outcome, AppError> {
    let target = parse_target(&id)?.into();
    run(&state, current, Intent::Submit { target, draft }).await
}

/// Delete a QR code.
#[instrument(skip(current, state))]
pub async fn delete(
    current: RequireShop,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, AppError> {
    let id = parse_existing(&id)?;
    run(&state, current, Intent::Delete(id)).await
}
