//! QR Codes Admin library.
//!
//! This crate provides the merchant-facing QR code app as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate holds per-shop Shopify Admin API access tokens. Every QR code
//! operation is scoped to the shop recorded in the session; only the public
//! scan endpoint works without one.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use state::AppState;

/// Build the full router: health checks plus application routes.
///
/// Session, tracing and Sentry layers are added by the binary.
pub fn app() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
