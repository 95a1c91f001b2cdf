//! QR Codes Admin - Merchant-facing QR code manager.
//!
//! This binary serves the QR code app on port 3001.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Shopify Admin API for product lookups (per-shop access tokens)
//! - `PostgreSQL` for QR codes, access tokens and sessions
//!
//! # Routes
//!
//! - Authenticated: QR code list/read/submit/delete, sample product creation
//! - Public: `/qrcodes/{id}/scan`, health checks

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qr_codes_admin::config::{AdminConfig, SentryConfig, TlsConfig};
use qr_codes_admin::db::{self, PgQrCodeStore};
use qr_codes_admin::middleware::create_session_layer;
use qr_codes_admin::state::AppState;

/// Seconds in-flight requests get to finish after a shutdown signal.
const GRACEFUL_SHUTDOWN_SECS: u64 = 30;

/// Start Sentry when a DSN is configured. The guard must outlive the server.
fn init_sentry(config: &SentryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.dsn.as_deref()?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config.environment.clone().map(Into::into),
            sample_rate: config.sample_rate,
            traces_sample_rate: config.traces_sample_rate,
            attach_stacktrace: true,
            // Shop domains only; shoppers are anonymous.
            send_default_pii: false,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Errors and warnings become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// JSON logs on Fly.io, human-readable text everywhere else.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "qr_codes_admin=info,tower_http=debug".into());

    let on_fly = std::env::var_os("FLY_APP_NAME").is_some();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(on_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true)))
        .with((!on_fly).then(tracing_subscriber::fmt::layer))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Request span carrying method, uri, request id, status and latency.
fn http_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    )
}

fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", response.status().as_u16());
    span.record(
        "latency_ms",
        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    );
    DefaultOnResponse::default().on_response(response, latency, span);
}

#[tokio::main]
async fn main() {
    // Must happen before any TLS use, including the Sentry transport.
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Sentry first so the tracing layer has a client to report to.
    let _sentry_guard = init_sentry(&config.sentry);
    init_tracing();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Migrations are applied by `qr-cli migrate`, never on startup.

    let session_layer = create_session_layer(&pool, &config);
    let store = Arc::new(PgQrCodeStore::new(pool.clone()));
    let state = AppState::new(config.clone(), pool, store);

    let app = qr_codes_admin::app()
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(http_span)
                .on_response(record_response),
        )
        .with_state(state)
        // Outermost, so Sentry sees every request.
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    match &config.tls {
        Some(tls) => serve_tls(app, addr, tls).await,
        None => {
            tracing::info!("admin listening on http://{addr}");
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .expect("Failed to bind to address");
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .expect("Server error");
        }
    }
}

async fn serve_tls(app: Router, addr: SocketAddr, tls: &TlsConfig) {
    let rustls_config = RustlsConfig::from_pem(
        tls.cert_pem.as_bytes().to_vec(),
        tls.key_pem.expose_secret().as_bytes().to_vec(),
    )
    .await
    .expect("Failed to load TLS certificates");

    tracing::info!("admin listening on https://{addr}");

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(Duration::from_secs(GRACEFUL_SHUTDOWN_SECS)));
    });

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
