//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors and transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Request ID (propagate or mint `x-request-id`)
//!
//! Shop authentication is an extractor ([`RequireShop`]) applied per handler,
//! so the public scan route needs no session.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{RequireShop, ShopAuthRejection, set_current_shop};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
