//! HTTP responder that reports the current UTC time and the caller's IP.
//!
//! `GET /` answers with `{"timestamp": ..., "ip": ...}`, where `ip` is the
//! direct TCP peer. Requests are traced with `tracing` and counted with
//! `metrics`.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use visit::{Clock, SystemClock};

pub use config::Config;
pub use error::{ApiError, ServerError};
pub use server::{serve, serve_on, shutdown_signal};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub clock: Box<dyn Clock>,
}

/// Creates the Axum application router with its single route and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root::get))
        .method_not_allowed_fallback(routes::root::method_not_allowed)
        .fallback(routes::root::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state backed by the system clock.
pub fn create_default_state() -> Arc<AppState> {
    create_state(SystemClock)
}

/// Creates application state backed by `clock`.
pub fn create_state(clock: impl Clock + 'static) -> Arc<AppState> {
    Arc::new(AppState {
        clock: Box::new(clock),
    })
}
