//! API error types with HTTP response mapping.

use std::net::AddrParseError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

/// Request-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// No route matched the request path.
    NotFound(String),
    /// The path exists but does not accept the request method.
    MethodNotAllowed,
    /// The connection carried no peer socket address.
    PeerUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method not allowed".to_string(),
            ),
            ApiError::PeerUnavailable => {
                let msg = "peer address unavailable".to_string();
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not bind its address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The metrics exporter address is not a literal socket address.
    #[error("Invalid metrics address: {0}")]
    MetricsAddr(#[from] AddrParseError),

    /// The Prometheus exporter could not be installed.
    #[error("Metrics exporter error: {0}")]
    Metrics(#[from] BuildError),
}
