//! Root endpoint and the fallbacks for unmatched paths and methods.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use visit::TimeStampedVisit;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::PeerAddr;

/// GET / — returns the current UTC time and the caller's IP address.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    PeerAddr(peer): PeerAddr,
) -> Json<TimeStampedVisit> {
    let visit = TimeStampedVisit::now(state.clock.as_ref(), peer);

    metrics::counter!("visits_served_total").increment(1);
    tracing::debug!(ip = %visit.ip, timestamp = %visit.timestamp, "visit served");

    Json(visit)
}

/// Fallback for any path without a route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}

/// Fallback for a non-GET method on `/`. The method router adds `Allow`.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
