//! Route configuration

pub mod health;
pub mod scans;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Upper bound on scan event bodies. Notifications are small JSON documents;
/// the object itself arrives through the store, not the request.
const MAX_EVENT_BODY_BYTES: usize = 64 * 1024;

/// Scans block on external calls for their full duration, so the number in
/// flight is capped rather than queued unbounded.
const MAX_CONCURRENT_SCANS: usize = 64;

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/scans", post(scans::create_scan))
        .route("/livez", get(health::liveness_check))
        .route("/healthz", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_SCANS))
        .layer(RequestBodyLimitLayer::new(MAX_EVENT_BODY_BYTES))
        .with_state(state)
}
