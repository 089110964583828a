//! Scan endpoint
//!
//! Accepts the object-created notification and runs one scan to completion.
//! Extra event fields are ignored; a body that does not deserialize is
//! rejected at the extractor boundary before the pipeline runs.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use lazaret_core::models::{ScanRequest, StoreRef};
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Object-created notification, in the shape the landing bucket emits.
#[derive(Debug, Deserialize)]
pub struct ObjectCreatedEvent {
    pub detail: EventDetail,
}

#[derive(Debug, Deserialize)]
pub struct EventDetail {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

pub async fn create_scan(
    State(state): State<Arc<AppState>>,
    Json(event): Json<ObjectCreatedEvent>,
) -> Result<impl IntoResponse, HttpAppError> {
    let store_ref = StoreRef::new(event.detail.bucket.name, event.detail.object.key);
    let request = ScanRequest::new(store_ref);

    let report = state.coordinator.scan(&request).await?;

    Ok(Json(report))
}
