//! Audit recording
//!
//! Builds the audit record for one completed scan and appends it. Append
//! failures are logged and swallowed: the scan verdict already stands, and
//! the record carries no state later steps depend on.

use std::sync::Arc;

use chrono::Utc;
use lazaret_core::models::{AuditRecord, DeploymentMode, ScanRequest, ScanStatus};
use lazaret_services::audit::AuditStore;

pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
    deployment_mode: DeploymentMode,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>, deployment_mode: DeploymentMode) -> Self {
        Self {
            store,
            deployment_mode,
        }
    }

    /// Append the record for one scan. Exactly one call happens per scan that
    /// reaches disposition.
    pub async fn record(
        &self,
        request: &ScanRequest,
        status: ScanStatus,
        confidence: f64,
        threat_type: Option<String>,
        file_hash: Option<String>,
    ) {
        let record = AuditRecord {
            scan_id: request.scan_id,
            timestamp: Utc::now(),
            bucket: request.store_ref.bucket.clone(),
            key: request.store_ref.key.clone(),
            status,
            is_malicious: status.is_malicious(),
            confidence,
            threat_type,
            file_hash,
            deployment_mode: self.deployment_mode,
        };

        if let Err(e) = self.store.append(&record).await {
            tracing::error!(scan_id = %request.scan_id, error = %e, "audit append failed");
        }
    }
}
