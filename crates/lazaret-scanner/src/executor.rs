//! Disposition execution
//!
//! Applies the decided actions against the object store and the provider
//! services. Actions are isolated from one another: a failed action is
//! recorded in the outcome list and the executor moves on, so a tagging
//! outage cannot stop a quarantine. Rollback is deliberately absent; partial
//! completion is visible in the outcome list and the logs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazaret_core::models::{
    ClassificationResult, DeploymentMode, Disposition, ScanAction, ScanRequest, ScanStatus,
    StoreRef,
};
use lazaret_services::alerts::{AlertPublisher, ScanAlert};
use lazaret_services::findings::{FindingsRegistry, SecurityFinding};
use lazaret_storage::{quarantine_key, ObjectStore};
use uuid::Uuid;

/// Result of one attempted disposition action.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub action: ScanAction,
    pub outcome: Result<(), String>,
}

impl ActionOutcome {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub struct DispositionExecutor {
    store: Arc<dyn ObjectStore>,
    findings: Arc<dyn FindingsRegistry>,
    alerts: Arc<dyn AlertPublisher>,
    forensic_bucket: String,
    ingest_bucket: Option<String>,
    deployment_mode: DeploymentMode,
}

impl DispositionExecutor {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        findings: Arc<dyn FindingsRegistry>,
        alerts: Arc<dyn AlertPublisher>,
        forensic_bucket: impl Into<String>,
        ingest_bucket: Option<String>,
        deployment_mode: DeploymentMode,
    ) -> Self {
        Self {
            store,
            findings,
            alerts,
            forensic_bucket: forensic_bucket.into(),
            ingest_bucket,
            deployment_mode,
        }
    }

    /// Attempt every action in order and report each outcome.
    pub async fn execute(
        &self,
        request: &ScanRequest,
        classification: Option<&ClassificationResult>,
        disposition: &Disposition,
    ) -> Vec<ActionOutcome> {
        let mut outcomes = Vec::with_capacity(disposition.actions.len());

        for action in &disposition.actions {
            let result = match action {
                ScanAction::Tag(status) => self.tag(request, *status).await,
                ScanAction::Quarantine => self.quarantine(request).await,
                ScanAction::CopyToIngest => self.copy_to_ingest(request).await,
                ScanAction::RaiseFinding => self.raise_finding(request, classification).await,
                ScanAction::SendAlert => self.send_alert(request, classification).await,
            };

            if let Err(ref e) = result {
                tracing::error!(
                    scan_id = %request.scan_id,
                    action = action.name(),
                    error = %e,
                    "disposition action failed"
                );
            }

            outcomes.push(ActionOutcome {
                action: *action,
                outcome: result.map_err(|e| format!("{:#}", e)),
            });
        }

        outcomes
    }

    async fn tag(&self, request: &ScanRequest, status: ScanStatus) -> anyhow::Result<()> {
        let tags = scan_tags(status, request.scan_id, Utc::now());
        self.store
            .put_object_tags(&request.store_ref.bucket, &request.store_ref.key, &tags)
            .await?;
        tracing::info!(
            scan_id = %request.scan_id,
            key = %request.store_ref.key,
            status = %status,
            "object tagged"
        );
        Ok(())
    }

    async fn quarantine(&self, request: &ScanRequest) -> anyhow::Result<()> {
        let forensic_key = quarantine_key(request.scan_id, &request.store_ref.key, Utc::now());
        let dest = StoreRef::new(&self.forensic_bucket, forensic_key);
        self.store.copy_object(&request.store_ref, &dest).await?;
        tracing::info!(scan_id = %request.scan_id, destination = %dest, "object quarantined");
        Ok(())
    }

    async fn copy_to_ingest(&self, request: &ScanRequest) -> anyhow::Result<()> {
        let Some(ingest_bucket) = self.ingest_bucket.as_deref() else {
            anyhow::bail!("ingest bucket not configured");
        };
        let dest = StoreRef::new(ingest_bucket, &request.store_ref.key);
        self.store.copy_object(&request.store_ref, &dest).await?;
        tracing::info!(scan_id = %request.scan_id, destination = %dest, "object promoted to ingest");
        Ok(())
    }

    async fn raise_finding(
        &self,
        request: &ScanRequest,
        classification: Option<&ClassificationResult>,
    ) -> anyhow::Result<()> {
        let finding = SecurityFinding {
            scan_id: request.scan_id,
            store_ref: request.store_ref.clone(),
            confidence: classification.map(|c| c.confidence).unwrap_or(0.0),
            threat_type: threat_type_label(classification).to_string(),
        };
        self.findings.raise(&finding).await
    }

    async fn send_alert(
        &self,
        request: &ScanRequest,
        classification: Option<&ClassificationResult>,
    ) -> anyhow::Result<()> {
        let alert = ScanAlert {
            scan_id: request.scan_id,
            store_ref: request.store_ref.clone(),
            confidence: classification.map(|c| c.confidence).unwrap_or(0.0),
            threat_type: threat_type_label(classification).to_string(),
            deployment_mode: self.deployment_mode,
        };
        self.alerts.publish(&alert).await
    }
}

/// The tag set written onto a scanned object. Replaces any existing tags.
fn scan_tags(status: ScanStatus, scan_id: Uuid, at: DateTime<Utc>) -> Vec<(String, String)> {
    vec![
        ("ScanStatus".to_string(), status.to_string()),
        ("ScanId".to_string(), scan_id.to_string()),
        ("ScanTimestamp".to_string(), at.to_rfc3339()),
    ]
}

fn threat_type_label(classification: Option<&ClassificationResult>) -> &'static str {
    classification
        .and_then(ClassificationResult::threat_type)
        .unwrap_or("UNKNOWN")
}
