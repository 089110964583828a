//! Scan coordination
//!
//! The pipeline for one triggering event: fetch → extract → classify →
//! decide → execute → audit. Fetch failure is the only error the caller
//! sees; from extraction onward every outcome, including a broken
//! classifier, resolves to a disposition and a report.

use std::sync::Arc;
use std::time::Instant;

use lazaret_core::models::{ScanReport, ScanRequest, ScanStatus};
use lazaret_core::AppError;
use lazaret_extract::DocumentKind;
use lazaret_services::guardrail::ThreatClassifier;
use lazaret_storage::ObjectStore;

use crate::audit::AuditRecorder;
use crate::executor::{ActionOutcome, DispositionExecutor};
use crate::policy::decide;

pub struct ScanCoordinator {
    store: Arc<dyn ObjectStore>,
    classifier: ThreatClassifier,
    executor: DispositionExecutor,
    audit: AuditRecorder,
    ingest_copy_enabled: bool,
    alerts_enabled: bool,
}

impl ScanCoordinator {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        classifier: ThreatClassifier,
        executor: DispositionExecutor,
        audit: AuditRecorder,
        ingest_copy_enabled: bool,
        alerts_enabled: bool,
    ) -> Self {
        Self {
            store,
            classifier,
            executor,
            audit,
            ingest_copy_enabled,
            alerts_enabled,
        }
    }

    /// Run one scan to completion.
    ///
    /// Returns an error only when the object cannot be fetched; no audit
    /// record is written in that case because no verdict was reached.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport, AppError> {
        let start = Instant::now();
        tracing::info!(scan_id = %request.scan_id, object = %request.store_ref, "scan started");

        // 1. Fetch the object
        let data = self
            .store
            .get_object(&request.store_ref.bucket, &request.store_ref.key)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        // 2. Extract text by document kind
        let kind = DocumentKind::from_key(&request.store_ref.key);
        let text = kind.extract_text(&data);

        // 3. Nothing to classify: tag as Empty and audit
        let Some(text) = text else {
            tracing::warn!(scan_id = %request.scan_id, key = %request.store_ref.key, format = kind.as_str(), "no text content extracted");
            return Ok(self.dispose_empty(request).await);
        };

        // 4. Content hash for the audit trail
        let file_hash = sha256_hex(text.as_bytes());

        // 5. Classify
        let classification = self.classifier.classify(&text).await;

        // 6. Decide the disposition
        let disposition = decide(
            Some(&classification),
            self.ingest_copy_enabled,
            self.alerts_enabled,
        );

        // 7. Apply the disposition actions
        let outcomes = self
            .executor
            .execute(request, Some(&classification), &disposition)
            .await;
        log_outcomes(request, &outcomes);

        // 8. Audit the verdict
        self.audit
            .record(
                request,
                disposition.status,
                classification.confidence,
                classification.threat_type().map(str::to_string),
                Some(file_hash),
            )
            .await;

        tracing::info!(
            scan_id = %request.scan_id,
            status = %disposition.status,
            confidence = classification.confidence,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "scan completed"
        );

        Ok(ScanReport {
            scan_id: request.scan_id,
            status: disposition.status,
            confidence: classification.confidence,
        })
    }

    async fn dispose_empty(&self, request: &ScanRequest) -> ScanReport {
        let disposition = decide(None, self.ingest_copy_enabled, self.alerts_enabled);
        let outcomes = self.executor.execute(request, None, &disposition).await;
        log_outcomes(request, &outcomes);

        self.audit
            .record(request, ScanStatus::Empty, 0.0, None, None)
            .await;

        ScanReport {
            scan_id: request.scan_id,
            status: ScanStatus::Empty,
            confidence: 0.0,
        }
    }
}

/// Per-invocation outcome list, logged once per scan.
fn log_outcomes(request: &ScanRequest, outcomes: &[ActionOutcome]) {
    let failed: Vec<String> = outcomes
        .iter()
        .filter_map(|o| {
            o.outcome
                .as_ref()
                .err()
                .map(|e| format!("{}: {}", o.action.name(), e))
        })
        .collect();

    if failed.is_empty() {
        tracing::info!(
            scan_id = %request.scan_id,
            actions = outcomes.len(),
            "all disposition actions completed"
        );
    } else {
        tracing::warn!(
            scan_id = %request.scan_id,
            actions = outcomes.len(),
            failed = ?failed,
            "disposition completed with failures"
        );
    }
}

fn sha256_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
