use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::deployment::DeploymentMode;
use super::scan::ScanStatus;

/// Immutable record of one scan invocation.
///
/// Append-only and keyed by `scan_id`: rescanning the same object under a new
/// invocation appends a new record rather than overwriting an old one, so the
/// full scan history of an object is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub scan_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub bucket: String,
    pub key: String,
    pub status: ScanStatus,
    pub is_malicious: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,
    pub deployment_mode: DeploymentMode,
}
