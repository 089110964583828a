use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single object in an object store, addressed by bucket and key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub bucket: String,
    pub key: String,
}

impl StoreRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Object URI in the `s3://bucket/key` form used in logs, findings, and alerts.
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    /// Final path segment of the key. The containing prefix is dropped.
    pub fn basename(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

impl Display for StoreRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// One scan invocation: the object to vet plus the id that ties together the
/// object tags, quarantine path, finding, alert, and audit record it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub store_ref: StoreRef,
    pub scan_id: Uuid,
}

impl ScanRequest {
    pub fn new(store_ref: StoreRef) -> Self {
        Self {
            store_ref,
            scan_id: Uuid::new_v4(),
        }
    }

    pub fn with_scan_id(store_ref: StoreRef, scan_id: Uuid) -> Self {
        Self { store_ref, scan_id }
    }
}

/// Terminal verdict for a scanned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    Empty,
    Clean,
    Malicious,
}

impl ScanStatus {
    /// The exact string recorded in object tags, audit records, and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Empty => "Empty",
            ScanStatus::Clean => "Clean",
            ScanStatus::Malicious => "Malicious",
        }
    }

    pub fn is_malicious(&self) -> bool {
        matches!(self, ScanStatus::Malicious)
    }
}

impl Display for ScanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScanStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Empty" => Ok(ScanStatus::Empty),
            "Clean" => Ok(ScanStatus::Clean),
            "Malicious" => Ok(ScanStatus::Malicious),
            _ => Err(anyhow::anyhow!("Invalid scan status: {}", s)),
        }
    }
}

/// Summary returned to the caller once a scan completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub status: ScanStatus,
    pub confidence: f64,
}
