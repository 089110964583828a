use serde::{Deserialize, Serialize};

use super::scan::ScanStatus;

/// One side effect the disposition executor applies to a scanned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAction {
    /// Write the scan outcome onto the source object as store tags.
    Tag(ScanStatus),
    /// Copy the object into the forensic store under a dated quarantine key.
    Quarantine,
    /// Copy the object into the ingest store under its original key.
    CopyToIngest,
    /// Import a finding into the security-findings registry.
    RaiseFinding,
    /// Publish a notification to the alert channel.
    SendAlert,
}

impl ScanAction {
    /// Short name used in structured logs and outcome lists.
    pub fn name(&self) -> &'static str {
        match self {
            ScanAction::Tag(_) => "tag",
            ScanAction::Quarantine => "quarantine",
            ScanAction::CopyToIngest => "copy_to_ingest",
            ScanAction::RaiseFinding => "raise_finding",
            ScanAction::SendAlert => "send_alert",
        }
    }
}

/// The actions decided for one scan, in the order the executor attempts them.
///
/// Derived deterministically from the classification outcome and deployment
/// mode; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disposition {
    pub status: ScanStatus,
    pub actions: Vec<ScanAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(ScanAction::Tag(ScanStatus::Clean).name(), "tag");
        assert_eq!(ScanAction::Quarantine.name(), "quarantine");
        assert_eq!(ScanAction::CopyToIngest.name(), "copy_to_ingest");
        assert_eq!(ScanAction::RaiseFinding.name(), "raise_finding");
        assert_eq!(ScanAction::SendAlert.name(), "send_alert");
    }
}
