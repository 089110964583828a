//! Disposition policy
//!
//! Pure decision logic: given the classification outcome and the deployment
//! topology, produce the status and the ordered action list. No I/O happens
//! here, which keeps every branch table-testable.

use lazaret_core::models::{ClassificationResult, Disposition, ScanAction, ScanStatus};

/// Decide the disposition for one scanned object.
///
/// `classification` is `None` when no text could be extracted; that is the
/// Empty disposition. Tagging always comes first so the object carries its
/// verdict even when a later action fails.
pub fn decide(
    classification: Option<&ClassificationResult>,
    ingest_copy_enabled: bool,
    alerts_enabled: bool,
) -> Disposition {
    let Some(classification) = classification else {
        return Disposition {
            status: ScanStatus::Empty,
            actions: vec![ScanAction::Tag(ScanStatus::Empty)],
        };
    };

    if classification.is_malicious() {
        let mut actions = vec![
            ScanAction::Tag(ScanStatus::Malicious),
            ScanAction::Quarantine,
            ScanAction::RaiseFinding,
        ];
        if alerts_enabled {
            actions.push(ScanAction::SendAlert);
        }
        return Disposition {
            status: ScanStatus::Malicious,
            actions,
        };
    }

    let mut actions = vec![ScanAction::Tag(ScanStatus::Clean)];
    if ingest_copy_enabled {
        actions.push(ScanAction::CopyToIngest);
    }
    Disposition {
        status: ScanStatus::Clean,
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazaret_core::models::ThreatDetail;

    fn malicious() -> ClassificationResult {
        ClassificationResult::malicious(
            0.9,
            ThreatDetail::PromptInjection {
                confidence_level: "HIGH".to_string(),
                filter_strength: None,
                action: "GUARDRAIL_INTERVENED".to_string(),
            },
        )
    }

    #[test]
    fn test_no_classification_is_empty_tag_only() {
        for (ingest, alerts) in [(false, false), (true, false), (false, true), (true, true)] {
            let disposition = decide(None, ingest, alerts);
            assert_eq!(disposition.status, ScanStatus::Empty);
            assert_eq!(disposition.actions, vec![ScanAction::Tag(ScanStatus::Empty)]);
        }
    }

    #[test]
    fn test_clean_single_bucket_tags_only() {
        let clean = ClassificationResult::clean();
        let disposition = decide(Some(&clean), false, true);
        assert_eq!(disposition.status, ScanStatus::Clean);
        assert_eq!(disposition.actions, vec![ScanAction::Tag(ScanStatus::Clean)]);
    }

    #[test]
    fn test_clean_dual_bucket_adds_ingest_copy() {
        let clean = ClassificationResult::clean();
        let disposition = decide(Some(&clean), true, true);
        assert_eq!(
            disposition.actions,
            vec![ScanAction::Tag(ScanStatus::Clean), ScanAction::CopyToIngest]
        );
    }

    #[test]
    fn test_malicious_with_alerts() {
        let disposition = decide(Some(&malicious()), true, true);
        assert_eq!(disposition.status, ScanStatus::Malicious);
        assert_eq!(
            disposition.actions,
            vec![
                ScanAction::Tag(ScanStatus::Malicious),
                ScanAction::Quarantine,
                ScanAction::RaiseFinding,
                ScanAction::SendAlert,
            ]
        );
    }

    #[test]
    fn test_malicious_without_alert_channel() {
        let disposition = decide(Some(&malicious()), false, false);
        assert_eq!(
            disposition.actions,
            vec![
                ScanAction::Tag(ScanStatus::Malicious),
                ScanAction::Quarantine,
                ScanAction::RaiseFinding,
            ]
        );
    }

    #[test]
    fn test_malicious_never_copies_to_ingest() {
        // Ingest promotion is for clean objects only, whatever the topology.
        let disposition = decide(Some(&malicious()), true, true);
        assert!(!disposition
            .actions
            .contains(&ScanAction::CopyToIngest));
    }
}
