use serde::{Deserialize, Serialize};

use super::scan::ScanStatus;

/// Detail attached to a malicious verdict.
///
/// `PromptInjection` carries the classifier's own vocabulary (confidence level,
/// filter strength, intervening action) so findings and alerts can report it
/// verbatim. `ScanError` marks a verdict produced by the fail-closed path when
/// the classifier call itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ThreatDetail {
    #[serde(rename = "PROMPT_INJECTION")]
    PromptInjection {
        confidence_level: String,
        filter_strength: Option<String>,
        action: String,
    },
    #[serde(rename = "SCAN_ERROR")]
    ScanError { error: String },
}

impl ThreatDetail {
    /// Threat type label recorded in findings, alerts, and audit records.
    pub fn threat_type(&self) -> &'static str {
        match self {
            ThreatDetail::PromptInjection { .. } => "PROMPT_INJECTION",
            ThreatDetail::ScanError { .. } => "SCAN_ERROR",
        }
    }
}

/// Verdict produced by the threat classifier for non-empty content.
///
/// Invariant: `threat` is present iff `status` is Malicious. The constructors
/// are the only way callers should build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: ScanStatus,
    pub confidence: f64,
    pub threat: Option<ThreatDetail>,
}

impl ClassificationResult {
    pub fn clean() -> Self {
        Self {
            status: ScanStatus::Clean,
            confidence: 0.0,
            threat: None,
        }
    }

    pub fn malicious(confidence: f64, threat: ThreatDetail) -> Self {
        Self {
            status: ScanStatus::Malicious,
            confidence,
            threat: Some(threat),
        }
    }

    pub fn threat_type(&self) -> Option<&'static str> {
        self.threat.as_ref().map(ThreatDetail::threat_type)
    }

    pub fn is_malicious(&self) -> bool {
        self.status.is_malicious()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_has_no_threat() {
        let result = ClassificationResult::clean();
        assert_eq!(result.status, ScanStatus::Clean);
        assert_eq!(result.confidence, 0.0);
        assert!(result.threat.is_none());
        assert_eq!(result.threat_type(), None);
    }

    #[test]
    fn test_malicious_carries_threat() {
        let result = ClassificationResult::malicious(
            0.9,
            ThreatDetail::PromptInjection {
                confidence_level: "HIGH".to_string(),
                filter_strength: Some("HIGH".to_string()),
                action: "GUARDRAIL_INTERVENED".to_string(),
            },
        );
        assert!(result.is_malicious());
        assert_eq!(result.threat_type(), Some("PROMPT_INJECTION"));
    }

    #[test]
    fn test_scan_error_threat_type() {
        let detail = ThreatDetail::ScanError {
            error: "connection refused".to_string(),
        };
        assert_eq!(detail.threat_type(), "SCAN_ERROR");
    }

    #[test]
    fn test_threat_detail_serialized_type_tag() {
        let detail = ThreatDetail::PromptInjection {
            confidence_level: "MEDIUM".to_string(),
            filter_strength: None,
            action: "GUARDRAIL_INTERVENED".to_string(),
        };
        let json = serde_json::to_value(&detail).expect("serialize");
        assert_eq!(
            json.get("type").and_then(|v| v.as_str()),
            Some("PROMPT_INJECTION")
        );
    }
}
