//! Alert publishing
//!
//! Malicious verdicts fan out to an operator notification topic. The payload
//! is a human-readable JSON document; the subject carries the object key so
//! inbox filtering works without opening the message.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazaret_core::models::{DeploymentMode, StoreRef};
use uuid::Uuid;

const ALERT_TYPE: &str = "PROMPT_INJECTION_DETECTED";
const ACTION_TAKEN: &str = "File quarantined and tagged as Malicious";

/// One alert raised for a quarantined object.
#[derive(Debug, Clone)]
pub struct ScanAlert {
    pub scan_id: Uuid,
    pub store_ref: StoreRef,
    pub confidence: f64,
    pub threat_type: String,
    pub deployment_mode: DeploymentMode,
}

/// Publisher seam for operator alerts.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, alert: &ScanAlert) -> Result<()>;
}

/// Alert publisher backed by an SNS topic.
pub struct SnsAlertPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsAlertPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl AlertPublisher for SnsAlertPublisher {
    async fn publish(&self, alert: &ScanAlert) -> Result<()> {
        let payload = alert_payload(alert, Utc::now());
        let message =
            serde_json::to_string_pretty(&payload).context("Failed to serialize alert payload")?;

        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(alert_subject(&alert.store_ref.key))
            .message(message)
            .send()
            .await
            .context("Failed to publish alert")?;

        tracing::info!(scan_id = %alert.scan_id, "alert published");
        Ok(())
    }
}

fn alert_subject(key: &str) -> String {
    format!("Prompt Injection Detected - {}", key)
}

fn alert_payload(alert: &ScanAlert, at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "alert_type": ALERT_TYPE,
        "scan_id": alert.scan_id,
        "file": alert.store_ref.uri(),
        "confidence": format!("{:.2}%", alert.confidence * 100.0),
        "threat_type": alert.threat_type,
        "deployment_mode": alert.deployment_mode,
        "timestamp": at.to_rfc3339(),
        "action_taken": ACTION_TAKEN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_alert() -> ScanAlert {
        ScanAlert {
            scan_id: Uuid::new_v4(),
            store_ref: StoreRef::new("landing-docs", "uploads/report.pdf"),
            confidence: 0.9,
            threat_type: "PROMPT_INJECTION".to_string(),
            deployment_mode: DeploymentMode::DualBucket,
        }
    }

    #[test]
    fn test_alert_subject_carries_key() {
        assert_eq!(
            alert_subject("uploads/report.pdf"),
            "Prompt Injection Detected - uploads/report.pdf"
        );
    }

    #[test]
    fn test_alert_payload_fields() {
        let alert = sample_alert();
        let payload = alert_payload(&alert, Utc::now());

        assert_eq!(payload["alert_type"], "PROMPT_INJECTION_DETECTED");
        assert_eq!(payload["scan_id"], alert.scan_id.to_string());
        assert_eq!(payload["file"], "s3://landing-docs/uploads/report.pdf");
        assert_eq!(payload["confidence"], "90.00%");
        assert_eq!(payload["threat_type"], "PROMPT_INJECTION");
        assert_eq!(payload["deployment_mode"], "DualBucket");
        assert_eq!(
            payload["action_taken"],
            "File quarantined and tagged as Malicious"
        );
        assert!(payload["timestamp"].is_string());
    }

    #[test]
    fn test_alert_payload_confidence_formats_two_decimals() {
        let mut alert = sample_alert();
        alert.confidence = 0.5;
        let payload = alert_payload(&alert, Utc::now());
        assert_eq!(payload["confidence"], "50.00%");
    }
}
