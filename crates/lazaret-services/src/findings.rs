//! Security findings registry
//!
//! Malicious verdicts are reported to the provider's security findings
//! service in the ASFF import shape. The registry sits behind a trait so the
//! pipeline can record findings in memory during tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_securityhub::types::{
    AwsSecurityFinding, Compliance, ComplianceStatus, Recommendation, Remediation, Resource,
    Severity, SeverityLabel,
};
use chrono::{SecondsFormat, Utc};
use lazaret_core::models::StoreRef;
use uuid::Uuid;

const SCHEMA_VERSION: &str = "2018-10-08";
const GENERATOR_ID: &str = "lazaret-scanner";
const FINDING_TYPE: &str = "Software and Configuration Checks/Vulnerabilities/Prompt Injection";
const FINDING_TITLE: &str = "Prompt Injection Attack Detected in RAG Document";
const REMEDIATION_TEXT: &str =
    "File has been quarantined. Review forensic bucket for analysis.";

/// One finding to raise against the scanned object.
#[derive(Debug, Clone)]
pub struct SecurityFinding {
    pub scan_id: Uuid,
    pub store_ref: StoreRef,
    pub confidence: f64,
    pub threat_type: String,
}

/// Registry seam for raising security findings.
#[async_trait]
pub trait FindingsRegistry: Send + Sync {
    async fn raise(&self, finding: &SecurityFinding) -> Result<()>;
}

/// Findings registry backed by the provider's security hub.
pub struct SecurityHubFindings {
    client: aws_sdk_securityhub::Client,
    account_id: String,
    region: String,
    forensic_bucket: String,
}

impl SecurityHubFindings {
    pub fn new(
        client: aws_sdk_securityhub::Client,
        account_id: impl Into<String>,
        region: impl Into<String>,
        forensic_bucket: impl Into<String>,
    ) -> Self {
        Self {
            client,
            account_id: account_id.into(),
            region: region.into(),
            forensic_bucket: forensic_bucket.into(),
        }
    }
}

#[async_trait]
impl FindingsRegistry for SecurityHubFindings {
    async fn raise(&self, finding: &SecurityFinding) -> Result<()> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let severity = Severity::builder()
            .label(severity_label(finding.confidence))
            .normalized(normalized_severity(finding.confidence))
            .build();

        let resource = Resource::builder()
            .r#type("AwsS3Object")
            .id(format!(
                "arn:aws:s3:::{}/{}",
                finding.store_ref.bucket, finding.store_ref.key
            ))
            .region(&self.region)
            .build();

        let remediation = Remediation::builder()
            .recommendation(
                Recommendation::builder()
                    .text(REMEDIATION_TEXT)
                    .url(format!(
                        "https://s3.console.aws.amazon.com/s3/buckets/{}",
                        self.forensic_bucket
                    ))
                    .build(),
            )
            .build();

        let asff_finding = AwsSecurityFinding::builder()
            .schema_version(SCHEMA_VERSION)
            .id(format!("{}/{}", finding.scan_id, finding.store_ref.key))
            .product_arn(format!(
                "arn:aws:securityhub:{}:{}:product/{}/default",
                self.region, self.account_id, self.account_id
            ))
            .generator_id(GENERATOR_ID)
            .aws_account_id(&self.account_id)
            .types(FINDING_TYPE)
            .created_at(&now)
            .updated_at(&now)
            .severity(severity)
            .title(FINDING_TITLE)
            .description(finding_description(
                &finding.store_ref,
                finding.confidence,
                &finding.threat_type,
            ))
            .resources(resource)
            .compliance(
                Compliance::builder()
                    .status(ComplianceStatus::Failed)
                    .build(),
            )
            .remediation(remediation)
            .build();

        self.client
            .batch_import_findings()
            .findings(asff_finding)
            .send()
            .await
            .context("Failed to import security finding")?;

        tracing::info!(scan_id = %finding.scan_id, "security finding raised");
        Ok(())
    }
}

fn severity_label(confidence: f64) -> SeverityLabel {
    if confidence > 0.8 {
        SeverityLabel::High
    } else {
        SeverityLabel::Medium
    }
}

fn normalized_severity(confidence: f64) -> i32 {
    (confidence * 100.0).round() as i32
}

fn finding_description(store_ref: &StoreRef, confidence: f64, threat_type: &str) -> String {
    format!(
        "Malicious content detected in document: {}. Confidence: {:.2}%. Threat type: {}",
        store_ref.uri(),
        confidence * 100.0,
        threat_type
    )
}
