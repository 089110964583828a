//! Audit store
//!
//! Every scan that reaches disposition appends exactly one record to the
//! audit table, keyed by scan id. The store never updates in place.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use lazaret_core::models::AuditRecord;

/// Append-only store for scan audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<()>;
}

/// Audit store backed by a DynamoDB table.
pub struct DynamoAuditStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoAuditStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl AuditStore for DynamoAuditStore {
    async fn append(&self, record: &AuditRecord) -> Result<()> {
        // Confidence is stored as a string so the table never loses the exact
        // value to numeric coercion.
        let mut request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("scan_id", AttributeValue::S(record.scan_id.to_string()))
            .item(
                "timestamp",
                AttributeValue::S(record.timestamp.to_rfc3339()),
            )
            .item("bucket", AttributeValue::S(record.bucket.clone()))
            .item("key", AttributeValue::S(record.key.clone()))
            .item("status", AttributeValue::S(record.status.to_string()))
            .item("is_malicious", AttributeValue::Bool(record.is_malicious))
            .item(
                "confidence",
                AttributeValue::S(record.confidence.to_string()),
            )
            .item(
                "deployment_mode",
                AttributeValue::S(record.deployment_mode.to_string()),
            );

        if let Some(threat_type) = &record.threat_type {
            request = request.item("threat_type", AttributeValue::S(threat_type.clone()));
        }
        if let Some(file_hash) = &record.file_hash {
            request = request.item("file_hash", AttributeValue::S(file_hash.clone()));
        }

        request
            .send()
            .await
            .context("Failed to write audit record")?;

        tracing::info!(scan_id = %record.scan_id, "audit record written");
        Ok(())
    }
}
