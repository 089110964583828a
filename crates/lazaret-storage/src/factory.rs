#[cfg(feature = "storage-memory")]
use crate::MemoryObjectStore;
#[cfg(feature = "storage-s3")]
use crate::S3ObjectStore;
use crate::{ObjectStore, StorageError, StorageResult};
use lazaret_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create an object store backend based on configuration
pub async fn create_object_store(config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    let backend = config.storage_backend.unwrap_or(StorageBackend::S3);

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.aws_region.clone().ok_or_else(|| {
                StorageError::ConfigError("AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint.clone();

            let store = S3ObjectStore::new(region, endpoint).await;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => Ok(Arc::new(MemoryObjectStore::new())),

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-memory"))]
mod tests {
    use super::*;
    use lazaret_core::models::DeploymentMode;

    fn memory_config() -> Config {
        Config {
            server_port: 4000,
            environment: "development".to_string(),
            audit_table_name: "scan-audit".to_string(),
            forensic_bucket_name: "forensic-store".to_string(),
            alert_topic_arn: None,
            guardrail_id: None,
            guardrail_version: "DRAFT".to_string(),
            classifier_endpoint: None,
            classifier_timeout_secs: 30,
            deployment_mode: DeploymentMode::SingleBucket,
            ingest_bucket_name: None,
            storage_backend: Some(StorageBackend::Memory),
            aws_region: None,
            s3_endpoint: None,
        }
    }

    #[tokio::test]
    async fn test_create_memory_backend() {
        let store = create_object_store(&memory_config())
            .await
            .expect("memory backend");

        let err = store.get_object("landing", "missing.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
