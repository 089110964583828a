use crate::traits::{ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::types::{MetadataDirective, Tag, Tagging, TaggingDirective};
use aws_sdk_s3::Client;
use bytes::Bytes;
use lazaret_core::StoreRef;

/// S3 object-store implementation
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Create a new S3ObjectStore instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(region: String, endpoint_url: Option<String>) -> Self {
        let region_provider = RegionProviderChain::first_try(aws_config::Region::new(region));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(5)
            .with_retry_mode(RetryMode::Adaptive);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config)
            .load()
            .await;

        // Custom endpoints (MinIO and friends) need path-style addressing
        let client = if let Some(ref endpoint) = endpoint_url {
            let s3_config = aws_sdk_s3::config::Builder::from(&config)
                .endpoint_url(endpoint)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        } else {
            Client::new(&config)
        };

        S3ObjectStore { client }
    }

    /// Wrap an existing client (used when the process already built one).
    pub fn from_client(client: Client) -> Self {
        S3ObjectStore { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    GetObjectError::NoSuchKey(_) => {
                        StorageError::NotFound(format!("s3://{}/{}", bucket, key))
                    }
                    _ => {
                        tracing::error!(
                            error = %e,
                            bucket = %bucket,
                            key = %key,
                            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                            "S3 download failed"
                        );
                        StorageError::DownloadFailed(e.to_string())
                    }
                },
                _ => {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket,
                        key = %key,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "S3 download failed"
                    );
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        let bytes = data.into_bytes();

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes)
    }

    async fn put_object_tags(
        &self,
        bucket: &str,
        key: &str,
        tags: &[(String, String)],
    ) -> StorageResult<()> {
        let start = std::time::Instant::now();

        let mut tag_set = Vec::with_capacity(tags.len());
        for (tag_key, tag_value) in tags {
            let tag = Tag::builder()
                .key(tag_key)
                .value(tag_value)
                .build()
                .map_err(|e| StorageError::TagFailed(e.to_string()))?;
            tag_set.push(tag);
        }
        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(|e| StorageError::TagFailed(e.to_string()))?;

        self.client
            .put_object_tagging()
            .bucket(bucket)
            .key(key)
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 tagging failed"
                );
                StorageError::TagFailed(e.to_string())
            })?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            tag_count = tags.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 tagging successful"
        );

        Ok(())
    }

    async fn copy_object(&self, source: &StoreRef, dest: &StoreRef) -> StorageResult<()> {
        let start = std::time::Instant::now();

        // URL-encode the copy source per AWS S3 API requirements
        let encoded_key = urlencoding::encode(&source.key);
        let copy_source = format!("{}/{}", source.bucket, encoded_key);

        self.client
            .copy_object()
            .copy_source(&copy_source)
            .bucket(&dest.bucket)
            .key(&dest.key)
            .tagging_directive(TaggingDirective::Copy)
            .metadata_directive(MetadataDirective::Copy)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    from = %source,
                    to = %dest,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 copy failed"
                );
                StorageError::CopyFailed(e.to_string())
            })?;

        tracing::info!(
            from = %source,
            to = %dest,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 copy successful"
        );

        Ok(())
    }
}
