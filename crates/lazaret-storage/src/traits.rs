//! Storage abstraction trait
//!
//! This module defines the ObjectStore trait that all storage backends must
//! implement.

use async_trait::async_trait;
use bytes::Bytes;
use lazaret_core::StoreRef;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Tagging failed: {0}")]
    TagFailed(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All backends (S3, in-memory) must implement this trait. It carries exactly
/// the capabilities the scan pipeline needs; anything wider (uploads, deletes,
/// listings) belongs to the systems that feed the landing bucket, not here.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the full object body.
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes>;

    /// Replace the object's tag set with the given key/value pairs.
    ///
    /// Any previously attached tags are dropped, not merged.
    async fn put_object_tags(
        &self,
        bucket: &str,
        key: &str,
        tags: &[(String, String)],
    ) -> StorageResult<()>;

    /// Copy an object between buckets, carrying its tags and metadata through
    /// unchanged.
    async fn copy_object(&self, source: &StoreRef, dest: &StoreRef) -> StorageResult<()>;
}
