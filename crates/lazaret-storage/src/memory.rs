//! In-memory object store.
//!
//! A real backend rather than a stub: it holds full object state (body, tags,
//! metadata) and honors the same tag-replacement and copy-through semantics as
//! the S3 backend. Used for local development and integration tests. Buckets
//! are implicit and spring into existence on first write.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use lazaret_core::StoreRef;
use tokio::sync::RwLock;

use crate::traits::{ObjectStore, StorageError, StorageResult};

/// One stored object with the state the scanner touches.
#[derive(Debug, Clone, Default)]
pub struct StoredObject {
    pub data: Bytes,
    pub tags: Vec<(String, String)>,
    pub metadata: HashMap<String, String>,
}

/// In-memory object store backend.
///
/// Clones share the same underlying state, so a caller can keep a handle for
/// seeding and inspection while the pipeline holds the same store as
/// `Arc<dyn ObjectStore>`.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    buckets: Arc<RwLock<HashMap<String, HashMap<String, StoredObject>>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object body, replacing any existing object at the key.
    pub async fn put_object(&self, bucket: &str, key: &str, data: impl Into<Bytes>) {
        let mut buckets = self.buckets.write().await;
        buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                data: data.into(),
                ..Default::default()
            },
        );
    }

    /// Store an object body with metadata attached.
    pub async fn put_object_with_metadata(
        &self,
        bucket: &str,
        key: &str,
        data: impl Into<Bytes>,
        metadata: HashMap<String, String>,
    ) {
        let mut buckets = self.buckets.write().await;
        buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                data: data.into(),
                tags: Vec::new(),
                metadata,
            },
        );
    }

    /// Snapshot of one object, if present.
    pub async fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    /// Tags currently attached to an object, if present.
    pub async fn tags(&self, bucket: &str, key: &str) -> Option<Vec<(String, String)>> {
        self.object(bucket, key).await.map(|object| object.tags)
    }

    /// All keys currently stored in a bucket, sorted.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .map(|objects| {
                let mut keys: Vec<String> = objects.keys().cloned().collect();
                keys.sort();
                keys
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Bytes> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(|object| object.data.clone())
            .ok_or_else(|| StorageError::NotFound(format!("s3://{}/{}", bucket, key)))
    }

    async fn put_object_tags(
        &self,
        bucket: &str,
        key: &str,
        tags: &[(String, String)],
    ) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        let object = buckets
            .get_mut(bucket)
            .and_then(|objects| objects.get_mut(key))
            .ok_or_else(|| StorageError::NotFound(format!("s3://{}/{}", bucket, key)))?;
        object.tags = tags.to_vec();
        Ok(())
    }

    async fn copy_object(&self, source: &StoreRef, dest: &StoreRef) -> StorageResult<()> {
        let mut buckets = self.buckets.write().await;
        let object = buckets
            .get(&source.bucket)
            .and_then(|objects| objects.get(&source.key))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(source.uri()))?;
        buckets
            .entry(dest.bucket.clone())
            .or_default()
            .insert(dest.key.clone(), object);
        Ok(())
    }
}
