//! Object-store abstraction for the scanner.
//!
//! The scanner works across several buckets in one invocation (landing,
//! forensic, ingest), so unlike a bucket-scoped store every operation here
//! addresses objects explicitly by bucket and key. Backends implement the
//! minimal capability set the pipeline needs: download an object, replace
//! its tag set, and copy it between buckets with tags and metadata carried
//! through.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

pub use factory::create_object_store;
pub use keys::quarantine_key;
#[cfg(feature = "storage-memory")]
pub use memory::{MemoryObjectStore, StoredObject};
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectStore;
pub use traits::{ObjectStore, StorageError, StorageResult};
