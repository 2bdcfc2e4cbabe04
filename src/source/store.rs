//! Object store capability.

use async_trait::async_trait;
use bytes::Bytes;

/// Boxed transport error from a store implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One object retrieved from a store.
#[derive(Debug, Clone, Default)]
pub struct StoredObject {
    /// Content type recorded on the object, if any.
    pub content_type: Option<String>,
    /// Cache control directive recorded on the object, if any.
    pub cache_control: Option<String>,
    /// Raw object bytes.
    pub body: Bytes,
}

/// Get-object-by-key over a named container. Any key/value or blob store
/// exposing this shape qualifies (S3, GCS, an in-memory map in tests).
///
/// Implementations must be safe for concurrent use; this crate never
/// mutates through the handle.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieve the object stored under `key` in `bucket`.
    ///
    /// Returns `Ok(None)` when the key does not exist. Transport-level
    /// failures are returned as-is and left unclassified by the caller.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<StoredObject>, BoxError>;
}
