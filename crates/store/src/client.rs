//! The capability interface consumed by the filesystem adapter.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use crate::error::Result;

/// Body of an object, delivered in chunks.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Results of a prefix listing, delivered one entry at a time.
pub type ListStream<'a> = BoxStream<'a, Result<ListEntry>>;

/// Native metadata the store keeps for a single object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Full key of the object within its container
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time reported by the store
    pub last_modified: DateTime<Utc>,
}

/// A single result of a prefix listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    /// Keys grouped up to the next separator, always ending in `/`.
    /// Only produced by non-recursive listings.
    Prefix(String),
    /// A leaf object
    Object(ObjectInfo),
}

/// Reference to an object used as the source of a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub container: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}

/// Flat, key-based object store.
///
/// Every call is a network round trip against the store and may fail
/// independently. Implementations impose no retries.
#[async_trait::async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Check whether `container` exists and is reachable.
    async fn bucket_exists(&self, container: &str) -> Result<bool>;

    /// Fetch the metadata of the object at `key`.
    async fn head_object(&self, container: &str, key: &str) -> Result<ObjectInfo>;

    /// Open the body of the object at `key`.
    async fn get_object(&self, container: &str, key: &str) -> Result<ByteStream>;

    /// Create or replace the object at `key`.
    async fn put_object(&self, container: &str, key: &str, data: Bytes) -> Result<()>;

    /// List entries under `prefix`.
    ///
    /// A non-recursive listing groups keys at the next separator into
    /// [`ListEntry::Prefix`] entries; a recursive listing returns every
    /// object under the prefix regardless of depth.
    fn list_objects<'a>(
        &'a self,
        container: &str,
        prefix: &str,
        recursive: bool,
    ) -> ListStream<'a>;

    /// Delete the object at `key`. Fails with `NotFound` if it is missing.
    async fn delete_object(&self, container: &str, key: &str) -> Result<()>;

    /// Copy `source` to `dest_key`, replacing any existing object there.
    async fn copy_object(
        &self,
        container: &str,
        dest_key: &str,
        source: &ObjectRef,
    ) -> Result<()>;
}
