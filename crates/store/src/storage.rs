//! Object storage backend (S3/MinIO/local filesystem/memory).

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectMeta, ObjectStore, PutPayload};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::client::{ByteStream, ListEntry, ListStream, ObjectInfo, ObjectRef, ObjectStoreClient};
use crate::error::{Result, StoreError};

/// Configuration for the object storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectStoreConfig {
    /// In-memory storage (for testing)
    Memory {
        /// Container name the store answers to
        bucket: String,
    },

    /// Local filesystem storage
    Local {
        /// Path to the storage directory
        path: PathBuf,
        /// Container name the store answers to
        bucket: String,
    },

    /// S3-compatible storage (AWS S3, MinIO, etc.)
    S3 {
        /// S3 endpoint URL (e.g., "http://localhost:9000" for MinIO)
        endpoint: String,
        /// Access key ID
        access_key: String,
        /// Secret access key
        secret_key: String,
        /// Bucket name
        bucket: String,
        /// Optional region (defaults to "us-east-1")
        region: Option<String>,
    },
}

impl ObjectStoreConfig {
    /// The container this configuration points at.
    pub fn bucket(&self) -> &str {
        match self {
            ObjectStoreConfig::Memory { bucket }
            | ObjectStoreConfig::Local { bucket, .. }
            | ObjectStoreConfig::S3 { bucket, .. } => bucket,
        }
    }
}

/// Object store client serving a single container.
#[derive(Debug, Clone)]
pub struct Storage {
    inner: Arc<dyn ObjectStore>,
    bucket: String,
}

impl Storage {
    /// Create a new storage backend from configuration.
    pub async fn new(config: ObjectStoreConfig) -> Result<Self> {
        let inner: Arc<dyn ObjectStore> = match &config {
            ObjectStoreConfig::Memory { .. } => Arc::new(InMemory::new()),

            ObjectStoreConfig::Local { path, .. } => {
                // Ensure directory exists
                tokio::fs::create_dir_all(path).await?;
                Arc::new(
                    LocalFileSystem::new_with_prefix(path)
                        .map_err(|e| StoreError::InvalidConfig(e.to_string()))?,
                )
            }

            ObjectStoreConfig::S3 {
                endpoint,
                access_key,
                secret_key,
                bucket,
                region,
            } => {
                let builder = AmazonS3Builder::new()
                    .with_endpoint(endpoint)
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key)
                    .with_bucket_name(bucket)
                    .with_region(region.as_deref().unwrap_or("us-east-1"))
                    .with_allow_http(endpoint.starts_with("http://"));

                Arc::new(
                    builder
                        .build()
                        .map_err(|e| StoreError::InvalidConfig(e.to_string()))?,
                )
            }
        };

        Ok(Self {
            inner,
            bucket: config.bucket().to_string(),
        })
    }

    /// Wrap an existing `ObjectStore` implementation.
    pub fn new_from_store(inner: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            inner,
            bucket: bucket.into(),
        }
    }

    /// In-memory storage for the given container.
    pub fn memory(bucket: impl Into<String>) -> Self {
        Self::new_from_store(Arc::new(InMemory::new()), bucket)
    }

    /// Get the container name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn check_container(&self, container: &str) -> Result<()> {
        if container == self.bucket {
            Ok(())
        } else {
            Err(StoreError::UnknownContainer(container.to_string()))
        }
    }

    fn object_info(meta: ObjectMeta) -> ObjectInfo {
        ObjectInfo {
            key: raw_key(&meta.location),
            size: meta.size as u64,
            last_modified: meta.last_modified,
        }
    }
}

/// The key a location was created from.
///
/// Locations percent-encode reserved characters (`%`, `#`, `[`, ...), so
/// their string form cannot be handed back to `ObjectPath::from`.
fn raw_key(location: &ObjectPath) -> String {
    percent_decode_str(location.as_ref())
        .decode_utf8_lossy()
        .into_owned()
}

/// Whether a failed probe means the bucket itself is missing.
fn is_missing_bucket(err: &object_store::Error) -> bool {
    match err {
        object_store::Error::NotFound { .. } => true,
        other => other.to_string().contains("NoSuchBucket"),
    }
}

#[async_trait::async_trait]
impl ObjectStoreClient for Storage {
    async fn bucket_exists(&self, container: &str) -> Result<bool> {
        if self.check_container(container).is_err() {
            return Ok(false);
        }

        // A single page of the root listing is enough to tell whether the
        // bucket answers at all
        let mut stream = self.inner.list(None);
        match stream.try_next().await {
            Ok(_) => Ok(true),
            Err(e) if is_missing_bucket(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn head_object(&self, container: &str, key: &str) -> Result<ObjectInfo> {
        self.check_container(container)?;
        let meta = self.inner.head(&ObjectPath::from(key)).await?;
        tracing::debug!("head object: {}/{} ({} bytes)", container, key, meta.size);
        Ok(Self::object_info(meta))
    }

    async fn get_object(&self, container: &str, key: &str) -> Result<ByteStream> {
        self.check_container(container)?;
        let result = self.inner.get(&ObjectPath::from(key)).await?;
        tracing::debug!("get object: {}/{}", container, key);
        Ok(result.into_stream().map_err(StoreError::from).boxed())
    }

    async fn put_object(&self, container: &str, key: &str, data: Bytes) -> Result<()> {
        self.check_container(container)?;
        let len = data.len();
        self.inner
            .put(&ObjectPath::from(key), PutPayload::from(data))
            .await?;
        tracing::debug!("put object: {}/{} ({} bytes)", container, key, len);
        Ok(())
    }

    fn list_objects<'a>(
        &'a self,
        container: &str,
        prefix: &str,
        recursive: bool,
    ) -> ListStream<'a> {
        if let Err(e) = self.check_container(container) {
            return stream::once(async move { Err(e) }).boxed();
        }

        let prefix = ObjectPath::from(prefix);
        tracing::debug!(
            "list objects: {}/{} (recursive: {})",
            container,
            prefix,
            recursive
        );

        if recursive {
            return self
                .inner
                .list(Some(&prefix))
                .map_ok(|meta| ListEntry::Object(Self::object_info(meta)))
                .map_err(StoreError::from)
                .boxed();
        }

        let inner = self.inner.clone();
        stream::once(async move { inner.list_with_delimiter(Some(&prefix)).await })
            .map_ok(|listing| {
                let prefixes = listing
                    .common_prefixes
                    .into_iter()
                    .map(|p| ListEntry::Prefix(format!("{}/", raw_key(&p))));
                let objects = listing
                    .objects
                    .into_iter()
                    .map(|meta| ListEntry::Object(Self::object_info(meta)));
                stream::iter(prefixes.chain(objects).map(Ok::<_, object_store::Error>))
            })
            .try_flatten()
            .map_err(StoreError::from)
            .boxed()
    }

    async fn delete_object(&self, container: &str, key: &str) -> Result<()> {
        self.check_container(container)?;
        let path = ObjectPath::from(key);
        // Backends treat deleting a missing key as success; surface it instead
        self.inner.head(&path).await?;
        self.inner.delete(&path).await?;
        tracing::debug!("delete object: {}/{}", container, key);
        Ok(())
    }

    async fn copy_object(
        &self,
        container: &str,
        dest_key: &str,
        source: &ObjectRef,
    ) -> Result<()> {
        self.check_container(container)?;
        if source.container != self.bucket {
            return Err(StoreError::InvalidSource(source.to_string()));
        }
        self.inner
            .copy(&ObjectPath::from(source.key.as_str()), &ObjectPath::from(dest_key))
            .await?;
        tracing::debug!("copy object: {} -> {}/{}", source, container, dest_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_all(storage: &Storage, key: &str) -> Bytes {
        let chunks: Vec<Bytes> = storage
            .get_object("test", key)
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        chunks.concat().into()
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = Storage::memory("test");

        let data = Bytes::from("hello world");
        storage
            .put_object("test", "docs/hello.txt", data.clone())
            .await
            .unwrap();

        assert_eq!(read_all(&storage, "docs/hello.txt").await, data);

        let info = storage.head_object("test", "docs/hello.txt").await.unwrap();
        assert_eq!(info.key, "docs/hello.txt");
        assert_eq!(info.size, 11);

        storage.delete_object("test", "docs/hello.txt").await.unwrap();
        let err = storage.head_object("test", "docs/hello.txt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_local_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ObjectStoreConfig::Local {
            path: temp_dir.path().to_path_buf(),
            bucket: "test".to_string(),
        };

        let storage = Storage::new(config).await.unwrap();

        let data = Bytes::from("test data");
        storage
            .put_object("test", "nested/file.bin", data.clone())
            .await
            .unwrap();
        assert_eq!(read_all(&storage, "nested/file.bin").await, data);

        // Verify file exists on disk
        let file_path = temp_dir.path().join("nested").join("file.bin");
        assert!(file_path.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_fails() {
        let storage = Storage::memory("test");
        let err = storage.delete_object("test", "ghost.txt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_container() {
        let storage = Storage::memory("test");

        assert!(storage.bucket_exists("test").await.unwrap());
        assert!(!storage.bucket_exists("other").await.unwrap());

        let err = storage
            .put_object("other", "a.txt", Bytes::from("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownContainer(_)));
    }

    #[tokio::test]
    async fn test_list_delimited_and_recursive() {
        let storage = Storage::memory("test");
        for key in ["a/1.txt", "a/2.txt", "a/b/3.txt", "top.txt"] {
            storage
                .put_object("test", key, Bytes::from("x"))
                .await
                .unwrap();
        }

        let entries: Vec<ListEntry> = storage
            .list_objects("test", "a/", false)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.contains(&ListEntry::Prefix("a/b/".to_string())));
        let objects: Vec<_> = entries
            .iter()
            .filter_map(|e| match e {
                ListEntry::Object(info) => Some(info.key.as_str()),
                ListEntry::Prefix(_) => None,
            })
            .collect();
        assert!(objects.contains(&"a/1.txt"));
        assert!(objects.contains(&"a/2.txt"));

        let all: Vec<ListEntry> = storage
            .list_objects("test", "a", true)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|e| matches!(e, ListEntry::Object(_))));
    }

    #[tokio::test]
    async fn test_copy_object() {
        let storage = Storage::memory("test");
        storage
            .put_object("test", "old.txt", Bytes::from("content"))
            .await
            .unwrap();

        storage
            .copy_object("test", "new.txt", &ObjectRef::new("test", "old.txt"))
            .await
            .unwrap();
        assert_eq!(read_all(&storage, "new.txt").await, Bytes::from("content"));
        // Source is untouched by a copy
        assert!(storage.head_object("test", "old.txt").await.is_ok());

        let err = storage
            .copy_object("test", "new.txt", &ObjectRef::new("elsewhere", "old.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSource(_)));
    }

    #[tokio::test]
    async fn test_list_returns_raw_keys() {
        let storage = Storage::memory("test");
        for key in ["docs/report[1] 50%.txt", "docs/q#2/a.txt"] {
            storage
                .put_object("test", key, Bytes::from("x"))
                .await
                .unwrap();
        }

        let entries: Vec<ListEntry> = storage
            .list_objects("test", "docs/", false)
            .try_collect()
            .await
            .unwrap();
        assert!(entries.contains(&ListEntry::Prefix("docs/q#2/".to_string())));
        let key = entries
            .iter()
            .find_map(|e| match e {
                ListEntry::Object(info) => Some(info.key.clone()),
                ListEntry::Prefix(_) => None,
            })
            .unwrap();
        assert_eq!(key, "docs/report[1] 50%.txt");

        // Listed keys address the same objects
        assert_eq!(read_all(&storage, &key).await, Bytes::from("x"));
        storage.delete_object("test", &key).await.unwrap();

        let all: Vec<ListEntry> = storage
            .list_objects("test", "docs", true)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert!(matches!(&all[0], ListEntry::Object(info) if info.key == "docs/q#2/a.txt"));
    }

    #[test]
    fn test_is_missing_bucket() {
        let no_such_bucket = object_store::Error::Generic {
            store: "S3",
            source: "NoSuchBucket: The specified bucket does not exist".into(),
        };
        assert!(is_missing_bucket(&no_such_bucket));

        let not_found = object_store::Error::NotFound {
            path: String::new(),
            source: "404".into(),
        };
        assert!(is_missing_bucket(&not_found));

        // Mentions a bucket, but the bucket is there
        let denied = object_store::Error::Generic {
            store: "S3",
            source: "AccessDenied: bucket policy does not allow listing".into(),
        };
        assert!(!is_missing_bucket(&denied));
    }

    #[test]
    fn test_config_bucket() {
        let config = ObjectStoreConfig::S3 {
            endpoint: "http://localhost:9000".to_string(),
            access_key: "minio".to_string(),
            secret_key: "minio123".to_string(),
            bucket: "docs".to_string(),
            region: None,
        };
        assert_eq!(config.bucket(), "docs");
    }
}
