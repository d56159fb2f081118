//! Shared test utilities for filesystem integration tests
#![allow(dead_code)]

use std::collections::HashSet;
use std::io;
use std::sync::Arc;

use bytes::Bytes;
use ::common::fs::{ChangeEvent, ObjectFs, WriteOptions};
use parking_lot::Mutex;
use store::{
    ByteStream, ListStream, ObjectInfo, ObjectRef, ObjectStoreClient, Result, Storage, StoreError,
};

pub const CONTAINER: &str = "test-bucket";

/// In-memory store that can be told to fail deletes of chosen keys.
pub struct FaultyStore {
    inner: Storage,
    failing_deletes: Mutex<HashSet<String>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self {
            inner: Storage::memory(CONTAINER),
            failing_deletes: Mutex::new(HashSet::new()),
        }
    }

    /// Make every later delete of `key` fail.
    pub fn fail_delete(&self, key: &str) {
        self.failing_deletes.lock().insert(key.to_string());
    }
}

#[async_trait::async_trait]
impl ObjectStoreClient for FaultyStore {
    async fn bucket_exists(&self, container: &str) -> Result<bool> {
        self.inner.bucket_exists(container).await
    }

    async fn head_object(&self, container: &str, key: &str) -> Result<ObjectInfo> {
        self.inner.head_object(container, key).await
    }

    async fn get_object(&self, container: &str, key: &str) -> Result<ByteStream> {
        self.inner.get_object(container, key).await
    }

    async fn put_object(&self, container: &str, key: &str, data: Bytes) -> Result<()> {
        self.inner.put_object(container, key, data).await
    }

    fn list_objects<'a>(
        &'a self,
        container: &str,
        prefix: &str,
        recursive: bool,
    ) -> ListStream<'a> {
        self.inner.list_objects(container, prefix, recursive)
    }

    async fn delete_object(&self, container: &str, key: &str) -> Result<()> {
        if self.failing_deletes.lock().contains(key) {
            return Err(StoreError::Io(io::Error::other(format!(
                "injected delete failure for {}",
                key
            ))));
        }
        self.inner.delete_object(container, key).await
    }

    async fn copy_object(
        &self,
        container: &str,
        dest_key: &str,
        source: &ObjectRef,
    ) -> Result<()> {
        self.inner.copy_object(container, dest_key, source).await
    }
}

/// Set up an adapter over an empty in-memory store.
pub fn setup_test_fs() -> ObjectFs<FaultyStore> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    ObjectFs::new(FaultyStore::new(), CONTAINER)
}

/// Write `data` at `key`, creating or replacing it.
pub async fn put(fs: &ObjectFs<FaultyStore>, key: &str, data: &[u8]) {
    fs.write(
        &fs.path(key),
        Bytes::copy_from_slice(data),
        WriteOptions::default(),
    )
    .await
    .unwrap();
}

/// Record every change event fired by `fs`.
pub fn record_events(fs: &ObjectFs<FaultyStore>) -> Arc<Mutex<Vec<ChangeEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    // The subscription lives as long as the adapter
    let _ = fs.subscribe(move |event| sink.lock().push(event.clone()));
    events
}
