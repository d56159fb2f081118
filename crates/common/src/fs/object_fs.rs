use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use store::ObjectStoreClient;

use super::delete;
use super::error::{read_failure, FsError};
use super::listing::{self, DirectoryEntry};
use super::metadata::{self, ObjectMetadata};
use super::notify::{ChangeEvent, ChangeNotifier, Subscription};
use super::path::VirtualPath;
use super::rename::Rename;

const DEFAULT_MAX_CONCURRENT_DELETES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Allow creating an object that does not exist yet
    pub create: bool,
    /// Allow replacing an existing object
    pub overwrite: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            create: true,
            overwrite: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    pub recursive: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    /// Accepted for interface compatibility; the store's copy decides
    /// whether an existing destination is replaced
    pub overwrite: bool,
}

/// Filesystem adapter over a single object store client.
///
/// Stateless apart from the change subscribers: every call goes straight to
/// the store and nothing is cached. Concurrent calls are independent, and
/// concurrent writes to one key resolve however the store resolves them.
pub struct ObjectFs<C> {
    client: C,
    container: String,
    notifier: ChangeNotifier,
    max_concurrent_deletes: usize,
}

impl<C> ObjectFs<C>
where
    C: ObjectStoreClient,
{
    pub fn new(client: C, container: impl Into<String>) -> Self {
        Self {
            client,
            container: container.into(),
            notifier: ChangeNotifier::new(),
            max_concurrent_deletes: DEFAULT_MAX_CONCURRENT_DELETES,
        }
    }

    /// Bound the fan-out of recursive deletes.
    pub fn with_max_concurrent_deletes(mut self, limit: usize) -> Self {
        self.max_concurrent_deletes = limit.max(1);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Root of the container this adapter was built for.
    pub fn root(&self) -> VirtualPath {
        VirtualPath::root(self.container.clone())
    }

    /// A path within this adapter's container.
    pub fn path(&self, key: impl AsRef<str>) -> VirtualPath {
        VirtualPath::new(self.container.clone(), key)
    }

    /// Probe whether `name` exists in the store. Meant to be called once
    /// at setup, not per operation.
    pub async fn check_container(&self, name: &str) -> Result<bool, FsError> {
        self.client
            .bucket_exists(name)
            .await
            .map_err(|source| FsError::Unavailable {
                path: VirtualPath::root(name),
                source,
            })
    }

    pub async fn stat(&self, path: &VirtualPath) -> Result<ObjectMetadata, FsError> {
        metadata::stat(&self.client, path).await
    }

    pub async fn list_children(&self, path: &VirtualPath) -> Result<Vec<DirectoryEntry>, FsError> {
        listing::list_children(&self.client, path).await
    }

    /// Read the whole object into memory.
    pub async fn read(&self, path: &VirtualPath) -> Result<Bytes, FsError> {
        let stream = self
            .client
            .get_object(&path.container, &path.key)
            .await
            .map_err(|e| read_failure(path, e))?;

        let body = stream
            .try_fold(BytesMut::new(), |mut body, chunk| async move {
                body.extend_from_slice(&chunk);
                Ok(body)
            })
            .await
            .map_err(|e| read_failure(path, e))?;

        tracing::debug!("read {} bytes from {}", body.len(), path);
        Ok(body.freeze())
    }

    /// Create or replace the object at `path`.
    ///
    /// With both `create` and `overwrite` off the write is refused if an
    /// object already exists there; otherwise it proceeds as a create.
    pub async fn write(
        &self,
        path: &VirtualPath,
        data: Bytes,
        options: WriteOptions,
    ) -> Result<(), FsError> {
        if !options.create && !options.overwrite {
            // Only a real object blocks the write, not a name the
            // directory heuristic would report
            if let Ok(existing) = self.stat(path).await {
                if existing.is_file() {
                    return Err(FsError::AlreadyExists(path.clone()));
                }
            }
        }

        self.client
            .put_object(&path.container, &path.key, data)
            .await
            .map_err(|source| {
                tracing::error!("failed to write {}: {}", path, source);
                FsError::Unavailable {
                    path: path.clone(),
                    source,
                }
            })?;

        self.notifier.fire(ChangeEvent::changed(path.clone()));
        Ok(())
    }

    /// Directories exist only through the objects under them, so there is
    /// nothing to create in the store.
    pub async fn create_directory(&self, path: &VirtualPath) -> Result<(), FsError> {
        tracing::debug!("create directory {}: no-op, directories are implicit", path);
        Ok(())
    }

    pub async fn delete(&self, path: &VirtualPath, options: DeleteOptions) -> Result<(), FsError> {
        if options.recursive {
            let removed =
                delete::delete_recursive(&self.client, path, self.max_concurrent_deletes).await?;
            tracing::info!("deleted {} ({} object(s))", path, removed);
        } else {
            delete::delete_object(&self.client, path).await?;
            tracing::info!("deleted {}", path);
        }

        self.notifier.fire(ChangeEvent::deleted(path.clone()));
        Ok(())
    }

    /// Move a single object by copying it to `to` and deleting `from`.
    ///
    /// Not atomic: if the delete fails both objects remain and the call
    /// still fails. Directories (whole prefixes) are not moved.
    pub async fn rename(
        &self,
        from: &VirtualPath,
        to: &VirtualPath,
        options: RenameOptions,
    ) -> Result<(), FsError> {
        tracing::debug!(
            "rename {} -> {} (overwrite: {})",
            from,
            to,
            options.overwrite
        );
        Rename::new(&self.client, from, to).run().await?;
        tracing::info!("renamed {} to {}", from, to);

        self.notifier.fire(ChangeEvent::deleted(from.clone()));
        self.notifier.fire(ChangeEvent::created(to.clone()));
        Ok(())
    }

    /// Register a handler for change events. The returned token removes it.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(handler)
    }
}
