use futures::stream::{self, StreamExt, TryStreamExt};
use store::{ListEntry, ObjectStoreClient, StoreError};

use super::error::FsError;
use super::path::VirtualPath;

/// Delete exactly the object at `path`.
pub(crate) async fn delete_object<C>(client: &C, path: &VirtualPath) -> Result<(), FsError>
where
    C: ObjectStoreClient + ?Sized,
{
    client
        .delete_object(&path.container, &path.key)
        .await
        .map_err(|source| {
            tracing::error!("failed to delete object {}: {}", path, source);
            FsError::DeleteFailed {
                path: path.clone(),
                failed: vec![path.key.clone()],
                removed: 0,
                source,
            }
        })
}

/// Delete every object under `path/`, at most `concurrency` at a time,
/// along with any object stored at `path` itself.
///
/// All deletions run to completion before the outcome is reported, so a
/// failure leaves the successful ones in effect. When nothing lives under the
/// prefix the object at `path` itself is deleted instead. Returns the number
/// of objects removed.
pub(crate) async fn delete_recursive<C>(
    client: &C,
    path: &VirtualPath,
    concurrency: usize,
) -> Result<usize, FsError>
where
    C: ObjectStoreClient + ?Sized,
{
    let prefix = path.listing_prefix();
    let mut keys: Vec<String> = client
        .list_objects(&path.container, &prefix, true)
        .try_filter_map(|entry| async move {
            Ok(match entry {
                ListEntry::Object(info) => Some(info.key),
                ListEntry::Prefix(_) => None,
            })
        })
        .try_collect()
        .await
        .map_err(|source| {
            tracing::error!("failed to list {} for deletion: {}", path, source);
            FsError::DeleteFailed {
                path: path.clone(),
                failed: Vec::new(),
                removed: 0,
                source,
            }
        })?;

    if keys.is_empty() {
        tracing::debug!("nothing under {}, deleting it as a single object", prefix);
        return delete_object(client, path).await.map(|()| 1);
    }

    // An object stored at the directory key itself goes with its children
    if !path.is_root() {
        match client.head_object(&path.container, &path.key).await {
            Ok(_) => keys.push(path.key.clone()),
            Err(e) if e.is_not_found() => {}
            Err(source) => {
                tracing::error!("failed to check {} before deletion: {}", path, source);
                return Err(FsError::DeleteFailed {
                    path: path.clone(),
                    failed: Vec::new(),
                    removed: 0,
                    source,
                });
            }
        }
    }

    let total = keys.len();
    tracing::debug!("deleting {} object(s) under {}", total, path);

    let container = path.container.as_str();
    let results: Vec<(String, Result<(), StoreError>)> = stream::iter(keys)
        .map(|key| async move {
            let result = client.delete_object(container, &key).await;
            (key, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut failed = Vec::new();
    let mut first_error = None;
    for (key, result) in results {
        if let Err(e) = result {
            tracing::error!("failed to delete object {}/{}: {}", container, key, e);
            failed.push(key);
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        None => Ok(total),
        Some(source) => {
            let removed = total - failed.len();
            tracing::error!(
                "failed to delete directory {}: {} of {} object(s) removed",
                path,
                removed,
                total
            );
            failed.sort();
            Err(FsError::DeleteFailed {
                path: path.clone(),
                failed,
                removed,
                source,
            })
        }
    }
}
