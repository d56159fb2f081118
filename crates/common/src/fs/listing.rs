use std::collections::BTreeMap;

use futures::TryStreamExt;
use serde::Serialize;
use store::{ListEntry, ObjectStoreClient};

use super::error::FsError;
use super::metadata::FileKind;
use super::path::VirtualPath;

/// An immediate child of a directory, named relative to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: FileKind,
}

/// List the immediate children of `path`.
///
/// Drains the whole delimited listing before returning. Entries come back
/// sorted by name, each name at most once; when a key is both an object and
/// a common prefix, the directory wins.
pub(crate) async fn list_children<C>(
    client: &C,
    path: &VirtualPath,
) -> Result<Vec<DirectoryEntry>, FsError>
where
    C: ObjectStoreClient + ?Sized,
{
    let prefix = path.listing_prefix();
    // Store keys carry no leading separator, so the root strips nothing
    let strip = prefix.trim_start_matches('/');

    let to_error = |source| FsError::StoreUnavailable {
        path: path.clone(),
        source,
    };

    let mut children = BTreeMap::new();
    let mut listing = client.list_objects(&path.container, &prefix, false);
    while let Some(entry) = listing.try_next().await.map_err(to_error)? {
        let (raw, kind) = match &entry {
            ListEntry::Prefix(p) => (p.as_str(), FileKind::Directory),
            ListEntry::Object(info) => (info.key.as_str(), FileKind::File),
        };
        let Some(name) = child_name(raw, strip) else {
            tracing::trace!("skipping listing entry {} under {}", raw, path);
            continue;
        };
        match kind {
            FileKind::Directory => {
                children.insert(name, kind);
            }
            FileKind::File => {
                children.entry(name).or_insert(kind);
            }
        }
    }

    tracing::debug!("listed {} children of {}", children.len(), path);
    Ok(children
        .into_iter()
        .map(|(name, kind)| DirectoryEntry { name, kind })
        .collect())
}

/// Name of a listing result relative to `prefix`, or `None` if it is the
/// prefix itself or not an immediate child.
fn child_name(raw: &str, prefix: &str) -> Option<String> {
    let name = raw.strip_prefix(prefix)?.trim_end_matches('/');
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name.to_string())
}
