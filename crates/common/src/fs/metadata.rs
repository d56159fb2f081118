use chrono::{DateTime, Utc};
use serde::Serialize;
use store::{ObjectInfo, ObjectStoreClient};

use super::error::FsError;
use super::path::VirtualPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    File,
    Directory,
}

/// Filesystem view of an object (or of a synthetic directory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectMetadata {
    pub kind: FileKind,
    /// Size in bytes, zero for directories
    pub size: u64,
    /// The store keeps no creation time; this mirrors `modified_at`
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ObjectMetadata {
    /// Metadata for a directory. Directories are synthetic, so size is
    /// zero and both timestamps are the current time.
    pub fn directory() -> Self {
        let now = Utc::now();
        Self {
            kind: FileKind::Directory,
            size: 0,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn file(info: &ObjectInfo) -> Self {
        Self {
            kind: FileKind::File,
            size: info.size,
            created_at: info.last_modified,
            modified_at: info.last_modified,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

/// Whether the last segment of `key` carries an extension.
///
/// The extension starts at the last dot of the segment, unless that dot
/// opens the segment (`.env` has none) or the segment is made only of dots.
/// A trailing dot counts (`notes.` has one).
pub fn has_extension(key: &str) -> bool {
    let name = key.rsplit('/').next().unwrap_or_default();
    match name.rfind('.') {
        None | Some(0) => false,
        Some(_) => !name.chars().all(|c| c == '.'),
    }
}

pub(crate) async fn stat<C>(client: &C, path: &VirtualPath) -> Result<ObjectMetadata, FsError>
where
    C: ObjectStoreClient + ?Sized,
{
    // The container root always exists; its presence was checked at setup
    if path.is_root() {
        return Ok(ObjectMetadata::directory());
    }

    match client.head_object(&path.container, &path.key).await {
        Ok(info) => Ok(ObjectMetadata::file(&info)),
        Err(source) if !has_extension(&path.key) => {
            tracing::debug!(
                "no object at {}, treating as directory: {}",
                path,
                source
            );
            Ok(ObjectMetadata::directory())
        }
        Err(source) => Err(FsError::NotFound {
            path: path.clone(),
            source: Some(source),
        }),
    }
}
