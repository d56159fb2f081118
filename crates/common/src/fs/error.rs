use store::StoreError;

use super::path::VirtualPath;
use super::rename::RenameState;

/// Failures surfaced by the filesystem adapter.
///
/// Every store failure maps to exactly one of these kinds; nothing is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("no such file or directory: {path}")]
    NotFound {
        path: VirtualPath,
        #[source]
        source: Option<StoreError>,
    },
    #[error("file already exists: {0}")]
    AlreadyExists(VirtualPath),
    #[error("store unavailable for {path}: {source}")]
    Unavailable {
        path: VirtualPath,
        #[source]
        source: StoreError,
    },
    #[error("failed to list {path}: {source}")]
    StoreUnavailable {
        path: VirtualPath,
        #[source]
        source: StoreError,
    },
    #[error("failed to delete {path} ({} object(s) left, {removed} removed): {source}", failed.len())]
    DeleteFailed {
        path: VirtualPath,
        /// Keys whose deletion failed
        failed: Vec<String>,
        /// Objects removed before the failure was reported
        removed: usize,
        #[source]
        source: StoreError,
    },
    #[error("failed to rename {from} to {to} while {stage}: {source}")]
    RenameFailed {
        from: VirtualPath,
        to: VirtualPath,
        /// Step that failed
        stage: RenameState,
        #[source]
        source: StoreError,
    },
}

impl FsError {
    /// Whether some store mutations already took effect before the failure.
    pub fn may_be_partial(&self) -> bool {
        match self {
            FsError::DeleteFailed { removed, .. } => *removed > 0,
            FsError::RenameFailed { stage, .. } => *stage == RenameState::Deleting,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}

/// Translate a failed read into the error surfaced to callers.
///
/// Every cause collapses to `NotFound`; the store error is kept as the
/// source so callers can still inspect it.
pub(crate) fn read_failure(path: &VirtualPath, source: StoreError) -> FsError {
    FsError::NotFound {
        path: path.clone(),
        source: Some(source),
    }
}
