/**
 * Hierarchical filesystem semantics emulated
 *  over a flat, key-based object store.
 * Paths, metadata translation, directory listing,
 *  recursive delete, copy-then-delete rename
 *  and change notification.
 */
pub mod fs;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::fs::{
        ChangeEvent, ChangeKind, DeleteOptions, DirectoryEntry, FileKind, FsError, ObjectFs,
        ObjectMetadata, RenameOptions, RenameState, Subscription, VirtualPath, WriteOptions,
    };
    pub use crate::version::build_info;
}
