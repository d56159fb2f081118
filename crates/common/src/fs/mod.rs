//! Filesystem view over a flat object store
//!
//! The store knows only containers and keys. This module layers directory
//! semantics on top using prefix listing conventions:
//!
//! - **[`VirtualPath`]**: `container/key` split into its two parts
//! - **[`ObjectMetadata`]**: store metadata translated into file/directory metadata
//! - **[`DirectoryEntry`]**: one immediate child of a key prefix
//! - **[`ObjectFs`]**: the adapter dispatching stat, list, read, write, delete
//!   and rename to the store client
//! - **[`ChangeNotifier`]**: subscriber registry fired after successful mutations
//!
//! # Directories
//!
//! Directories are never stored. A key is a directory when objects exist
//! under `key/`; listing uses a delimited (non-recursive) prefix listing
//! and classifies common prefixes as directories and leaf objects as files:
//!
//! ```text
//! objects:  docs/a.txt  docs/img/logo.png  readme.md
//!
//! ls ""     -> docs (dir), readme.md (file)
//! ls docs   -> a.txt (file), img (dir)
//! ```
//!
//! `stat` cannot afford a listing per call, so a key with no object behind it
//! is classified by name alone: no extension on its last segment means
//! directory, anything else is not found. Extensionless files are therefore
//! reported as directories when missing.
//!
//! # Partial failures
//!
//! Recursive delete and rename are multi-step against the store and are not
//! atomic. Failures are always reported, even when some steps already took
//! effect; see [`FsError::may_be_partial`].

mod delete;
mod error;
mod listing;
mod metadata;
mod notify;
mod object_fs;
mod path;
mod rename;

pub use error::FsError;
pub use listing::DirectoryEntry;
pub use metadata::{has_extension, FileKind, ObjectMetadata};
pub use notify::{ChangeEvent, ChangeKind, ChangeNotifier, Subscription};
pub use object_fs::{DeleteOptions, ObjectFs, RenameOptions, WriteOptions};
pub use path::VirtualPath;
pub use rename::RenameState;
