//! Object store client
//!
//! The flat, key-based capability interface the filesystem adapter is
//! built on, plus a concrete client backed by the `object_store` crate.
//!
//! # Backends
//!
//! - S3-compatible storage (AWS S3, MinIO, ...)
//! - Local filesystem directory
//! - In-memory (tests and scratch use)
//!
//! # Example
//!
//! ```rust,no_run
//! use store::{ObjectStoreClient, ObjectStoreConfig, Storage};
//!
//! # async fn example() -> store::Result<()> {
//! let storage = Storage::new(ObjectStoreConfig::Memory {
//!     bucket: "scratch".to_string(),
//! })
//! .await?;
//!
//! storage
//!     .put_object("scratch", "notes/today.txt", "hello".into())
//!     .await?;
//! let info = storage.head_object("scratch", "notes/today.txt").await?;
//! assert_eq!(info.size, 5);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod storage;

pub use client::{ByteStream, ListEntry, ListStream, ObjectInfo, ObjectRef, ObjectStoreClient};
pub use error::{Result, StoreError};
pub use storage::{ObjectStoreConfig, Storage};
