use std::fmt;

use serde::Serialize;
use store::ObjectStoreClient;

use super::error::FsError;
use super::path::VirtualPath;

/// Progress of a copy-then-delete rename.
///
/// A failure in `Copying` leaves the store untouched. A failure in
/// `Deleting` leaves both the source and the destination in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameState {
    Copying,
    Deleting,
    Done,
}

impl fmt::Display for RenameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameState::Copying => write!(f, "copying"),
            RenameState::Deleting => write!(f, "deleting source"),
            RenameState::Done => write!(f, "done"),
        }
    }
}

/// A single-object move, emulated with the store's copy and delete.
pub(crate) struct Rename<'a, C: ?Sized> {
    client: &'a C,
    from: &'a VirtualPath,
    to: &'a VirtualPath,
    state: RenameState,
}

impl<'a, C> Rename<'a, C>
where
    C: ObjectStoreClient + ?Sized,
{
    pub fn new(client: &'a C, from: &'a VirtualPath, to: &'a VirtualPath) -> Self {
        Self {
            client,
            from,
            to,
            state: RenameState::Copying,
        }
    }

    pub async fn run(mut self) -> Result<(), FsError> {
        loop {
            let step = match self.state {
                RenameState::Copying => {
                    self.client
                        .copy_object(&self.to.container, &self.to.key, &self.from.object_ref())
                        .await
                }
                RenameState::Deleting => {
                    self.client
                        .delete_object(&self.from.container, &self.from.key)
                        .await
                }
                RenameState::Done => return Ok(()),
            };

            if let Err(source) = step {
                tracing::error!(
                    "failed to rename object {} to {} while {}: {}",
                    self.from,
                    self.to,
                    self.state,
                    source
                );
                return Err(FsError::RenameFailed {
                    from: self.from.clone(),
                    to: self.to.clone(),
                    stage: self.state,
                    source,
                });
            }

            self.state = match self.state {
                RenameState::Copying => RenameState::Deleting,
                _ => RenameState::Done,
            };
        }
    }
}
