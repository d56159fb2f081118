use std::error::Error;
use std::path::PathBuf;

use common::fs::{ChangeKind, FsError, ObjectFs};
use store::{Storage, StoreError};

use crate::state::{AppState, StateError};

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("failed to open object store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to reach object store: {0}")]
    Fs(#[from] FsError),
    #[error("container '{0}' does not exist")]
    ContainerNotFound(String),
}

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Optional custom config path (defaults to ~/.objfs)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    /// Build an adapter from the saved configuration without touching the
    /// store.
    pub async fn open(&self) -> Result<ObjectFs<Storage>, ConnectError> {
        let state = AppState::load(self.config_path.clone())?;
        let config = state.config;
        let storage = Storage::new(config.store.clone()).await?;
        Ok(ObjectFs::new(storage, config.container())
            .with_max_concurrent_deletes(config.max_concurrent_deletes))
    }

    /// Open the adapter, confirm its container exists, and log every change
    /// it reports.
    pub async fn connect(&self) -> Result<ObjectFs<Storage>, ConnectError> {
        let fs = self.open().await?;
        let container = fs.container().to_string();
        if !fs.check_container(&container).await? {
            return Err(ConnectError::ContainerNotFound(container));
        }

        // Handler stays registered for the life of the adapter
        let _ = fs.subscribe(|event| match event.kind {
            ChangeKind::Changed => tracing::info!(path = %event.path, "changed"),
            ChangeKind::Created => tracing::info!(path = %event.path, "created"),
            ChangeKind::Deleted => tracing::info!(path = %event.path, "deleted"),
        });
        Ok(fs)
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
