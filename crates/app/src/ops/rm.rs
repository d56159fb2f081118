use clap::Args;

use common::fs::{DeleteOptions, FsError};

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// Path within the bucket
    pub path: String,

    /// Remove every object under the path
    #[arg(long, short)]
    pub recursive: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RmError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Rm {
    type Error = RmError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.connect().await?;
        let path = fs.path(&self.path);
        fs.delete(
            &path,
            DeleteOptions {
                recursive: self.recursive,
            },
        )
        .await?;

        Ok(format!("Removed {}", path))
    }
}
