use clap::Args;

use common::fs::{FsError, RenameOptions};

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Mv {
    /// Source file within the bucket
    pub from: String,

    /// Destination within the bucket
    pub to: String,

    /// Replace the destination if it exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MvError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Mv {
    type Error = MvError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.connect().await?;
        let from = fs.path(&self.from);
        let to = fs.path(&self.to);
        fs.rename(
            &from,
            &to,
            RenameOptions {
                overwrite: self.overwrite,
            },
        )
        .await?;

        Ok(format!("Moved {} to {}", from, to))
    }
}
