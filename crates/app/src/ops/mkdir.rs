use clap::Args;

use common::fs::FsError;

use crate::op::ConnectError;

/// Directories exist only through the objects under them; this confirms
/// the bucket is reachable and changes nothing.
#[derive(Args, Debug, Clone)]
pub struct Mkdir {
    /// Directory within the bucket
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MkdirError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Mkdir {
    type Error = MkdirError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.connect().await?;
        let path = fs.path(&self.path);
        fs.create_directory(&path).await?;

        Ok(format!(
            "{} will appear once an object is written under it",
            path
        ))
    }
}
