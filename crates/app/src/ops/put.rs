use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;

use common::fs::{FsError, WriteOptions};

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Put {
    /// Destination within the bucket
    pub path: String,

    /// Upload the content of this local file
    #[arg(long, group = "source")]
    pub file: Option<PathBuf>,

    /// Upload this literal content
    #[arg(long, group = "source")]
    pub content: Option<String>,

    /// Refuse to create a new object
    #[arg(long)]
    pub no_create: bool,

    /// Refuse to replace an existing object
    #[arg(long)]
    pub no_overwrite: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PutError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Either --file or --content must be provided")]
    NoSource,
}

#[async_trait::async_trait]
impl crate::op::Op for Put {
    type Error = PutError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let data = match (&self.file, &self.content) {
            (Some(file), _) => Bytes::from(
                tokio::fs::read(file)
                    .await
                    .map_err(|e| PutError::Read(file.clone(), e))?,
            ),
            (None, Some(content)) => Bytes::from(content.clone()),
            (None, None) => return Err(PutError::NoSource),
        };

        let fs = ctx.connect().await?;
        let path = fs.path(&self.path);
        let len = data.len();
        let options = WriteOptions {
            create: !self.no_create,
            overwrite: !self.no_overwrite,
        };
        fs.write(&path, data, options).await?;

        Ok(format!("Wrote {} bytes to {}", len, path))
    }
}
