use clap::Args;

use common::fs::{FileKind, FsError};

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Stat {
    /// Path within the bucket (defaults to the root)
    pub path: Option<String>,

    /// Print metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Stat {
    type Error = StatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.connect().await?;
        let path = fs.path(self.path.as_deref().unwrap_or_default());
        let meta = fs.stat(&path).await?;

        if self.json {
            return Ok(serde_json::to_string_pretty(&meta)?);
        }

        let kind = match meta.kind {
            FileKind::File => "file",
            FileKind::Directory => "directory",
        };
        Ok(format!(
            "Path: {}\nKind: {}\nSize: {} bytes\nModified: {}",
            path,
            kind,
            meta.size,
            meta.modified_at.to_rfc3339()
        ))
    }
}
