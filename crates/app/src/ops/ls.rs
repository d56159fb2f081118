use clap::Args;

use common::fs::{FileKind, FsError};

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Directory within the bucket (defaults to the root)
    pub path: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = LsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.connect().await?;
        let path = fs.path(self.path.as_deref().unwrap_or_default());
        let entries = fs.list_children(&path).await?;

        if entries.is_empty() {
            return Ok(format!("{} is empty", path));
        }

        // Directories carry a trailing slash so they stand out
        let lines: Vec<String> = entries
            .iter()
            .map(|entry| match entry.kind {
                FileKind::Directory => format!("{}/", entry.name),
                FileKind::File => entry.name.clone(),
            })
            .collect();
        Ok(lines.join("\n"))
    }
}
