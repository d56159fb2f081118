use std::path::PathBuf;

use clap::Args;

use common::fs::FsError;

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Cat {
    /// File within the bucket
    pub path: String,

    /// Write the content to this file instead of printing it
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Cat {
    type Error = CatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.connect().await?;
        let path = fs.path(&self.path);
        let bytes = fs.read(&path).await?;

        if let Some(output) = &self.output {
            tokio::fs::write(output, &bytes).await?;
            return Ok(format!(
                "Wrote {} bytes from {} to {}",
                bytes.len(),
                path,
                output.display()
            ));
        }

        // Try to convert to UTF-8 string, or show hex if binary
        match std::str::from_utf8(&bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => {
                let hex = bytes
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(format!(
                    "File: {}\nSize: {} bytes\nBinary content (hex): {}",
                    path,
                    bytes.len(),
                    hex
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::op::{testing, Op};

    #[tokio::test]
    async fn test_cat_text_and_binary() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = testing::local_context(temp_dir.path());
        testing::put(&ctx, "notes.txt", "hello").await;
        testing::put(&ctx, "blob.bin", [0xffu8, 0x00]).await;

        let text = Cat {
            path: "notes.txt".to_string(),
            output: None,
        };
        assert_eq!(text.execute(&ctx).await.unwrap(), "hello");

        let binary = Cat {
            path: "blob.bin".to_string(),
            output: None,
        };
        let output = binary.execute(&ctx).await.unwrap();
        assert!(output.ends_with("Binary content (hex): ff 00"));
    }

    #[tokio::test]
    async fn test_cat_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = testing::local_context(temp_dir.path());
        testing::put(&ctx, "notes.txt", "hello").await;

        let target = temp_dir.path().join("out.txt");
        let op = Cat {
            path: "notes.txt".to_string(),
            output: Some(target.clone()),
        };
        op.execute(&ctx).await.unwrap();
        assert_eq!(std::fs::read_to_string(target).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_cat_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = testing::local_context(temp_dir.path());

        let op = Cat {
            path: "ghost.txt".to_string(),
            output: None,
        };
        let err = op.execute(&ctx).await.unwrap_err();
        assert!(matches!(err, CatError::Fs(e) if e.is_not_found()));
    }
}
