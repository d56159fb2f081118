use clap::Args;

use common::fs::FsError;

use crate::op::ConnectError;

#[derive(Args, Debug, Clone)]
pub struct Check;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error("container check failed: {0}")]
    Fs(#[from] FsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Check {
    type Error = CheckError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let fs = ctx.open().await?;
        let container = fs.container().to_string();

        let status = if fs.check_container(&container).await? {
            "OK"
        } else {
            "NOT FOUND"
        };
        Ok(format!("Container {}: {}", container, status))
    }
}
