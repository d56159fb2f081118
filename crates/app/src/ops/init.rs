use std::path::PathBuf;

use clap::{Args, ValueEnum};
use store::ObjectStoreConfig;

use crate::state::{AppConfig, AppState, StateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    S3,
    Local,
    Memory,
}

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Bucket (container) to serve
    #[arg(long)]
    pub bucket: String,

    /// Storage backend
    #[arg(long, value_enum, default_value = "s3")]
    pub backend: Backend,

    /// S3 endpoint URL, e.g. http://localhost:9000
    #[arg(long)]
    pub endpoint: Option<String>,

    /// S3 access key
    #[arg(long)]
    pub access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "OBJFS_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// S3 region (defaults to us-east-1)
    #[arg(long)]
    pub region: Option<String>,

    /// Storage directory for the local backend
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Log level written to the config
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Directory for daily log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Bound on deletes in flight during a recursive delete
    #[arg(long, default_value_t = 16)]
    pub max_concurrent_deletes: usize,
}

impl Init {
    fn store_config(&self) -> Result<ObjectStoreConfig, StateError> {
        let bucket = self.bucket.clone();
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| StateError::MissingParameter(name.to_string()))
        };

        Ok(match self.backend {
            Backend::Memory => ObjectStoreConfig::Memory { bucket },
            Backend::Local => ObjectStoreConfig::Local {
                path: self
                    .path
                    .clone()
                    .ok_or_else(|| StateError::MissingParameter("path".to_string()))?,
                bucket,
            },
            Backend::S3 => ObjectStoreConfig::S3 {
                endpoint: required(&self.endpoint, "endpoint")?,
                access_key: required(&self.access_key, "access_key")?,
                secret_key: required(&self.secret_key, "secret_key")?,
                bucket,
                region: self.region.clone(),
            },
        })
    }
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = StateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = AppConfig::new(self.store_config()?);
        config.log_level = self.log_level.clone();
        config.log_dir = self.log_dir.clone();
        config.max_concurrent_deletes = self.max_concurrent_deletes;

        let state = AppState::init(ctx.config_path.clone(), config)?;

        Ok(format!(
            "Initialized objfs directory at: {}\n  - Config: {}\n  - Bucket: {}",
            state.objfs_dir.display(),
            state.config_path.display(),
            state.config.container(),
        ))
    }
}
