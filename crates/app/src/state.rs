use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use store::ObjectStoreConfig;

pub const APP_NAME: &str = "objfs";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level for stderr (and the log file, if any)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily-rolled log files (stderr only if not set)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Upper bound on deletions in flight during a recursive delete
    #[serde(default = "default_max_concurrent_deletes")]
    pub max_concurrent_deletes: usize,
    /// Object store connection; its bucket is the container we serve
    pub store: ObjectStoreConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_concurrent_deletes() -> usize {
    16
}

impl AppConfig {
    pub fn new(store: ObjectStoreConfig) -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            max_concurrent_deletes: default_max_concurrent_deletes(),
            store,
        }
    }

    pub fn container(&self) -> &str {
        self.store.bucket()
    }

    /// Falls back to `WARN` for anything `tracing` does not recognise.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }

    /// Every connection parameter must be present before we try to connect.
    pub fn validate(&self) -> Result<(), StateError> {
        let required: Vec<(&str, &str)> = match &self.store {
            ObjectStoreConfig::Memory { bucket } | ObjectStoreConfig::Local { bucket, .. } => {
                vec![("bucket", bucket.as_str())]
            }
            ObjectStoreConfig::S3 {
                endpoint,
                access_key,
                secret_key,
                bucket,
                ..
            } => vec![
                ("endpoint", endpoint.as_str()),
                ("access_key", access_key.as_str()),
                ("secret_key", secret_key.as_str()),
                ("bucket", bucket.as_str()),
            ],
        };

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StateError::MissingParameter(name.to_string()));
            }
        }
        if self.max_concurrent_deletes == 0 {
            return Err(StateError::InvalidParameter(
                "max_concurrent_deletes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the objfs directory (~/.objfs)
    pub objfs_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the objfs directory path (custom or default ~/.objfs)
    pub fn objfs_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new objfs state directory
    pub fn init(custom_path: Option<PathBuf>, config: AppConfig) -> Result<Self, StateError> {
        config.validate()?;

        let objfs_dir = Self::objfs_dir(custom_path)?;
        let config_path = objfs_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&objfs_dir)?;
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            objfs_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the objfs directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let objfs_dir = Self::objfs_dir(custom_path)?;
        let config_path = objfs_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;
        config.validate()?;

        Ok(Self {
            objfs_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("objfs directory not initialized. Run 'objfs init' first")]
    NotInitialized,

    #[error("objfs directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
