//! Error types for object store clients.

/// Errors that can occur when talking to the object store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No object at the given key
    #[error("object not found: {0}")]
    NotFound(String),

    /// The client does not serve the requested container
    #[error("unknown container: {0}")]
    UnknownContainer(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Copy source could not be resolved against this client
    #[error("invalid copy source: {0}")]
    InvalidSource(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure
    #[error("object storage error: {0}")]
    Backend(#[source] object_store::Error),
}

impl StoreError {
    /// Whether this error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<object_store::Error> for StoreError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => StoreError::NotFound(path),
            other => StoreError::Backend(other),
        }
    }
}

/// Result type alias for object store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
