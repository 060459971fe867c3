use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Remote gallery is not configured")]
    NotConfigured,

    #[error("Remote gallery configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Remote gallery error: {0}")]
    ProviderError(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),
}
