use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI provider is not configured")]
    NotConfigured,

    #[error("AI configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    ProviderError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}
