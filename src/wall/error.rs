use thiserror::Error;

#[derive(Debug, Error)]
pub enum WallError {
    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
