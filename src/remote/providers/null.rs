use crate::photo::Photo;
use crate::remote::{GalleryBackend, RemoteError};
use async_trait::async_trait;
use tracing::debug;

/// The disabled backend used when no remote gallery is configured.
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GalleryBackend for NullBackend {
    async fn insert(&self, photo: &Photo) -> Result<String, RemoteError> {
        debug!("NULL GALLERY BACKEND - not uploading print {}", photo.id);
        Err(RemoteError::NotConfigured)
    }

    async fn query_recent(&self, _limit: usize) -> Result<Vec<Photo>, RemoteError> {
        Ok(Vec::new())
    }

    fn is_configured(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "Null Gallery Backend (Disabled)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_backend_is_disabled() {
        let backend = NullBackend::new();
        assert!(!backend.is_configured());
        assert!(backend.query_recent(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_backend_refuses_inserts() {
        let backend = NullBackend::new();
        let photo: Photo =
            serde_json::from_str(r#"{"id":"p","imageData":"x","capturedAt":1}"#).unwrap();
        let result = backend.insert(&photo).await;
        assert!(matches!(result, Err(RemoteError::NotConfigured)));
    }
}
