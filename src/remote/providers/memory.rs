use crate::photo::Photo;
use crate::remote::{GalleryBackend, RemoteError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// A remote collection that lives in process memory.
pub struct MemoryBackend {
    documents: RwLock<Vec<(String, Photo)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GalleryBackend for MemoryBackend {
    async fn insert(&self, photo: &Photo) -> Result<String, RemoteError> {
        let document_id = uuid::Uuid::new_v4().to_string();
        self.documents
            .write()
            .await
            .push((document_id.clone(), photo.clone()));
        debug!("Stored print {} as document {}", photo.id, document_id);
        Ok(document_id)
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<Photo>, RemoteError> {
        let documents = self.documents.read().await;
        let mut photos: Vec<Photo> = documents.iter().map(|(_, p)| p.clone()).collect();
        photos.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        photos.truncate(limit);
        Ok(photos)
    }

    fn name(&self) -> &str {
        "Memory"
    }
}
