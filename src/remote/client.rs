use super::{DynGalleryBackend, RemoteError};
use crate::compression::{CompressionSettings, compress_data_url_async};
use crate::photo::Photo;
use crate::storage::PhotoStore;
use tracing::{debug, error, info, warn};

/// Where an upload ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Stored as a remote document with this id.
    Remote(String),
    /// No remote gallery configured; stored in the local fallback pool.
    LocalPool,
}

/// Shared-gallery access that degrades to the local fallback pool.
#[derive(Clone)]
pub struct RemoteGalleryClient {
    backend: DynGalleryBackend,
    store: PhotoStore,
    upload_compression: CompressionSettings,
}

impl RemoteGalleryClient {
    pub fn new(
        backend: DynGalleryBackend,
        store: PhotoStore,
        upload_compression: CompressionSettings,
    ) -> Self {
        Self {
            backend,
            store,
            upload_compression,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_configured()
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Publish a print to the shared gallery.
    ///
    /// Without a configured backend the print goes to the local fallback pool
    /// instead. Failures are logged and returned; nothing is retried and no
    /// local state is touched.
    pub async fn upload_to_cloud(&self, photo: &Photo) -> Result<UploadOutcome, RemoteError> {
        if !self.backend.is_configured() {
            debug!(
                "No remote gallery configured, adding print {} to the fallback pool",
                photo.id
            );
            self.store
                .add_to_shared_pool_local(std::slice::from_ref(photo))
                .await?;
            return Ok(UploadOutcome::LocalPool);
        }

        let mut upload = photo.clone();
        upload.image_data =
            compress_data_url_async(upload.image_data, self.upload_compression).await;

        match self.backend.insert(&upload).await {
            Ok(document_id) => {
                info!(
                    "Uploaded print {} to {} as {}",
                    photo.id,
                    self.backend.name(),
                    document_id
                );
                Ok(UploadOutcome::Remote(document_id))
            }
            Err(e) => {
                error!("Failed to upload print {}: {}", photo.id, e);
                Err(e)
            }
        }
    }

    /// Up to `limit` shared prints, newest first. Empty when the backend is
    /// disabled or unreachable.
    pub async fn fetch_recent(&self, limit: usize) -> Vec<Photo> {
        if !self.backend.is_configured() {
            return Vec::new();
        }

        match self.backend.query_recent(limit).await {
            Ok(mut photos) => {
                photos.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
                photos.truncate(limit);
                debug!("Fetched {} shared prints", photos.len());
                photos
            }
            Err(e) => {
                warn!("Could not fetch shared prints: {}", e);
                Vec::new()
            }
        }
    }
}
