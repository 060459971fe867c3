pub mod client;
pub mod config;
pub mod error;
pub mod providers;

pub use client::{RemoteGalleryClient, UploadOutcome};
pub use config::*;
pub use error::*;

use crate::photo::Photo;
use async_trait::async_trait;
use std::sync::Arc;

/// A remote document collection holding shared prints.
#[async_trait]
pub trait GalleryBackend: Send + Sync {
    /// Append a print as a new document, returning the document id.
    async fn insert(&self, photo: &Photo) -> Result<String, RemoteError>;

    /// Up to `limit` prints, newest `captured_at` first.
    async fn query_recent(&self, limit: usize) -> Result<Vec<Photo>, RemoteError>;

    /// `false` only for the disabled backend.
    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

pub type DynGalleryBackend = Arc<dyn GalleryBackend>;

pub fn create_backend(config: &RemoteProviderConfig) -> Result<DynGalleryBackend, RemoteError> {
    match config {
        RemoteProviderConfig::None => Ok(Arc::new(providers::null::NullBackend::new())),
        RemoteProviderConfig::Memory => Ok(Arc::new(providers::memory::MemoryBackend::new())),
        RemoteProviderConfig::Firestore(firestore_config) => Ok(Arc::new(
            providers::firestore::FirestoreBackend::new(firestore_config)?,
        )),
    }
}
