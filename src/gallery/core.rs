use super::{merge_by_id, seed_photos};
use crate::photo::Photo;
use crate::remote::RemoteGalleryClient;
use crate::storage::PhotoStore;
use tracing::debug;

/// Builds the world-map gallery out of the remote gallery, the local fallback
/// pool, the seed set and the user's own public prints.
#[derive(Clone)]
pub struct GalleryEngine {
    remote: RemoteGalleryClient,
    store: PhotoStore,
    fetch_limit: usize,
    seed: Vec<Photo>,
}

impl GalleryEngine {
    pub fn new(remote: RemoteGalleryClient, store: PhotoStore, fetch_limit: usize) -> Self {
        Self {
            remote,
            store,
            fetch_limit,
            seed: seed_photos(),
        }
    }

    pub fn with_seed(mut self, seed: Vec<Photo>) -> Self {
        self.seed = seed;
        self
    }

    pub fn remote(&self) -> &RemoteGalleryClient {
        &self.remote
    }

    /// Deduplicated gallery to render.
    ///
    /// Remote prints come first, newest first. When the remote gallery yields
    /// nothing the seed set merged with the fallback pool stands in for it.
    /// The caller's own public prints are merged last and win on id
    /// collisions, since they may carry edits not yet synced.
    pub async fn get_global_gallery(&self, own: &[Photo]) -> Vec<Photo> {
        let remote = self.remote.fetch_recent(self.fetch_limit).await;

        let base = if remote.is_empty() {
            let pool = self.store.get_shared_pool_local().await;
            debug!(
                "Remote gallery empty, using {} seed and {} pooled prints",
                self.seed.len(),
                pool.len()
            );
            merge_by_id(self.seed.clone(), pool)
        } else {
            remote
        };

        let own_public: Vec<Photo> = own.iter().filter(|p| p.is_public).cloned().collect();
        let gallery = merge_by_id(base, own_public);

        debug!("Global gallery holds {} prints", gallery.len());
        gallery
    }
}
