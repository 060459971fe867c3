use super::{DynKeyValueStore, StorageError};
use crate::compression::{CompressionSettings, compress_data_url_async};
use crate::gallery::merge_by_id;
use crate::photo::Photo;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const USER_PHOTOS_KEY: &str = "user-photos";
pub const SHARED_POOL_KEY: &str = "shared-pool";

/// Durable home of the user's prints and of the local fallback pool.
///
/// Both records are JSON arrays of [`Photo`]. Reads never fail: a missing or
/// unreadable record reads as empty.
#[derive(Clone)]
pub struct PhotoStore {
    backend: DynKeyValueStore,
    compress_threshold: usize,
    compression: CompressionSettings,
    /// Held across every read-merge-write of the fallback pool. Shared by clones.
    pool_lock: Arc<Mutex<()>>,
}

impl PhotoStore {
    pub fn new(
        backend: DynKeyValueStore,
        compress_threshold: usize,
        compression: CompressionSettings,
    ) -> Self {
        Self {
            backend,
            compress_threshold,
            compression,
            pool_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(backend: DynKeyValueStore, config: &crate::StorageConfig) -> Self {
        Self::new(
            backend,
            config.compress_threshold_bytes,
            CompressionSettings::new(config.max_dimension, config.quality),
        )
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Persist the full collection, replacing the previous record.
    ///
    /// Prints above the size threshold are compressed first, and public
    /// prints missing from the fallback pool are added to it. A quota failure
    /// is logged and returned; the previous record stays intact.
    pub async fn save_user_photos(&self, photos: &[Photo]) -> Result<(), StorageError> {
        let compressed = self.compress_oversized(photos).await;

        let json = serde_json::to_string(&compressed)?;
        if let Err(e) = self.backend.set(USER_PHOTOS_KEY, json).await {
            warn!("Could not save {} prints: {}", compressed.len(), e);
            return Err(e);
        }
        debug!("Saved {} prints", compressed.len());

        let public: Vec<Photo> = compressed.into_iter().filter(|p| p.is_public).collect();
        if public.is_empty() {
            return Ok(());
        }

        let _guard = self.pool_lock.lock().await;
        let pool = self.get_shared_pool_local().await;
        let known: HashSet<&str> = pool.iter().map(|p| p.id.as_str()).collect();
        let missing: Vec<Photo> = public
            .into_iter()
            .filter(|p| !known.contains(p.id.as_str()))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        debug!("Adding {} public prints to the fallback pool", missing.len());
        self.write_pool(merge_by_id(pool, missing)).await
    }

    pub async fn get_user_photos(&self) -> Vec<Photo> {
        self.read_record(USER_PHOTOS_KEY).await
    }

    /// Merge prints into the fallback pool; an existing print with the same
    /// id is overwritten.
    pub async fn add_to_shared_pool_local(&self, photos: &[Photo]) -> Result<(), StorageError> {
        if photos.is_empty() {
            return Ok(());
        }

        let incoming = self.compress_oversized(photos).await;
        let _guard = self.pool_lock.lock().await;
        let pool = self.get_shared_pool_local().await;
        let merged = merge_by_id(pool, incoming);

        info!("Fallback pool now holds {} prints", merged.len());
        self.write_pool(merged).await
    }

    pub async fn get_shared_pool_local(&self) -> Vec<Photo> {
        self.read_record(SHARED_POOL_KEY).await
    }

    async fn write_pool(&self, pool: Vec<Photo>) -> Result<(), StorageError> {
        let json = serde_json::to_string(&pool)?;
        if let Err(e) = self.backend.set(SHARED_POOL_KEY, json).await {
            warn!("Could not save fallback pool: {}", e);
            return Err(e);
        }
        Ok(())
    }

    async fn compress_oversized(&self, photos: &[Photo]) -> Vec<Photo> {
        let mut result = Vec::with_capacity(photos.len());
        for photo in photos {
            let mut photo = photo.clone();
            if photo.payload_len() > self.compress_threshold {
                photo.image_data =
                    compress_data_url_async(photo.image_data, self.compression).await;
            }
            result.push(photo);
        }
        result
    }

    async fn read_record(&self, key: &str) -> Vec<Photo> {
        let json = match self.backend.get(key).await {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read '{}': {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Photo>>(&json) {
            Ok(photos) => photos,
            Err(e) => {
                warn!("Discarding unreadable '{}' record: {}", key, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::test_images::{dimensions_of, png_data_url};
    use crate::photo::{Location, Position};
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn photo(id: &str, is_public: bool) -> Photo {
        Photo {
            id: id.to_string(),
            image_data: "data:image/jpeg;base64,AAAA".to_string(),
            captured_at: 1_000,
            position: Position::new(1.0, 2.0),
            orientation: 0.0,
            caption: None,
            caption_pending: false,
            is_public,
            development_progress: 100.0,
            location: is_public.then(|| Location::new(1.0, 2.0)),
        }
    }

    fn store_with(backend: Arc<MemoryStore>) -> PhotoStore {
        PhotoStore::new(backend, 10_000, CompressionSettings::new(200, 70))
    }

    #[tokio::test]
    async fn test_empty_store_reads_empty() {
        let store = store_with(Arc::new(MemoryStore::new()));
        assert!(store.get_user_photos().await.is_empty());
        assert!(store.get_shared_pool_local().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(USER_PHOTOS_KEY, "{not json".to_string())
            .await
            .unwrap();
        backend
            .set(SHARED_POOL_KEY, r#"[{"id": 3}]"#.to_string())
            .await
            .unwrap();

        let store = store_with(backend);
        assert!(store.get_user_photos().await.is_empty());
        assert!(store.get_shared_pool_local().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_record() {
        let store = store_with(Arc::new(MemoryStore::new()));
        store
            .save_user_photos(&[photo("a", false), photo("b", false)])
            .await
            .unwrap();
        store.save_user_photos(&[photo("c", false)]).await.unwrap();

        let ids: Vec<_> = store
            .get_user_photos()
            .await
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let backend = Arc::new(MemoryStore::new());
        let store = store_with(backend.clone());
        let mut big = photo("big", false);
        big.image_data = png_data_url(600, 400);
        let photos = vec![photo("a", true), big];

        store.save_user_photos(&photos).await.unwrap();
        let first = backend.get(USER_PHOTOS_KEY).await.unwrap();
        store.save_user_photos(&photos).await.unwrap();
        let second = backend.get(USER_PHOTOS_KEY).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get_shared_pool_local().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_compresses_only_oversized_prints() {
        let store = store_with(Arc::new(MemoryStore::new()));
        let mut big = photo("big", false);
        big.image_data = png_data_url(600, 400);
        let small = photo("small", false);

        store
            .save_user_photos(&[big.clone(), small.clone()])
            .await
            .unwrap();
        let saved = store.get_user_photos().await;

        assert!(saved[0].image_data.len() < big.image_data.len());
        assert_eq!(dimensions_of(&saved[0].image_data), (200, 133));
        assert_eq!(saved[1].image_data, small.image_data);
    }

    #[tokio::test]
    async fn test_save_adds_missing_public_prints_to_pool() {
        let store = store_with(Arc::new(MemoryStore::new()));
        let mut pooled = photo("shared", true);
        pooled.caption = Some("from the pool".to_string());
        store.add_to_shared_pool_local(&[pooled]).await.unwrap();

        let mut local = photo("shared", true);
        local.caption = Some("edited locally".to_string());
        store
            .save_user_photos(&[local, photo("new", true), photo("private", false)])
            .await
            .unwrap();

        let pool = store.get_shared_pool_local().await;
        let ids: Vec<_> = pool.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["shared", "new"]);
        // Already-present prints are not re-synced on save.
        assert_eq!(pool[0].caption.as_deref(), Some("from the pool"));
    }

    #[tokio::test]
    async fn test_add_to_pool_is_last_write_wins() {
        let store = store_with(Arc::new(MemoryStore::new()));
        let mut first = photo("x", true);
        first.caption = Some("first".to_string());
        let mut second = photo("x", true);
        second.caption = Some("second".to_string());

        store.add_to_shared_pool_local(&[first]).await.unwrap();
        store
            .add_to_shared_pool_local(&[second, photo("y", true)])
            .await
            .unwrap();

        let pool = store.get_shared_pool_local().await;
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].caption.as_deref(), Some("second"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_pool_writes_keep_every_print() {
        let store = store_with(Arc::new(MemoryStore::new()));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let shared = photo(&format!("p{}", i), true);
                    if i % 2 == 0 {
                        store.add_to_shared_pool_local(&[shared]).await.unwrap();
                    } else {
                        store.save_user_photos(&[shared]).await.unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get_shared_pool_local().await.len(), 20);
    }

    #[tokio::test]
    async fn test_quota_failure_keeps_previous_record() {
        let backend = Arc::new(MemoryStore::with_capacity(600));
        let store = store_with(backend);

        store.save_user_photos(&[photo("a", false)]).await.unwrap();

        let many: Vec<Photo> = (0..20).map(|i| photo(&format!("p{}", i), false)).collect();
        let err = store.save_user_photos(&many).await.unwrap_err();
        assert!(err.is_quota_exceeded());

        let saved = store.get_user_photos().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, "a");
    }
}
