// Storage module - durable local storage for the user's prints and the fallback pool
pub mod backends;
mod error;
mod photo_store;

pub use backends::{FileStore, MemoryStore};
pub use error::StorageError;
pub use photo_store::{PhotoStore, SHARED_POOL_KEY, USER_PHOTOS_KEY};

use async_trait::async_trait;
use std::sync::Arc;

/// String key-value storage with a capacity limit.
///
/// `set` replaces the whole value and fails with [`StorageError::QuotaExceeded`]
/// when the new value would not fit, leaving the previous value in place.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn name(&self) -> &str;
}

pub type DynKeyValueStore = Arc<dyn KeyValueStore>;

pub fn create_store(config: &crate::StorageConfig) -> DynKeyValueStore {
    Arc::new(FileStore::new(
        config.directory.clone(),
        config.capacity_bytes,
    ))
}
