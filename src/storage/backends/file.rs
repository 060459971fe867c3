use crate::storage::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Key-value storage backed by one JSON file per key in a directory.
///
/// The sum of all stored values is bounded by `capacity` bytes, the same way a
/// browser bounds an origin's local storage.
pub struct FileStore {
    directory: PathBuf,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            directory: directory.into(),
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.directory.join(format!("{}.json", key)))
    }

    /// Bytes used by every stored key except `exclude`.
    async fn used_bytes_excluding(&self, exclude: &Path) -> Result<usize, StorageError> {
        let mut used = 0usize;
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == exclude || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            used += entry.metadata().await?.len() as usize;
        }

        Ok(used)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().await;

        let needed = self.used_bytes_excluding(&path).await? + value.len();
        if needed > self.capacity {
            return Err(StorageError::QuotaExceeded {
                needed,
                capacity: self.capacity,
            });
        }

        tokio::fs::create_dir_all(&self.directory).await?;

        // Write to a temp file first so a failed write never truncates the
        // previous value.
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, value.as_bytes()).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        debug!("Stored {} bytes under {:?}", value.len(), path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "File"
    }
}
