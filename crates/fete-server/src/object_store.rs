use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::ServerError;

/// Validate a client-supplied object path and resolve it under the base
/// directory. Rejects anything that could escape the storage root.
fn checked_path(base: &Path, raw: &str) -> Result<PathBuf, ServerError> {
    if raw.is_empty() {
        return Err(ServerError::BadRequest("Empty object path".to_string()));
    }
    if raw.contains('\\') {
        return Err(ServerError::BadRequest(
            "Backslash in object path".to_string(),
        ));
    }
    let relative = Path::new(raw);
    for component in relative.components() {
        match component {
            Component::Normal(_) => {}
            _ => {
                return Err(ServerError::BadRequest(
                    "Path traversal detected".to_string(),
                ));
            }
        }
    }
    Ok(base.join(relative))
}

/// Disk-backed object storage. Objects are opaque byte files addressed by
/// relative paths like `wedding-photos/20241024T183000000Z-Jane-Doe.jpg`.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    base_path: PathBuf,
    max_size: usize,
}

impl ObjectStore {
    pub async fn new(base_path: PathBuf, max_size: usize) -> Result<Self, ServerError> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            ServerError::Storage(format!(
                "Failed to create storage directory '{}': {}",
                base_path.display(),
                e
            ))
        })?;

        info!(path = %base_path.display(), "Object store initialized");

        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub async fn put(&self, path: &str, data: &[u8]) -> Result<(), ServerError> {
        if data.is_empty() {
            return Err(ServerError::BadRequest("Empty object".to_string()));
        }
        if data.len() > self.max_size {
            return Err(ServerError::ObjectTooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        let full = checked_path(&self.base_path, path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ServerError::Storage(format!("Failed to create parent for {}: {}", path, e))
            })?;
        }

        fs::write(&full, data)
            .await
            .map_err(|e| ServerError::Storage(format!("Failed to write {}: {}", path, e)))?;

        debug!(path, size = data.len(), "Stored object");
        Ok(())
    }

    pub async fn get(&self, path: &str) -> Result<Vec<u8>, ServerError> {
        let full = checked_path(&self.base_path, path)?;

        if !full.exists() {
            return Err(ServerError::ObjectNotFound(path.to_string()));
        }

        let data = fs::read(&full)
            .await
            .map_err(|e| ServerError::Storage(format!("Failed to read {}: {}", path, e)))?;

        debug!(path, size = data.len(), "Retrieved object");
        Ok(data)
    }

    /// List object paths under a prefix directory, sorted. A prefix with no
    /// matching directory yields an empty list rather than an error.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, ServerError> {
        let dir = if prefix.is_empty() {
            self.base_path.clone()
        } else {
            checked_path(&self.base_path, prefix.trim_end_matches('/'))?
        };

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ServerError::Storage(format!(
                    "Failed to list {}: {}",
                    prefix, e
                )));
            }
        };

        let mut objects = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            ServerError::Storage(format!("Failed to read directory entry: {}", e))
        })? {
            let file_type = entry.file_type().await.map_err(|e| {
                ServerError::Storage(format!("Failed to stat directory entry: {}", e))
            })?;
            if !file_type.is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.base_path) {
                if let Some(name) = relative.to_str() {
                    objects.push(name.to_string());
                }
            }
        }

        objects.sort();
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (ObjectStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf(), 1024 * 1024)
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn put_and_get() {
        let (store, _dir) = test_store().await;
        store
            .put("wedding-photos/a.jpg", b"jpeg-bytes")
            .await
            .unwrap();

        let data = store.get("wedding-photos/a.jpg").await.unwrap();
        assert_eq!(data, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn list_is_sorted_and_scoped_to_prefix() {
        let (store, _dir) = test_store().await;
        store.put("wedding-photos/b.jpg", b"b").await.unwrap();
        store.put("wedding-photos/a.jpg", b"a").await.unwrap();
        store.put("other/c.jpg", b"c").await.unwrap();

        let objects = store.list("wedding-photos").await.unwrap();
        assert_eq!(
            objects,
            vec![
                "wedding-photos/a.jpg".to_string(),
                "wedding-photos/b.jpg".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn list_missing_prefix_is_empty() {
        let (store, _dir) = test_store().await;
        let objects = store.list("nothing-here").await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn traversal_rejected() {
        let (store, _dir) = test_store().await;
        assert!(store.put("../escape.jpg", b"x").await.is_err());
        assert!(store.get("../../etc/passwd").await.is_err());
        assert!(store.put("/absolute.jpg", b"x").await.is_err());
    }

    #[tokio::test]
    async fn empty_object_rejected() {
        let (store, _dir) = test_store().await;
        assert!(store.put("wedding-photos/empty.jpg", b"").await.is_err());
    }

    #[tokio::test]
    async fn oversized_object_rejected() {
        let dir = TempDir::new().unwrap();
        let store = ObjectStore::new(dir.path().to_path_buf(), 8).await.unwrap();
        assert!(store
            .put("wedding-photos/big.jpg", b"way too many bytes")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (store, _dir) = test_store().await;
        let err = store.get("wedding-photos/missing.jpg").await.unwrap_err();
        assert!(matches!(err, ServerError::ObjectNotFound(_)));
    }
}
