//! Remote object storage addressed by relative path.
//!
//! Objects live under string paths like `wedding-photos/<name>.jpg` and
//! resolve to durable fetchable URLs.  [`FsBlobStore`] keeps objects in a
//! local directory (single-device and test deployments); [`HttpBlobStore`]
//! speaks to the `fete-server` object API.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};

use fete_shared::constants::MAX_PHOTO_SIZE;

use crate::error::{CloudError, Result};

/// Handle to one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle {
    /// Store-relative path, e.g. `wedding-photos/20241024T183000000Z-Jane-Doe.jpg`.
    pub path: String,
}

impl ObjectHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The object's file name (last path segment).
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Asynchronous blob storage.
///
/// All paths are store-relative.  Implementations reject traversal outside
/// the store; they do not interpret object contents.
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    /// Store `bytes` under `path`, replacing any previous object.
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<ObjectHandle>;

    /// Fetch the object stored under `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>>;

    /// Resolve a handle to a durable fetchable URL.
    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String>;

    /// List every object directly under `prefix`.  A prefix nothing has
    /// been stored under yet yields an empty list, not an error.
    async fn list_under(&self, prefix: &str) -> Result<Vec<ObjectHandle>>;
}

/// Reject empty paths and anything that could escape the store root.
fn checked_relative(path: &str) -> Result<&Path> {
    if path.is_empty() {
        return Err(CloudError::InvalidPath("empty path".to_string()));
    }
    if path.contains('\\') {
        return Err(CloudError::InvalidPath(path.to_string()));
    }
    let rel = Path::new(path);
    let all_normal = rel.components().all(|c| matches!(c, Component::Normal(_)));
    if !all_normal {
        return Err(CloudError::InvalidPath(path.to_string()));
    }
    Ok(rel)
}

// ---------------------------------------------------------------------------
// Filesystem-backed store
// ---------------------------------------------------------------------------

/// Blob store over a local directory.
///
/// URLs are formed by joining the object path onto a configured public base
/// URL, so a plain static file server in front of the directory makes every
/// object fetchable.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
    max_size: usize,
}

impl FsBlobStore {
    pub async fn new(root: PathBuf, public_base_url: impl Into<String>) -> Result<Self> {
        fs::create_dir_all(&root).await?;

        info!(path = %root.display(), "blob store initialized");

        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_size: MAX_PHOTO_SIZE,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, rel: &str) -> Result<PathBuf> {
        Ok(self.root.join(checked_relative(rel)?))
    }
}

impl BlobStore for FsBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<ObjectHandle> {
        if bytes.is_empty() {
            return Err(CloudError::EmptyObject);
        }
        if bytes.len() > self.max_size {
            return Err(CloudError::TooLarge {
                size: bytes.len(),
                max: self.max_size,
            });
        }

        let full = self.object_path(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full, bytes).await?;

        debug!(path, size = bytes.len(), "stored object");
        Ok(ObjectHandle::new(path))
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.object_path(path)?;
        Ok(fs::read(&full).await?)
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String> {
        checked_relative(&handle.path)?;
        Ok(format!("{}/{}", self.public_base_url, handle.path))
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<ObjectHandle>> {
        let prefix = prefix.trim_end_matches('/');
        let dir = self.object_path(prefix)?;

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // Nothing stored under the prefix yet.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut handles = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                handles.push(ObjectHandle::new(format!("{prefix}/{name}")));
            }
        }

        handles.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(handles)
    }
}

// ---------------------------------------------------------------------------
// HTTP-backed store
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListResponse {
    objects: Vec<String>,
}

/// Blob store client for the `fete-server` object API.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/objects/{}", self.base_url, path)
    }
}

impl BlobStore for HttpBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<ObjectHandle> {
        checked_relative(path)?;
        self.client
            .put(self.object_url(path))
            .body(bytes.to_vec())
            .send()
            .await?
            .error_for_status()?;

        debug!(path, size = bytes.len(), "uploaded object");
        Ok(ObjectHandle::new(path))
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        checked_relative(path)?;
        let response = self
            .client
            .get(self.object_url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String> {
        checked_relative(&handle.path)?;
        Ok(self.object_url(&handle.path))
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<ObjectHandle>> {
        let response = self
            .client
            .get(format!("{}/list", self.base_url))
            .query(&[("prefix", prefix)])
            .send()
            .await?
            .error_for_status()?;

        let listing: ListResponse = response.json().await?;
        Ok(listing.objects.into_iter().map(ObjectHandle::new).collect())
    }
}
