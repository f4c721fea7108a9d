//! Photo synchronization between a local capture and the shared cloud
//! collection.
//!
//! Every shared photo is one object under [`CLOUD_PHOTO_PREFIX`], named
//! `<compact ISO-8601 timestamp>-<Contributor-With-Hyphens>.jpg`.  Metadata
//! (contributor, capture instant) travels two ways:
//!
//! 1. A JSON sidecar descriptor (`<object>.json`) uploaded next to the
//!    image.  This is the authoritative record.
//! 2. The object name itself, kept as a fallback for objects whose sidecar
//!    is missing.  The timestamp segment is deliberately hyphen-free so the
//!    `-`-separated convention round-trips; names that still fail to parse
//!    degrade to placeholder metadata rather than an error.
//!
//! Failures here are soft by contract: submission returns `None` and the
//! caller falls back to "saved locally", listing returns an empty sequence.
//! Nothing retries and nothing is surfaced as fatal.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fete_shared::constants::{
    CLOUD_PHOTO_PREFIX, OBJECT_NAME_TIMESTAMP_FORMAT, UNKNOWN_CONTRIBUTOR, UNKNOWN_TIMESTAMP,
};
use fete_shared::time::format_timestamp;

use crate::blob_store::{BlobStore, ObjectHandle};
use crate::error::Result;

/// A photo in the shared cloud collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudPhoto {
    /// Identifier derived from the storage object name.
    pub id: String,
    /// Durable fetchable URL.
    pub url: String,
    /// Contributor display name, or `"Unknown Guest"` if unrecoverable.
    pub contributor_name: String,
    /// Human-readable capture stamp, or `"Unknown time"` if unrecoverable.
    pub timestamp: String,
    /// Structured capture instant when metadata recovery succeeded.
    pub taken_at: Option<DateTime<Utc>>,
    /// The raw storage object name.
    pub object_name: String,
}

/// Sidecar descriptor stored alongside each uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDescriptor {
    pub contributor_name: String,
    pub taken_at: DateTime<Utc>,
}

/// Build the object name for a capture.
///
/// Whitespace runs in the contributor name become single hyphens, e.g.
/// `"Jane Doe"` at 2024-10-24 18:30 UTC becomes
/// `20241024T183000000Z-Jane-Doe.jpg`.
pub fn encode_object_name(taken_at: &DateTime<Utc>, contributor_name: &str) -> String {
    let slug = contributor_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!(
        "{}-{}.jpg",
        taken_at.format(OBJECT_NAME_TIMESTAMP_FORMAT),
        slug
    )
}

/// Recover `(capture instant, contributor)` from an object name.
///
/// Requires at least three `-`-separated segments: the leading timestamp
/// plus at least two name segments.  Anything less yields `(None, None)`
/// and the caller substitutes placeholders.  A recognisable shape with an
/// unparsable timestamp still recovers the contributor.
pub fn metadata_from_name(name: &str) -> (Option<DateTime<Utc>>, Option<String>) {
    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() < 3 {
        return (None, None);
    }

    let taken_at = NaiveDateTime::parse_from_str(parts[0], OBJECT_NAME_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc());

    let tail = parts[1..].join("-");
    let tail = tail.strip_suffix(".jpg").unwrap_or(&tail);
    let contributor = tail.replace('-', " ");

    (taken_at, Some(contributor))
}

/// Bridges local captures and the shared, append-only cloud photo
/// collection.
#[derive(Debug, Clone)]
pub struct PhotoSync<S> {
    store: S,
}

impl<S: BlobStore> PhotoSync<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upload a capture to the shared collection.
    ///
    /// The caller guarantees `contributor_name` is non-empty after trimming.
    /// Any failure (unreadable file, store unavailable) logs a warning and
    /// returns `None`; the caller falls back to local-only messaging.  No
    /// retry is attempted.
    pub async fn submit(&self, image_path: &Path, contributor_name: &str) -> Option<CloudPhoto> {
        match self
            .try_submit(image_path, contributor_name, Utc::now())
            .await
        {
            Ok(photo) => Some(photo),
            Err(e) => {
                warn!(image = %image_path.display(), error = %e, "photo upload failed");
                None
            }
        }
    }

    async fn try_submit(
        &self,
        image_path: &Path,
        contributor_name: &str,
        taken_at: DateTime<Utc>,
    ) -> Result<CloudPhoto> {
        let contributor_name = contributor_name.trim();
        let bytes = tokio::fs::read(image_path).await?;

        let object_name = encode_object_name(&taken_at, contributor_name);
        let object_path = format!("{CLOUD_PHOTO_PREFIX}{object_name}");

        let handle = self.store.put(&object_path, &bytes).await?;

        // Sidecar descriptor: metadata as first-class data rather than
        // something scraped back out of the file name.  Best effort; a
        // missing sidecar only costs us the filename fallback on listing.
        let descriptor = PhotoDescriptor {
            contributor_name: contributor_name.to_string(),
            taken_at,
        };
        let sidecar = serde_json::to_vec(&descriptor)?;
        if let Err(e) = self.store.put(&format!("{object_path}.json"), &sidecar).await {
            warn!(object = %object_name, error = %e, "sidecar descriptor upload failed");
        }

        let url = self.store.resolve_url(&handle).await?;

        debug!(object = %object_name, size = bytes.len(), "photo uploaded");

        Ok(CloudPhoto {
            id: object_name.clone(),
            url,
            contributor_name: contributor_name.to_string(),
            timestamp: format_timestamp(&taken_at),
            taken_at: Some(taken_at),
            object_name,
        })
    }

    /// Every photo in the shared collection, newest first.
    ///
    /// Store-level failure (including a prefix nothing has been uploaded to
    /// yet) yields an empty sequence, never an error.  Photos whose
    /// timestamp could not be recovered sort last.
    pub async fn list_all(&self) -> Vec<CloudPhoto> {
        match self.try_list().await {
            Ok(photos) => photos,
            Err(e) => {
                warn!(error = %e, "failed to list cloud photos");
                Vec::new()
            }
        }
    }

    async fn try_list(&self) -> Result<Vec<CloudPhoto>> {
        let handles = self.store.list_under(CLOUD_PHOTO_PREFIX).await?;

        let mut photos = Vec::new();
        for handle in handles.iter().filter(|h| !h.path.ends_with(".json")) {
            let url = match self.store.resolve_url(handle).await {
                Ok(url) => url,
                Err(e) => {
                    warn!(object = handle.name(), error = %e, "skipping unresolvable object");
                    continue;
                }
            };

            let (taken_at, contributor) = self.metadata_for(handle).await;

            photos.push(CloudPhoto {
                id: handle.name().to_string(),
                url,
                contributor_name: contributor.unwrap_or_else(|| UNKNOWN_CONTRIBUTOR.to_string()),
                timestamp: taken_at
                    .map(|t| format_timestamp(&t))
                    .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string()),
                taken_at,
                object_name: handle.name().to_string(),
            });
        }

        // Newest first; None sorts after every Some.
        photos.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        Ok(photos)
    }

    /// Sidecar descriptor wins; the object name is the fallback.
    async fn metadata_for(&self, handle: &ObjectHandle) -> (Option<DateTime<Utc>>, Option<String>) {
        if let Ok(bytes) = self.store.get(&format!("{}.json", handle.path)).await {
            match serde_json::from_slice::<PhotoDescriptor>(&bytes) {
                Ok(descriptor) => {
                    return (Some(descriptor.taken_at), Some(descriptor.contributor_name))
                }
                Err(e) => {
                    warn!(object = handle.name(), error = %e, "unreadable sidecar descriptor");
                }
            }
        }
        metadata_from_name(handle.name())
    }

    /// Number of photos in the shared collection; `0` on any failure.
    pub async fn count(&self) -> usize {
        match self.store.list_under(CLOUD_PHOTO_PREFIX).await {
            Ok(handles) => handles
                .iter()
                .filter(|h| !h.path.ends_with(".json"))
                .count(),
            Err(e) => {
                warn!(error = %e, "failed to count cloud photos");
                0
            }
        }
    }
}
