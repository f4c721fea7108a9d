//! Photo submission.
//!
//! A capture is recorded locally first (best-effort copy into the app's
//! photo directory plus an appended record), then offered to the cloud
//! collection.  Cloud failure is not an error: the record stays local and
//! the guest sees a "saved locally" outcome.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use fete_cloud::{BlobStore, CloudPhoto, PhotoSync};
use fete_shared::time::format_timestamp;
use fete_shared::types::PhotoId;
use fete_store::Photo;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// How far a submission made it.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Uploaded to the shared collection.
    Synced(CloudPhoto),
    /// Recorded locally only; the cloud was unreachable.
    LocalOnly,
}

/// Record a capture and offer it to the shared collection.
///
/// The contributor name is required.  Local recording failures are real
/// errors; cloud failures degrade to [`SyncOutcome::LocalOnly`].
pub async fn submit_photo<S: BlobStore>(
    state: &mut AppState,
    sync: &PhotoSync<S>,
    image_path: &Path,
    contributor_name: &str,
) -> Result<SyncOutcome> {
    let contributor_name = contributor_name.trim();
    if contributor_name.is_empty() {
        return Err(AppError::Validation(
            "Please enter your name before adding a photo".to_string(),
        ));
    }

    let local_path = copy_to_photo_dir(state, image_path).await;

    let photo = Photo {
        id: PhotoId::new(),
        uri: image_path.display().to_string(),
        contributor_name: contributor_name.to_string(),
        timestamp: format_timestamp(&Utc::now()),
        local_path,
    };

    let appended = photo.clone();
    state.photos.mutate(&state.db, move |items| {
        let mut next = items.to_vec();
        next.push(appended);
        next
    })?;

    match sync.submit(image_path, contributor_name).await {
        Some(cloud) => {
            info!(id = %photo.id, object = %cloud.object_name, "photo synced to cloud");
            Ok(SyncOutcome::Synced(cloud))
        }
        None => {
            info!(id = %photo.id, "photo saved locally, will sync later");
            Ok(SyncOutcome::LocalOnly)
        }
    }
}

/// Copy the capture into the app's photo directory.
///
/// Best effort: on any failure the record keeps only the original URI.
async fn copy_to_photo_dir(state: &AppState, image_path: &Path) -> Option<String> {
    let file_name = format!("wedding_photo_{}.jpg", Utc::now().timestamp_millis());
    let destination = state.photo_dir.join(file_name);

    let result = async {
        tokio::fs::create_dir_all(&state.photo_dir).await?;
        tokio::fs::copy(image_path, &destination).await
    }
    .await;

    match result {
        Ok(_) => Some(destination.display().to_string()),
        Err(e) => {
            warn!(image = %image_path.display(), error = %e, "could not copy capture");
            None
        }
    }
}

/// Every locally recorded photo, in submission order.
pub fn local_photos(state: &AppState) -> &[Photo] {
    state.photos.items()
}

pub fn photo_count(state: &AppState) -> usize {
    state.photos.len()
}
