//! Application state shared across all operations.
//!
//! [`AppState`] owns the database handle and one stored collection per
//! logical dataset, hydrated once at startup.  Operations take `&mut
//! AppState`, so each collection has exactly one writer and every mutation
//! goes through the whole-collection persistence boundary.

use std::path::PathBuf;

use fete_shared::constants::{
    CHAT_USERS_KEY, EVENTS_KEY, MESSAGES_KEY, PHOTOS_KEY, PLAYLIST_KEY, PROFILE_KEY,
};
use fete_store::{
    ChatUser, Database, Message, Photo, Song, StoredCollection, StoredValue, UserProfile,
    WeddingEvent,
};

/// Central application state.
pub struct AppState {
    /// Handle to the local SQLite-backed key-value store.
    pub db: Database,

    /// Directory guest captures are copied into.
    pub photo_dir: PathBuf,

    /// The event schedule.
    pub events: StoredCollection<WeddingEvent>,

    /// Locally captured photo records.
    pub photos: StoredCollection<Photo>,

    /// Guestbook / chat messages.
    pub messages: StoredCollection<Message>,

    /// Guest song requests.
    pub playlist: StoredCollection<Song>,

    /// Side table of distinct message senders.
    pub chat_users: StoredCollection<ChatUser>,

    /// The device-singleton guest profile.
    pub profile: StoredValue<UserProfile>,
}

impl AppState {
    /// Hydrate every collection from the store.
    ///
    /// Missing or unreadable blobs degrade to empty collections; startup
    /// never fails on bad state.
    pub fn load(db: Database, photo_dir: PathBuf) -> Self {
        let events = StoredCollection::load(&db, EVENTS_KEY);
        let photos = StoredCollection::load(&db, PHOTOS_KEY);
        let messages = StoredCollection::load(&db, MESSAGES_KEY);
        let playlist = StoredCollection::load(&db, PLAYLIST_KEY);
        let chat_users = StoredCollection::load(&db, CHAT_USERS_KEY);
        let profile = StoredValue::load(&db, PROFILE_KEY);

        tracing::info!(
            events = events.len(),
            photos = photos.len(),
            messages = messages.len(),
            songs = playlist.len(),
            "application state hydrated"
        );

        Self {
            db,
            photo_dir,
            events,
            photos,
            messages,
            playlist,
            chat_users,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::schedule;

    #[test]
    fn state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("fete.db");
        let photo_dir = dir.path().join("photos");

        {
            let db = Database::open_at(&db_path).unwrap();
            let mut state = AppState::load(db, photo_dir.clone());
            schedule::add_event(&mut state, "2:00 PM", "Ceremony", "The Pavilion", None)
                .unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        let state = AppState::load(db, photo_dir);
        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events.items()[0].title, "Ceremony");
    }
}
