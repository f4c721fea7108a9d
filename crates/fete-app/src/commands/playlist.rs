//! Song requests.
//!
//! Guests pick a suggestion from the catalog search (or its fallback list)
//! and attach their name; requests are append-only.

use chrono::Utc;
use tracing::info;

use fete_cloud::SongSuggestion;
use fete_shared::time::format_timestamp;
use fete_shared::types::SongId;
use fete_store::Song;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Append a song request from a catalog suggestion.
pub fn add_song(
    state: &mut AppState,
    suggestion: &SongSuggestion,
    contributor_name: &str,
) -> Result<Song> {
    let contributor_name = contributor_name.trim();
    if contributor_name.is_empty() {
        return Err(AppError::Validation(
            "Please enter your name first".to_string(),
        ));
    }

    let song = Song {
        id: SongId::new(),
        title: suggestion.title.clone(),
        artist: suggestion.artist.clone(),
        album: Some(suggestion.album.clone()).filter(|a| !a.is_empty()),
        contributor_name: contributor_name.to_string(),
        timestamp: format_timestamp(&Utc::now()),
    };

    let appended = song.clone();
    state.playlist.mutate(&state.db, move |items| {
        let mut next = items.to_vec();
        next.push(appended);
        next
    })?;

    info!(id = %song.id, title = %song.title, "song request added");
    Ok(song)
}

/// Every song request, in request order.
pub fn requests(state: &AppState) -> &[Song] {
    state.playlist.items()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fete_store::Database;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("fete.db")).unwrap();
        let state = AppState::load(db, dir.path().join("photos"));
        (state, dir)
    }

    fn suggestion() -> SongSuggestion {
        SongSuggestion {
            id: "perfect".into(),
            title: "Perfect".into(),
            artist: "Ed Sheeran".into(),
            album: "÷ (Divide)".into(),
            duration_ms: 263_000,
            artwork_url: None,
        }
    }

    #[test]
    fn contributor_name_is_required() {
        let (mut state, _dir) = test_state();
        assert!(add_song(&mut state, &suggestion(), "  ").is_err());
        assert!(state.playlist.is_empty());
    }

    #[test]
    fn requests_append_in_order() {
        let (mut state, _dir) = test_state();
        add_song(&mut state, &suggestion(), "Jane").unwrap();
        add_song(&mut state, &suggestion(), "Bob").unwrap();

        let contributors: Vec<_> = requests(&state)
            .iter()
            .map(|s| s.contributor_name.as_str())
            .collect();
        assert_eq!(contributors, ["Jane", "Bob"]);
        assert_eq!(requests(&state)[0].album.as_deref(), Some("÷ (Divide)"));
    }
}
