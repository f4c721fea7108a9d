//! Schedule management.
//!
//! The schedule is a flat list of entries with one cross-record invariant:
//! at most one entry is "current".  [`mark_current`] enforces it by
//! rewriting the whole collection in a single pass, so it cannot produce
//! two current entries no matter how often it is called.  Deleting the
//! current entry leaves zero current entries; nothing auto-promotes.

use tracing::info;

use fete_shared::types::EventId;
use fete_store::WeddingEvent;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Append a schedule entry.
///
/// Time, title, and location are required; a blank in any of them is a
/// blocking validation failure.  New entries are never current.
pub fn add_event(
    state: &mut AppState,
    time: &str,
    title: &str,
    location: &str,
    description: Option<&str>,
) -> Result<WeddingEvent> {
    let (time, title, location) = (time.trim(), title.trim(), location.trim());
    if time.is_empty() || title.is_empty() || location.is_empty() {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    let event = WeddingEvent {
        id: EventId::new(),
        time: time.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        current: false,
        description: description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
    };

    let appended = event.clone();
    state.events.mutate(&state.db, move |items| {
        let mut next = items.to_vec();
        next.push(appended);
        next
    })?;

    info!(id = %event.id, title = %event.title, "schedule entry added");
    Ok(event)
}

/// Remove a schedule entry.  Returns whether anything was removed.
pub fn delete_event(state: &mut AppState, id: EventId) -> Result<bool> {
    let before = state.events.len();
    state.events.mutate(&state.db, |items| {
        items.iter().filter(|e| e.id != id).cloned().collect()
    })?;

    let removed = state.events.len() < before;
    if removed {
        info!(%id, "schedule entry deleted");
    }
    Ok(removed)
}

/// Flag `id` as the entry presently happening, clearing the flag everywhere
/// else.  Idempotent.
pub fn mark_current(state: &mut AppState, id: EventId) -> Result<()> {
    state.events.mutate(&state.db, |items| {
        items
            .iter()
            .cloned()
            .map(|mut event| {
                event.current = event.id == id;
                event
            })
            .collect()
    })?;

    info!(%id, "schedule entry marked current");
    Ok(())
}

/// The entry currently flagged as happening, if any.
pub fn current_event(state: &AppState) -> Option<&WeddingEvent> {
    state.events.items().iter().find(|e| e.current)
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

    #[test]
    fn add_requires_all_fields() {
        let (mut state, _dir) = test_state();
        assert!(add_event(&mut state, "", "Ceremony", "Pavilion", None).is_err());
        assert!(add_event(&mut state, "2:00 PM", "  ", "Pavilion", None).is_err());
        assert!(add_event(&mut state, "2:00 PM", "Ceremony", "", None).is_err());
        assert!(state.events.is_empty());
    }

    #[test]
    fn add_appends_non_current_entry() {
        let (mut state, _dir) = test_state();
        let event =
            add_event(&mut state, "2:00 PM", "Ceremony", "Pavilion", Some("Bring tissues"))
                .unwrap();
        assert!(!event.current);
        assert_eq!(state.events.len(), 1);
        assert_eq!(
            state.events.items()[0].description.as_deref(),
            Some("Bring tissues")
        );
    }

    #[test]
    fn blank_description_is_dropped() {
        let (mut state, _dir) = test_state();
        let event = add_event(&mut state, "2:00 PM", "Ceremony", "Pavilion", Some("  "))
            .unwrap();
        assert_eq!(event.description, None);
    }

    #[test]
    fn mark_current_is_exclusive_and_idempotent() {
        let (mut state, _dir) = test_state();
        let a = add_event(&mut state, "2:00 PM", "Ceremony", "Pavilion", None).unwrap();
        let b = add_event(&mut state, "6:00 PM", "Dinner", "Hall", None).unwrap();

        mark_current(&mut state, a.id).unwrap();
        mark_current(&mut state, b.id).unwrap();
        mark_current(&mut state, b.id).unwrap();

        let current: Vec<_> = state.events.items().iter().filter(|e| e.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, b.id);
    }

    #[test]
    fn deleting_current_entry_leaves_none_current() {
        let (mut state, _dir) = test_state();
        let a = add_event(&mut state, "2:00 PM", "Ceremony", "Pavilion", None).unwrap();
        let b = add_event(&mut state, "6:00 PM", "Dinner", "Hall", None).unwrap();
        mark_current(&mut state, b.id).unwrap();

        assert!(delete_event(&mut state, b.id).unwrap());

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events.items()[0].id, a.id);
        assert!(current_event(&state).is_none());
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let (mut state, _dir) = test_state();
        add_event(&mut state, "2:00 PM", "Ceremony", "Pavilion", None).unwrap();
        assert!(!delete_event(&mut state, EventId::new()).unwrap());
        assert_eq!(state.events.len(), 1);
    }
}
