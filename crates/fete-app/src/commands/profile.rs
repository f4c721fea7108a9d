//! The guest profile.
//!
//! A device-singleton record overwritten wholesale on every save.

use tracing::info;

use fete_store::UserProfile;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Overwrite the stored profile.  The guest name is required; the free-text
/// travel/dietary/allergy fields are optional and blanks are dropped.
pub fn save_profile(state: &mut AppState, profile: UserProfile) -> Result<()> {
    let guest_name = profile.guest_name.trim().to_string();
    if guest_name.is_empty() {
        return Err(AppError::Validation("Please enter your name".to_string()));
    }

    let cleaned = UserProfile {
        guest_name,
        travel: profile.travel.filter(|v| !v.trim().is_empty()),
        dietary: profile.dietary.filter(|v| !v.trim().is_empty()),
        allergies: profile.allergies.filter(|v| !v.trim().is_empty()),
    };

    state.profile.set(&state.db, cleaned)?;
    info!("guest profile saved");
    Ok(())
}

/// The stored profile, if the guest has saved one.
pub fn profile(state: &AppState) -> Option<&UserProfile> {
    state.profile.get()
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
    fn guest_name_is_required() {
        let (mut state, _dir) = test_state();
        let result = save_profile(
            &mut state,
            UserProfile {
                guest_name: "   ".into(),
                travel: None,
                dietary: None,
                allergies: None,
            },
        );
        assert!(result.is_err());
        assert!(profile(&state).is_none());
    }

    #[test]
    fn save_overwrites_and_trims() {
        let (mut state, _dir) = test_state();
        save_profile(
            &mut state,
            UserProfile {
                guest_name: " Jane Doe ".into(),
                travel: Some("Flying in Friday".into()),
                dietary: Some("   ".into()),
                allergies: None,
            },
        )
        .unwrap();

        let stored = profile(&state).unwrap();
        assert_eq!(stored.guest_name, "Jane Doe");
        assert_eq!(stored.travel.as_deref(), Some("Flying in Friday"));
        assert_eq!(stored.dietary, None);

        save_profile(
            &mut state,
            UserProfile {
                guest_name: "Jane D.".into(),
                travel: None,
                dietary: None,
                allergies: None,
            },
        )
        .unwrap();
        assert_eq!(profile(&state).unwrap().guest_name, "Jane D.");
    }
}
