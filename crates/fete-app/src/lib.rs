//! # fete-app
//!
//! The application core behind the guest-facing screens: the state
//! container holding every persisted collection, and the operation layer
//! (schedule, guestbook, photos, playlist, profile, organiser tools) the UI
//! invokes.  Rendering and navigation live elsewhere; this crate owns the
//! behavior.
//!
//! Mutations are single-writer by construction: every operation takes
//! `&mut AppState`, and each collection is rewritten wholesale through its
//! [`fete_store::StoredCollection`] boundary.

pub mod commands;
pub mod notify;
pub mod state;

mod error;

pub use error::AppError;
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging for a binary embedding the app core.
///
/// Respects `RUST_LOG`; defaults to debug for the Fete crates and warn for
/// everything else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("fete_app=debug,fete_cloud=debug,fete_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
