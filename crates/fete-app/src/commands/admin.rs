//! Organiser tools: the admin gate and guest broadcasts.
//!
//! The gate is a screen lock, not an account system: one shared passphrase,
//! configured through the environment rather than compiled in, checked in
//! constant time.  An unset or empty passphrase disables the organiser
//! surface entirely.

use subtle::ConstantTimeEq;
use tracing::{info, warn};
use uuid::Uuid;

use fete_shared::constants::ADMIN_SECRET_ENV;

use crate::error::{AppError, Result};
use crate::notify::{templates, Notifier};

/// Proof that the organiser passphrase was presented.
///
/// Only [`AdminGate::authenticate`] can mint one, so operations requiring
/// `&AdminSession` are unreachable without the passphrase.
pub struct AdminSession(());

/// The organiser passphrase check.
pub struct AdminGate {
    secret: Option<String>,
}

impl AdminGate {
    /// Read the passphrase from [`ADMIN_SECRET_ENV`].
    pub fn from_env() -> Self {
        let secret = std::env::var(ADMIN_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty());
        if secret.is_none() {
            warn!(env = ADMIN_SECRET_ENV, "no organiser passphrase set, admin surface disabled");
        }
        Self { secret }
    }

    /// Gate with an explicit passphrase (tests, embedders).
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    /// A gate that rejects everything.
    pub fn disabled() -> Self {
        Self { secret: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Constant-time passphrase check.
    pub fn verify(&self, candidate: &str) -> bool {
        let Some(secret) = &self.secret else {
            return false;
        };
        let secret = secret.as_bytes();
        let candidate = candidate.as_bytes();
        if secret.len() != candidate.len() {
            return false;
        }
        secret.ct_eq(candidate).into()
    }

    /// Mint a session if the passphrase matches.
    pub fn authenticate(&self, candidate: &str) -> Option<AdminSession> {
        if self.verify(candidate) {
            info!("organiser authenticated");
            Some(AdminSession(()))
        } else {
            None
        }
    }
}

/// Broadcast an update to every guest with notifications enabled.
///
/// Fire-and-forget: the returned id is never awaited for delivery.
pub fn broadcast_update<N: Notifier>(
    _session: &AdminSession,
    notifier: &N,
    message: &str,
) -> Result<Uuid> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Validation(
            "Please enter a notification message".to_string(),
        ));
    }

    let (title, body) = templates::custom(message);
    let id = notifier.schedule_immediate(&title, &body)?;

    info!(%id, "broadcast sent to all guests");
    Ok(id)
}
