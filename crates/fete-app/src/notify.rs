//! The notification scheduling seam.
//!
//! Delivery is a platform capability; the app only ever asks for an
//! immediate notification and forgets about it.  No delivery confirmation
//! is consumed anywhere.

use tracing::info;
use uuid::Uuid;

use crate::error::Result;

/// Fire-and-forget notification scheduling.
pub trait Notifier {
    /// Schedule an immediate notification, returning its platform id.
    fn schedule_immediate(&self, title: &str, body: &str) -> Result<Uuid>;
}

/// Notifier that only logs; used in tests and headless deployments.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn schedule_immediate(&self, title: &str, body: &str) -> Result<Uuid> {
        let id = Uuid::new_v4();
        info!(%id, title, body, "notification scheduled");
        Ok(id)
    }
}

/// Canned `(title, body)` templates for the moments of the day.
pub mod templates {
    pub fn ceremony_starting() -> (&'static str, &'static str) {
        (
            "Ceremony Starting Soon!",
            "The ceremony begins in 15 minutes. Please take your seats!",
        )
    }

    pub fn cocktail_hour() -> (&'static str, &'static str) {
        (
            "Cocktail Hour Begins",
            "Join us on the terrace for cocktails and appetizers!",
        )
    }

    pub fn dinner_ready() -> (&'static str, &'static str) {
        (
            "Dinner is Served",
            "Please make your way to the reception hall for dinner.",
        )
    }

    pub fn first_dance() -> (&'static str, &'static str) {
        ("First Dance Time", "The first dance is about to begin!")
    }

    pub fn photo_reminder() -> (&'static str, &'static str) {
        (
            "Share Your Photos",
            "Don't forget to add your favorite moments to the photo collection!",
        )
    }

    pub fn guestbook_reminder() -> (&'static str, &'static str) {
        (
            "Leave a Message",
            "Share your wishes and memories in the digital guestbook!",
        )
    }

    /// Organiser broadcast wrapper.
    pub fn custom(message: &str) -> (String, String) {
        ("Wedding Update".to_string(), message.to_string())
    }
}
