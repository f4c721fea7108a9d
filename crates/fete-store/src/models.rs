//! Domain model structs persisted as JSON blobs in the local store.
//!
//! Every struct derives `Serialize` and `Deserialize` so whole collections
//! can be written and reloaded verbatim.  Timestamps are stored as the
//! display strings the UI renders; schedule times are organiser-entered free
//! text (`"2:00 PM"`), never structured times.

use serde::{Deserialize, Serialize};

use fete_shared::types::{ChatUserId, EventId, MessageId, PhotoId, SongId};

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// One entry in the event schedule.
///
/// At most one entry should carry `current: true`; the mark-current
/// operation enforces that by rewriting the whole collection.  Deleting the
/// current entry legitimately leaves zero current entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeddingEvent {
    /// Unique entry identifier.
    pub id: EventId,
    /// Free-text time-of-day label, e.g. `"2:00 PM"`.
    pub time: String,
    /// Entry title, e.g. `"Ceremony"`.
    pub title: String,
    /// Where the entry takes place.
    pub location: String,
    /// Whether this entry is presently happening.
    pub current: bool,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// A guest-submitted photo record.
///
/// Append-only: records are never mutated and no delete operation exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Unique photo identifier.
    pub id: PhotoId,
    /// Image reference as captured (local path or remote URL).
    pub uri: String,
    /// Free-text display name of the submitting guest.
    pub contributor_name: String,
    /// Human-readable submission stamp, e.g. `"10/24/2024, 6:30:00 PM"`.
    pub timestamp: String,
    /// Copy of the image inside the app's own photo directory, if the copy
    /// succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Guestbook / chat
// ---------------------------------------------------------------------------

/// Whether a message is visible to everyone or to one recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum MessageKind {
    /// Visible in the shared guestbook.
    Group,
    /// Visible only in the thread between sender and recipient.
    #[serde(rename_all = "camelCase")]
    Private {
        recipient_id: Option<ChatUserId>,
        recipient_name: String,
    },
}

/// A single guestbook / chat message.  Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Free-text display name of the sender.
    pub sender_name: String,
    /// Message body.
    pub body: String,
    /// Display time label, e.g. `"6:30 PM"`.
    pub time_label: String,
    /// Group or private-thread discriminator.
    pub kind: MessageKind,
}

/// A distinct message sender, recorded the first time a name posts.
///
/// Deduplicated by exact name equality at write time; names are free text
/// and never case-normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatUser {
    /// Unique participant identifier.
    pub id: ChatUserId,
    /// Display name, exactly as first entered.
    pub name: String,
    /// Human-readable last-seen stamp.
    pub last_seen: String,
}

// ---------------------------------------------------------------------------
// Playlist
// ---------------------------------------------------------------------------

/// A guest song request.  Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique request identifier.
    pub id: SongId,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Free-text display name of the requesting guest.
    pub contributor_name: String,
    /// Human-readable request stamp.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The device-singleton guest profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Guest display name (required).
    pub guest_name: String,
    /// Free-text travel plans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel: Option<String>,
    /// Free-text dietary preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
    /// Free-text allergies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}
