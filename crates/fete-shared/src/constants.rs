/// Application name
pub const APP_NAME: &str = "Fete";

/// Key-Value Store key for the schedule collection
pub const EVENTS_KEY: &str = "wedding_events";

/// Key-Value Store key for locally captured photos
pub const PHOTOS_KEY: &str = "wedding_photos";

/// Key-Value Store key for guestbook / chat messages
pub const MESSAGES_KEY: &str = "wedding_messages";

/// Key-Value Store key for the song request playlist
pub const PLAYLIST_KEY: &str = "wedding_playlist";

/// Key-Value Store key for the side table of known chat senders
pub const CHAT_USERS_KEY: &str = "wedding_chat_users";

/// Key-Value Store key for the device-singleton guest profile
pub const PROFILE_KEY: &str = "guest_profile";

/// Blob store prefix under which all shared photos live
pub const CLOUD_PHOTO_PREFIX: &str = "wedding-photos/";

/// Placeholder contributor when object-name metadata cannot be recovered
pub const UNKNOWN_CONTRIBUTOR: &str = "Unknown Guest";

/// Placeholder timestamp when object-name metadata cannot be recovered
pub const UNKNOWN_TIMESTAMP: &str = "Unknown time";

/// Compact ISO-8601 basic timestamp used in object names.
/// Deliberately hyphen-free so the `-` separated name convention stays
/// parseable (`20241024T183000123Z-Jane-Doe.jpg`).
pub const OBJECT_NAME_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%3fZ";

/// Maximum photo upload size in bytes (25 MiB)
pub const MAX_PHOTO_SIZE: usize = 25 * 1024 * 1024;

/// Default HTTP port for the object server
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Environment variable holding the organiser passphrase
pub const ADMIN_SECRET_ENV: &str = "FETE_ADMIN_SECRET";
