//! The operation layer invoked by the UI.
//!
//! One module per screen-ish concern.  Every mutation validates first
//! (blocking, before any I/O), then rewrites the affected collection
//! through its persistence boundary.

pub mod admin;
pub mod guestbook;
pub mod photos;
pub mod playlist;
pub mod profile;
pub mod schedule;
