//! # fete-shared
//!
//! Types, constants, and helpers shared by every Fete crate.
//!
//! Fete is the guest-facing core of a single-event ("wedding weekend") app:
//! guests browse a schedule, share photos, leave guestbook messages, and
//! request songs; the organiser manages the schedule and broadcasts updates.
//! This crate holds the pieces the store, cloud, and app layers all agree on:
//! entity identifiers, the persisted-state key layout, and the date/time
//! display formatting used throughout.

pub mod constants;
pub mod time;
pub mod types;
