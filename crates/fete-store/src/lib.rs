//! # fete-store
//!
//! Local persistent storage for the Fete application, backed by SQLite.
//!
//! Application state survives restarts as JSON blobs in a single key-value
//! table: each logical collection (schedule, photos, messages, playlist,
//! chat users) lives wholesale under one fixed key, and the guest profile is
//! a singleton value.  The crate exposes a synchronous [`Database`] handle
//! wrapping a `rusqlite::Connection`, the [`KeyValueStore`] abstraction over
//! it, and the [`StoredCollection`] / [`StoredValue`] primitives that give
//! every collection an explicit serialize/deserialize boundary.

pub mod collections;
pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;

mod error;

pub use collections::{StoredCollection, StoredValue};
pub use database::Database;
pub use error::StoreError;
pub use kv::{KeyValueStore, MemoryStore};
pub use models::*;
