//! # fete-cloud
//!
//! Cloud integrations for the Fete application:
//!
//! - **Blob store client** ([`BlobStore`]): put / get / list-under-prefix /
//!   resolve-to-fetchable-URL over either a local directory
//!   ([`FsBlobStore`]) or the Fete object server ([`HttpBlobStore`]).
//! - **Photo synchronization** ([`PhotoSync`]): bridges a local capture to
//!   the shared, append-only cloud photo collection.
//! - **Song search** ([`MusicSearch`]): the iTunes Search API client behind
//!   the playlist screen, with a fixed fallback list when the catalog is
//!   unreachable.

pub mod blob_store;
pub mod music;
pub mod photos;

mod error;

pub use blob_store::{BlobStore, FsBlobStore, HttpBlobStore, ObjectHandle};
pub use error::CloudError;
pub use music::{MusicSearch, SongSuggestion};
pub use photos::{CloudPhoto, PhotoSync};
