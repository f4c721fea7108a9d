//! Whole-collection persistence primitives.
//!
//! Every mutation in the app follows one pattern: compute a new version of
//! an in-memory collection, serialize the whole thing, write it under its
//! fixed key, then swap it in.  [`StoredCollection`] makes that pattern the
//! only way to mutate a collection, so each one is an independently owned,
//! exclusively-mutated value with an explicit serialize/deserialize
//! boundary.  There is no partial update and no concurrency check: the last
//! writer's full snapshot wins, which is acceptable at this data scale.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::kv::KeyValueStore;

/// A named collection persisted wholesale as one JSON array blob.
#[derive(Debug)]
pub struct StoredCollection<T> {
    key: &'static str,
    items: Vec<T>,
}

impl<T> StoredCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Hydrate the collection stored under `key`.
    ///
    /// An absent key or unreadable blob degrades to an empty collection with
    /// a warning; startup never fails because one collection is corrupt.
    pub fn load<S: KeyValueStore>(store: &S, key: &'static str) -> Self {
        let items = match store.get(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(e) => {
                    warn!(key, error = %e, "corrupt collection blob, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to load collection, starting empty");
                Vec::new()
            }
        };

        Self { key, items }
    }

    /// The key this collection is persisted under.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the collection with `f(current)`.
    ///
    /// The new version is written to the store first and only swapped into
    /// memory once the write succeeds, so in-memory state never runs ahead
    /// of what a restart would reload.
    pub fn mutate<S, F>(&mut self, store: &S, f: F) -> Result<()>
    where
        S: KeyValueStore,
        F: FnOnce(&[T]) -> Vec<T>,
    {
        let next = f(&self.items);
        let json = serde_json::to_string(&next)?;
        store.set(self.key, &json)?;
        self.items = next;
        Ok(())
    }
}

/// A singleton value persisted as one JSON blob (the guest profile).
#[derive(Debug)]
pub struct StoredValue<T> {
    key: &'static str,
    value: Option<T>,
}

impl<T> StoredValue<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Hydrate the value stored under `key`, degrading to absent on error.
    pub fn load<S: KeyValueStore>(store: &S, key: &'static str) -> Self {
        let value = match store.get(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key, error = %e, "corrupt value blob, starting empty");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "failed to load value, starting empty");
                None
            }
        };

        Self { key, value }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Overwrite the stored value.
    pub fn set<S: KeyValueStore>(&mut self, store: &S, value: T) -> Result<()> {
        let json = serde_json::to_string(&value)?;
        store.set(self.key, &json)?;
        self.value = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u32,
        label: String,
    }

    fn entry(id: u32, label: &str) -> Entry {
        Entry {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn load_absent_key_is_empty() {
        let store = MemoryStore::new();
        let coll: StoredCollection<Entry> = StoredCollection::load(&store, "missing");
        assert!(coll.is_empty());
    }

    #[test]
    fn load_corrupt_blob_is_empty() {
        let store = MemoryStore::new();
        store.set("bad", "not json at all").unwrap();
        let coll: StoredCollection<Entry> = StoredCollection::load(&store, "bad");
        assert!(coll.is_empty());
    }

    #[test]
    fn mutate_appends_and_persists() {
        let store = MemoryStore::new();
        let mut coll: StoredCollection<Entry> = StoredCollection::load(&store, "entries");

        coll.mutate(&store, |items| {
            let mut next = items.to_vec();
            next.push(entry(1, "first"));
            next
        })
        .unwrap();

        assert_eq!(coll.len(), 1);

        // A fresh load sees the same snapshot.
        let reloaded: StoredCollection<Entry> = StoredCollection::load(&store, "entries");
        assert_eq!(reloaded.items(), coll.items());
    }

    #[test]
    fn mutate_replaces_whole_snapshot() {
        let store = MemoryStore::new();
        let mut coll: StoredCollection<Entry> = StoredCollection::load(&store, "entries");

        coll.mutate(&store, |_| vec![entry(1, "a"), entry(2, "b")])
            .unwrap();
        coll.mutate(&store, |items| {
            items.iter().filter(|e| e.id != 1).cloned().collect()
        })
        .unwrap();

        assert_eq!(coll.items(), &[entry(2, "b")]);
        let json = store.get("entries").unwrap().unwrap();
        assert!(!json.contains("\"a\""));
    }

    #[test]
    fn value_overwrite() {
        let store = MemoryStore::new();
        let mut value: StoredValue<Entry> = StoredValue::load(&store, "profile");
        assert!(value.get().is_none());

        value.set(&store, entry(1, "Jane")).unwrap();
        value.set(&store, entry(1, "Jane Doe")).unwrap();

        let reloaded: StoredValue<Entry> = StoredValue::load(&store, "profile");
        assert_eq!(reloaded.get().unwrap().label, "Jane Doe");
    }
}
