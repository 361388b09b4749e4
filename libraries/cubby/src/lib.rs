//! Small key-value persistence layer for browser-local apps.
//! It was created for Wordly, so it only covers what a single-tab, single-user app needs.
//!
//! Model:
//! 1. The store is a flat table of string keys to string values, like `window.localStorage`.
//! 2. Each key is read and written as a whole. There are no transactions, versions or locks:
//!    callers do read-modify-write and the last writer wins.
//! 3. Values are usually JSON. [`KeyValueStore::get_json`] keeps "absent" and "present but
//!    unparseable" apart so callers can decide how to recover.
//!
//! [`MemoryStore`] is the in-memory twin used by tests and tooling. With the `local-storage`
//! feature on `wasm32`, [`local_storage::LocalStorage`] talks to the real browser storage.

#[cfg(target_arch = "wasm32")]
#[cfg(feature = "local-storage")]
pub mod local_storage;

mod memory;

pub use memory::MemoryStore;

use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no storage is available in this environment")]
    Unavailable,
    #[error("failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to remove key `{key}`: {reason}")]
    Remove { key: String, reason: String },
    #[error("failed to serialize value for key `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence capability: string keys to string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a key that is not present is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Vec<String>;

    /// `Ok(None)` when the key is absent, `Err` when it is present but not valid JSON for `T`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error>
    where
        Self: Sized,
    {
        match self.get(key) {
            Some(raw) => serde_json::from_str(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}
