use crate::{KeyValueStore, StoreError};

/// `window.localStorage`. Every call goes straight to the browser; nothing is cached.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|e| {
                log::error!("localStorage access was refused: {e:?}");
                StoreError::Unavailable
            })?
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage
            .get_item(key)
            .inspect_err(|e| log::error!("Failed to read `{key}` from localStorage: {e:?}"))
            .ok()
            .flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Throws QuotaExceededError when the origin is out of space.
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Remove {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn keys(&self) -> Vec<String> {
        let len = self.storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| self.storage.key(i).ok().flatten())
            .collect()
    }
}
