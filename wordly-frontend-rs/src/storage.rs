//! Key layout in browser storage, and the read/write helpers every component goes through.

use cubby::KeyValueStore;
use language_utils::Language;
use serde::{Serialize, de::DeserializeOwned};

use crate::WordlyError;

pub(crate) const WORD_HISTORY_KEY: &str = "wordHistory";
pub(crate) const SETTINGS_KEY: &str = "wordlySettings";
pub(crate) const USER_KEY: &str = "wordlyUser";

pub(crate) fn shown_words_key(language: Language) -> String {
    format!("shownWords_{}", language.tag())
}

/// Holds a raw word id, not JSON.
pub(crate) fn current_word_key(language: Language) -> String {
    format!("currentWord_{}", language.tag())
}

/// Absent and unparseable values both come back as `T::default()`.
pub(crate) fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore,
{
    match store.get_json::<T>(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(source) => {
            let error = WordlyError::MalformedStoredState {
                key: key.to_string(),
                source,
            };
            log::warn!("{error}; treating it as empty");
            T::default()
        }
    }
}

pub(crate) fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), WordlyError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore,
{
    store
        .set_json(key, value)
        .inspect_err(|e| log::error!("Failed to persist `{key}`: {e}"))?;
    Ok(())
}
