//! Exposure Tracker: which lexicon words of a language have already been assigned.
//!
//! Stored under `shownWords_<language>` as a JSON array, in the order the words were shown.

use cubby::KeyValueStore;
use indexmap::IndexSet;
use language_utils::Language;

use crate::WordlyError;
use crate::storage::{self, shown_words_key};

pub fn shown<S: KeyValueStore>(store: &S, language: Language) -> IndexSet<String> {
    storage::load_or_default(store, &shown_words_key(language))
}

/// Writes only when the word is new to the set.
pub fn mark_shown<S: KeyValueStore>(
    store: &mut S,
    language: Language,
    word: &str,
) -> Result<(), WordlyError> {
    let mut words = shown(store, language);
    if words.insert(word.to_string()) {
        storage::save(store, &shown_words_key(language), &words)?;
    }
    Ok(())
}

pub fn reset<S: KeyValueStore>(store: &mut S, language: Language) -> Result<(), WordlyError> {
    store.remove(&shown_words_key(language))?;
    Ok(())
}
