use cubby::KeyValueStore;
use language_utils::{Language, Lexicon};
use rand::Rng;

use crate::clock::Clock;
use crate::history::{self, HistoryFilter, WordRecord};
use crate::ids::IdGenerator;
use crate::WordlyError;

/// The app's state and the capabilities it runs on: a key-value store, a lexicon, a calendar,
/// an id source and a random source.
///
/// Nothing is cached between calls. Each operation reads what it needs from the store and
/// writes back before returning.
pub struct Wordbook<S, R> {
    pub(crate) store: S,
    pub(crate) lexicon: Lexicon,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) ids: Box<dyn IdGenerator>,
    pub(crate) rng: R,
}

impl<S: KeyValueStore, R: Rng> Wordbook<S, R> {
    pub fn new(
        store: S,
        lexicon: Lexicon,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
        rng: R,
    ) -> Self {
        Self {
            store,
            lexicon,
            clock,
            ids,
            rng,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Every record, in storage order.
    pub fn all_words(&self) -> Vec<WordRecord> {
        history::all(&self.store)
    }

    pub fn find_word(&self, id: &str) -> Option<WordRecord> {
        history::find_by_id(&self.store, id)
    }

    pub fn history(&self, language: Language, filter: &HistoryFilter) -> Vec<WordRecord> {
        history::for_language(history::all(&self.store), language, filter)
    }

    /// Replaces a record by id. `Ok(false)` when no record has that id.
    pub fn update_word(&mut self, record: WordRecord) -> Result<bool, WordlyError> {
        history::update_by_id(&mut self.store, record)
    }

    /// Persisted immediately; views holding an older copy of the record need refreshing.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<WordRecord, WordlyError> {
        let record = history::toggle_favorite(&mut self.store, id)?;
        log::debug!(
            "{} is {} a favorite",
            record.entry.word,
            if record.is_favorite { "now" } else { "no longer" }
        );
        Ok(record)
    }
}
