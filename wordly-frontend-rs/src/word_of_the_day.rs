use cubby::KeyValueStore;
use indexmap::IndexSet;
use language_utils::{Language, LexiconEntry};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::history::{self, WordRecord};
use crate::storage::current_word_key;
use crate::{Wordbook, WordlyError, exposure};

pub(crate) struct Draw<'a> {
    pub(crate) entry: &'a LexiconEntry,
    /// Every word had been shown already, so the draw was made from the full lexicon.
    pub(crate) exhausted: bool,
}

/// Picks uniformly among entries not in `shown`, or among all entries once none are left.
/// `None` only for an empty lexicon.
pub(crate) fn draw<'a, R: Rng + ?Sized>(
    entries: &'a [LexiconEntry],
    shown: &IndexSet<String>,
    rng: &mut R,
) -> Option<Draw<'a>> {
    let available: Vec<&LexiconEntry> = entries
        .iter()
        .filter(|entry| !shown.contains(&entry.word))
        .collect();

    if available.is_empty() {
        let entry = entries.choose(rng)?;
        return Some(Draw {
            entry,
            exhausted: true,
        });
    }

    available.choose(rng).map(|entry| Draw {
        entry: *entry,
        exhausted: false,
    })
}

impl<S: KeyValueStore, R: Rng> Wordbook<S, R> {
    /// Returns the word for `language` today.
    ///
    /// A `specific_id` found in the history is returned as is. Otherwise today's record is
    /// reused unless `force_new`, and a fresh unseen word is assigned when there is none.
    pub fn today_word(
        &mut self,
        language: Language,
        force_new: bool,
        specific_id: Option<&str>,
    ) -> Result<WordRecord, WordlyError> {
        let history = history::all(&self.store);

        if let Some(id) = specific_id {
            if let Some(record) = history.iter().find(|record| record.id == id) {
                return Ok(record.clone());
            }
            log::debug!("Word {id} is not in the history, picking today's word instead");
        }

        let today = self.clock.today();

        if !force_new
            && let Some(record) = history
                .iter()
                .find(|record| record.date == today && record.language() == language)
        {
            return Ok(record.clone());
        }

        let shown = exposure::shown(&self.store, language);
        let Some(Draw { entry, exhausted }) =
            draw(self.lexicon.entries(language), &shown, &mut self.rng)
        else {
            log::error!("Cannot pick a word: the {language} lexicon is empty");
            return Err(WordlyError::EmptyLexicon { language });
        };
        let entry = entry.clone();

        let record = WordRecord {
            id: self.fresh_id(language, &history),
            entry,
            date: today,
            is_favorite: false,
        };
        // The ledger goes first so a failed write leaves the tracker untouched
        history::upsert_for_day(&mut self.store, record.clone())?;

        if exhausted {
            log::info!("Every {language} word has been shown, starting over");
            exposure::reset(&mut self.store, language)?;
        }
        exposure::mark_shown(&mut self.store, language, &record.entry.word)?;

        log::info!(
            "Assigned {} ({}) for {today}",
            record.entry.word,
            record.id
        );

        Ok(record)
    }

    /// The word the word-of-the-day screen shows, remembered across reloads for the rest of
    /// the day through the `currentWord_<language>` pointer.
    pub fn word_of_the_day(&mut self, language: Language) -> Result<WordRecord, WordlyError> {
        let today = self.clock.today();
        let pointer = self
            .store
            .get(&current_word_key(language))
            .filter(|id| {
                history::find_by_id(&self.store, id).is_some_and(|record| record.date == today)
            });

        let record = self.today_word(language, false, pointer.as_deref())?;
        self.remember_current_word(language, &record)?;
        Ok(record)
    }

    /// Replaces today's word with a new one.
    pub fn learn_new_word(&mut self, language: Language) -> Result<WordRecord, WordlyError> {
        let record = self.today_word(language, true, None)?;
        self.remember_current_word(language, &record)?;
        Ok(record)
    }

    fn remember_current_word(
        &mut self,
        language: Language,
        record: &WordRecord,
    ) -> Result<(), WordlyError> {
        self.store
            .set(&current_word_key(language), &record.id)
            .inspect_err(|e| log::error!("Failed to remember the current word: {e}"))?;
        Ok(())
    }

    fn fresh_id(&mut self, language: Language, history: &[WordRecord]) -> String {
        loop {
            let id = self.ids.next_id(language, self.clock.now());
            if history.iter().all(|record| record.id != id) {
                return id;
            }
            log::warn!("Generated id {id} is already in the history, generating another");
        }
    }
}
