//! History Ledger: one assigned word per (language, day), stored under `wordHistory`.
//!
//! Every mutation reads the whole list, changes it, and writes the whole list back. Two tabs
//! writing at once can lose an update; the last write wins.

use chrono::NaiveDate;
use cubby::KeyValueStore;
use language_utils::{Language, LexiconEntry};
use serde::{Deserialize, Serialize};

use crate::WordlyError;
use crate::storage::{self, WORD_HISTORY_KEY};

/// A lexicon entry as it was assigned on a given day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify))]
#[cfg_attr(target_arch = "wasm32", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub id: String,
    #[serde(flatten)]
    pub entry: LexiconEntry,
    /// The day the word was assigned, `YYYY-MM-DD`.
    #[cfg_attr(target_arch = "wasm32", tsify(type = "string"))]
    pub date: NaiveDate,
    #[serde(default)]
    pub is_favorite: bool,
}

impl WordRecord {
    pub fn language(&self) -> Language {
        self.entry.language
    }
}

/// Records are decoded one at a time; one that does not parse is logged and skipped, and is
/// gone after the next write.
pub fn all<S: KeyValueStore>(store: &S) -> Vec<WordRecord> {
    let stored: Vec<serde_json::Value> = storage::load_or_default(store, WORD_HISTORY_KEY);
    stored
        .into_iter()
        .filter_map(|value| {
            serde_json::from_value(value)
                .inspect_err(|source| {
                    log::warn!(
                        "Skipping a record in `{WORD_HISTORY_KEY}` that could not be parsed: {source}"
                    )
                })
                .ok()
        })
        .collect()
}

pub fn find_by_id<S: KeyValueStore>(store: &S, id: &str) -> Option<WordRecord> {
    all(store).into_iter().find(|record| record.id == id)
}

/// Replaces the record with the same date and language in place, or appends.
pub fn upsert_for_day<S: KeyValueStore>(
    store: &mut S,
    record: WordRecord,
) -> Result<(), WordlyError> {
    let mut history = all(store);
    match history
        .iter_mut()
        .find(|existing| existing.date == record.date && existing.language() == record.language())
    {
        Some(existing) => *existing = record,
        None => history.push(record),
    }
    storage::save(store, WORD_HISTORY_KEY, &history)
}

/// Replaces the record with the same id in place. Returns whether one was found; an unknown
/// id changes nothing and is not an error.
pub fn update_by_id<S: KeyValueStore>(
    store: &mut S,
    record: WordRecord,
) -> Result<bool, WordlyError> {
    let mut history = all(store);
    let Some(existing) = history.iter_mut().find(|existing| existing.id == record.id) else {
        log::debug!("update_by_id: no record with id {}", record.id);
        return Ok(false);
    };
    *existing = record;
    storage::save(store, WORD_HISTORY_KEY, &history)?;
    Ok(true)
}

pub fn toggle_favorite<S: KeyValueStore>(store: &mut S, id: &str) -> Result<WordRecord, WordlyError> {
    let mut history = all(store);
    let record = history
        .iter_mut()
        .find(|record| record.id == id)
        .ok_or_else(|| WordlyError::NotFound { id: id.to_string() })?;
    record.is_favorite = !record.is_favorite;
    let updated = record.clone();
    storage::save(store, WORD_HISTORY_KEY, &history)?;
    Ok(updated)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Case-insensitive match against the word and its definition. Surrounding whitespace is
    /// ignored, and a blank term matches everything.
    pub search: Option<String>,
    pub favorites_only: bool,
}

impl HistoryFilter {
    fn matches(&self, record: &WordRecord) -> bool {
        if self.favorites_only && !record.is_favorite {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                record.entry.word.to_lowercase().contains(&term)
                    || record.entry.definition.to_lowercase().contains(&term)
            }
        }
    }
}

/// One language's records, most recent day first.
pub fn for_language(
    history: Vec<WordRecord>,
    language: Language,
    filter: &HistoryFilter,
) -> Vec<WordRecord> {
    let mut records: Vec<WordRecord> = history
        .into_iter()
        .filter(|record| record.language() == language && filter.matches(record))
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cubby::MemoryStore;

    pub(crate) fn record(id: &str, language: Language, word: &str, date: &str) -> WordRecord {
        WordRecord {
            id: id.to_string(),
            entry: LexiconEntry {
                word: word.to_string(),
                language,
                pronunciation: format!("/{word}/"),
                definition: format!("definition of {word}"),
                example: format!("An example with {word}."),
                translation: None,
                conversation_example: None,
            },
            date: date.parse().unwrap(),
            is_favorite: false,
        }
    }

    #[test]
    fn test_empty_history() {
        let store = MemoryStore::new();
        assert!(all(&store).is_empty());
    }

    #[test]
    fn test_upsert_round_trips_exactly() {
        let mut store = MemoryStore::new();
        let mut written = record("french-1", Language::French, "Flâner", "2024-05-01");
        written.entry.translation = Some("To stroll".to_string());
        written.entry.conversation_example = Some(language_utils::ConversationExample {
            phrase: "On va flâner ?".to_string(),
            response: "Avec plaisir.".to_string(),
            phrase_translation: Some("Shall we stroll?".to_string()),
            response_translation: None,
        });

        upsert_for_day(&mut store, written.clone()).unwrap();
        assert_eq!(all(&store), vec![written]);
    }

    #[test]
    fn test_stored_layout_uses_camel_case_field_names() {
        let mut store = MemoryStore::new();
        upsert_for_day(
            &mut store,
            record("german-1", Language::German, "Zeitgeist", "2024-05-01"),
        )
        .unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&store.get("wordHistory").unwrap()).unwrap();
        let stored = &raw[0];
        assert_eq!(stored["id"], "german-1");
        assert_eq!(stored["word"], "Zeitgeist");
        assert_eq!(stored["language"], "german");
        assert_eq!(stored["date"], "2024-05-01");
        assert_eq!(stored["isFavorite"], false);
        assert!(stored.get("entry").is_none());
        assert!(stored.get("translation").is_none());
    }

    #[test]
    fn test_missing_favorite_flag_defaults_to_false() {
        let mut store = MemoryStore::new();
        store
            .set(
                "wordHistory",
                r#"[{"id":"english-1","word":"Ephemeral","language":"english","pronunciation":"","definition":"Brief","example":"","date":"2024-01-02"}]"#,
            )
            .unwrap();
        let history = all(&store);
        assert_eq!(history.len(), 1);
        assert!(!history[0].is_favorite);
    }

    #[test]
    fn test_unparseable_record_does_not_hide_the_rest() {
        let mut store = MemoryStore::new();
        store
            .set(
                "wordHistory",
                r#"[
                    {"id":"spanish-1","word":"Sobremesa","language":"spanish","pronunciation":"","definition":"Table talk","example":"","date":"2024-01-01"},
                    {"id":"english-1","word":"Ephemeral","language":"english","pronunciation":"","definition":"Brief","example":"","date":"2024-01-02","isFavorite":true}
                ]"#,
            )
            .unwrap();

        let history = all(&store);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "english-1");
        assert!(history[0].is_favorite);

        upsert_for_day(&mut store, record("french-1", Language::French, "Flâner", "2024-01-03"))
            .unwrap();
        let ids: Vec<String> = all(&store).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["english-1", "french-1"]);
    }

    #[test]
    fn test_history_that_is_not_a_list_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set("wordHistory", r#"{"id":"english-1"}"#).unwrap();
        assert!(all(&store).is_empty());
    }

    #[test]
    fn test_upsert_replaces_same_day_and_language_in_place() {
        let mut store = MemoryStore::new();
        upsert_for_day(&mut store, record("french-1", Language::French, "A", "2024-05-01")).unwrap();
        upsert_for_day(&mut store, record("german-1", Language::German, "B", "2024-05-01")).unwrap();
        upsert_for_day(&mut store, record("french-2", Language::French, "C", "2024-05-02")).unwrap();
        upsert_for_day(&mut store, record("french-3", Language::French, "D", "2024-05-01")).unwrap();

        let ids: Vec<String> = all(&store).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["french-3", "german-1", "french-2"]);
    }

    #[test]
    fn test_update_by_id() {
        let mut store = MemoryStore::new();
        upsert_for_day(&mut store, record("italian-1", Language::Italian, "Magari", "2024-05-01"))
            .unwrap();

        let mut changed = record("italian-1", Language::Italian, "Magari", "2024-05-01");
        changed.is_favorite = true;
        assert!(update_by_id(&mut store, changed.clone()).unwrap());
        assert_eq!(all(&store), vec![changed]);
    }

    #[test]
    fn test_update_by_unknown_id_is_a_silent_no_op() {
        let mut store = MemoryStore::new();
        upsert_for_day(&mut store, record("italian-1", Language::Italian, "Magari", "2024-05-01"))
            .unwrap();
        let before = store.clone();

        let stranger = record("italian-99", Language::Italian, "Abbiocco", "2024-05-02");
        assert!(!update_by_id(&mut store, stranger).unwrap());
        assert_eq!(store, before);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let mut store = MemoryStore::new();
        upsert_for_day(&mut store, record("english-1", Language::English, "Ubiquitous", "2024-05-01"))
            .unwrap();

        let once = toggle_favorite(&mut store, "english-1").unwrap();
        assert!(once.is_favorite);
        assert!(find_by_id(&store, "english-1").unwrap().is_favorite);

        let twice = toggle_favorite(&mut store, "english-1").unwrap();
        assert!(!twice.is_favorite);
        assert!(!find_by_id(&store, "english-1").unwrap().is_favorite);
    }

    #[test]
    fn test_toggle_favorite_missing_id() {
        let mut store = MemoryStore::new();
        let error = toggle_favorite(&mut store, "missing-id").unwrap_err();
        assert!(matches!(error, WordlyError::NotFound { ref id } if id == "missing-id"));
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let history = vec![
            record("german-1", Language::German, "Fernweh", "2024-05-01"),
            record("german-2", Language::German, "Gemütlichkeit", "2024-05-02"),
        ];
        let filter = HistoryFilter {
            search: Some("   ".to_string()),
            favorites_only: false,
        };
        assert_eq!(for_language(history, Language::German, &filter).len(), 2);
    }

    #[test]
    fn test_for_language_sorts_and_filters() {
        let mut favorite = record("french-2", Language::French, "Retrouvailles", "2024-05-03");
        favorite.is_favorite = true;
        let history = vec![
            record("french-1", Language::French, "Flâner", "2024-05-01"),
            favorite,
            record("german-1", Language::German, "Fernweh", "2024-05-04"),
            record("french-3", Language::French, "Dépaysement", "2024-05-02"),
        ];

        let everything = for_language(history.clone(), Language::French, &HistoryFilter::default());
        let ids: Vec<&str> = everything.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["french-2", "french-3", "french-1"]);

        let searched = for_language(
            history.clone(),
            Language::French,
            &HistoryFilter {
                search: Some("  FLÂ ".to_string()),
                favorites_only: false,
            },
        );
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].id, "french-1");

        let by_definition = for_language(
            history.clone(),
            Language::French,
            &HistoryFilter {
                search: Some("definition of d".to_string()),
                favorites_only: false,
            },
        );
        assert_eq!(by_definition[0].id, "french-3");

        let favorites = for_language(
            history,
            Language::French,
            &HistoryFilter {
                search: None,
                favorites_only: true,
            },
        );
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "french-2");
    }
}
