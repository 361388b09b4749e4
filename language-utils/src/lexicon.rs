//! The Lexicon Store: the fixed catalog of vocabulary each language can draw from.

use serde::{Deserialize, Serialize};

use crate::{Language, LanguageMap};

const SEED_LEXICON: &str = include_str!("../data/lexicon.json");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ConversationExample {
    pub phrase: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase_translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_translation: Option<String>,
}

/// One vocabulary item. Identified by `word` within its language.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    pub word: String,
    pub language: Language,
    pub pronunciation: String,
    pub definition: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_example: Option<ConversationExample>,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("lexicon data is not a valid list of entries: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    entries: LanguageMap<Vec<LexiconEntry>>,
}

impl Lexicon {
    /// The vocabulary bundled with the app.
    pub fn seed() -> Result<Self, LexiconError> {
        Self::from_json(SEED_LEXICON)
    }

    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let entries: Vec<LexiconEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Buckets entries by their own `language`. A repeated word within a language keeps the
    /// first occurrence.
    pub fn from_entries(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut map: LanguageMap<Vec<LexiconEntry>> = LanguageMap::default();
        for entry in entries {
            let bucket = map.get_mut(&entry.language);
            if bucket.iter().any(|existing| existing.word == entry.word) {
                log::warn!(
                    "Duplicate lexicon word {:?} for {}, keeping the first one",
                    entry.word,
                    entry.language
                );
                continue;
            }
            bucket.push(entry);
        }
        Self { entries: map }
    }

    pub fn entries(&self, language: Language) -> &[LexiconEntry] {
        self.entries.get(&language)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
