use language_utils::{Language, LexiconError};
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum WordlyError {
    #[error("no word with id `{id}` in the history")]
    NotFound { id: String },
    #[error("no vocabulary is configured for {language}")]
    EmptyLexicon { language: Language },
    /// Never returned from an operation: the value is read as absent and this is logged.
    #[error("stored value under `{key}` could not be parsed: {source}")]
    MalformedStoredState {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] cubby::StoreError),
    #[error("failed to load vocabulary: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("`{0}` is not a 24-hour HH:MM time")]
    InvalidNotificationTime(String),
    #[error("a quiz needs at least {needed} {language} words in the history, found {found}")]
    QuizUnavailable {
        language: Language,
        needed: usize,
        found: usize,
    },
}

impl From<WordlyError> for JsValue {
    fn from(error: WordlyError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
