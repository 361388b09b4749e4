#![deny(clippy::string_slice)]

pub mod clock;
mod error;
mod exposure;
pub mod history;
pub mod ids;
pub mod quiz;
pub mod session;
pub mod settings;
mod storage;
mod utils;
mod word_of_the_day;
mod wordbook;

pub use error::WordlyError;
pub use history::{HistoryFilter, WordRecord};
pub use quiz::{QuizQuestion, QuizSession};
pub use session::User;
pub use settings::{Settings, Theme};
pub use wordbook::Wordbook;

use std::sync::LazyLock;

use language_utils::{Language, Lexicon};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::clock::{Clock, SystemClock};
use crate::ids::TimestampIds;

#[cfg(target_arch = "wasm32")]
type BrowserStore = cubby::local_storage::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
type BrowserStore = cubby::MemoryStore;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_available_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

/// Browser entry point: a [`Wordbook`] over `localStorage`, the seed lexicon, the local
/// calendar and timestamp ids.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct Wordly {
    book: Wordbook<BrowserStore, ChaCha8Rng>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl Wordly {
    /// `seed` fixes the word and quiz shuffles; without one the clock's current time is used.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(seed: Option<u64>) -> Result<Wordly, WordlyError> {
        // used to only initialize the logger once
        LazyLock::force(&LOGGER);

        #[cfg(target_arch = "wasm32")]
        let store = BrowserStore::new()
            .inspect_err(|e| log::error!("Error opening localStorage: {e}"))?;
        #[cfg(not(target_arch = "wasm32"))]
        let store = BrowserStore::new();

        let lexicon = Lexicon::seed().inspect_err(|e| log::error!("Error loading lexicon: {e}"))?;
        log::info!("Loaded {} lexicon entries", lexicon.len());

        let clock = SystemClock;
        let seed = seed.unwrap_or_else(|| clock.now().timestamp_millis().unsigned_abs());

        Ok(Wordly {
            book: Wordbook::new(
                store,
                lexicon,
                Box::new(clock),
                Box::new(TimestampIds::default()),
                ChaCha8Rng::seed_from_u64(seed),
            ),
        })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn word_of_the_day(&mut self, language: Language) -> Result<WordRecord, WordlyError> {
        self.book.word_of_the_day(language)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn learn_new_word(&mut self, language: Language) -> Result<WordRecord, WordlyError> {
        self.book.learn_new_word(language)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn today_word(
        &mut self,
        language: Language,
        force_new: bool,
        specific_id: Option<String>,
    ) -> Result<WordRecord, WordlyError> {
        self.book
            .today_word(language, force_new, specific_id.as_deref())
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn word_by_id(&self, id: &str) -> Option<WordRecord> {
        self.book.find_word(id)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn all_words(&self) -> Vec<WordRecord> {
        self.book.all_words()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn history(
        &self,
        language: Language,
        search: Option<String>,
        favorites_only: bool,
    ) -> Vec<WordRecord> {
        self.book.history(
            language,
            &HistoryFilter {
                search,
                favorites_only,
            },
        )
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn update_word(&mut self, record: WordRecord) -> Result<bool, WordlyError> {
        self.book.update_word(record)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn toggle_favorite(&mut self, id: &str) -> Result<WordRecord, WordlyError> {
        self.book.toggle_favorite(id)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn generate_quiz(&mut self, language: Language) -> Vec<QuizQuestion> {
        self.book.generate_quiz(language)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn start_quiz(&mut self, language: Language) -> Result<QuizSession, WordlyError> {
        self.book.start_quiz(language)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn settings(&self) -> Settings {
        self.book.settings()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_language(&mut self, language: Language) -> Result<Settings, WordlyError> {
        self.book.set_language(language)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn toggle_theme(&mut self) -> Result<Settings, WordlyError> {
        self.book.toggle_theme()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_notification_time(&mut self, time: &str) -> Result<Settings, WordlyError> {
        self.book.set_notification_time(time)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn toggle_quiz_reminders(&mut self) -> Result<Settings, WordlyError> {
        self.book.toggle_quiz_reminders()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn current_user(&self) -> User {
        self.book.current_user()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, WordlyError> {
        self.book.login(username, password)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn logout(&mut self) -> Result<(), WordlyError> {
        self.book.logout()
    }
}
