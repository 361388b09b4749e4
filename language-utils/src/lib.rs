pub mod lexicon;

pub use lexicon::{ConversationExample, Lexicon, LexiconEntry, LexiconError};

use enumap::EnuMap;

/// A language the app has seed vocabulary for.
///
/// Serialized lowercase (`"french"`), which is also the tag used in persisted keys such as
/// `shownWords_french` and in generated word ids.
#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    tsify::Tsify,
    EnuMap,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Japanese,
    Portuguese,
    French,
    German,
    Italian,
}

impl Language {
    pub fn iso_639_3(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Japanese => "jpn",
            Language::Portuguese => "por",
            Language::French => "fra",
            Language::German => "deu",
            Language::Italian => "ita",
        }
    }

    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Portuguese => "pt",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
        }
    }

    /// Same string serde produces.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Japanese => "japanese",
            Language::Portuguese => "portuguese",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Japanese => write!(f, "Japanese"),
            Language::Portuguese => write!(f, "Portuguese"),
            Language::French => write!(f, "French"),
            Language::German => write!(f, "German"),
            Language::Italian => write!(f, "Italian"),
        }
    }
}
