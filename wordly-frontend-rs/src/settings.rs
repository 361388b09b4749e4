use chrono::NaiveTime;
use cubby::KeyValueStore;
use language_utils::Language;
use rand::Rng;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::storage::{self, SETTINGS_KEY};
use crate::{Wordbook, WordlyError};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify))]
#[cfg_attr(target_arch = "wasm32", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Stored under `wordlySettings`. Each field is read on its own: one that is missing or
/// unusable takes its default without disturbing the others.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify))]
#[cfg_attr(target_arch = "wasm32", tsify(into_wasm_abi, from_wasm_abi))]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub language: Language,
    pub theme: Theme,
    /// 24-hour `HH:MM`.
    pub notification_time: String,
    pub quiz_reminders_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            theme: Theme::Light,
            notification_time: "09:00".to_string(),
            quiz_reminders_enabled: true,
        }
    }
}

impl Settings {
    fn from_stored(stored: &Map<String, Value>) -> Self {
        fn field<T: DeserializeOwned>(stored: &Map<String, Value>, name: &str) -> Option<T> {
            let value = stored.get(name)?;
            serde_json::from_value(value.clone())
                .inspect_err(|e| log::warn!("Ignoring stored setting `{name}`: {e}"))
                .ok()
        }

        let defaults = Settings::default();
        Settings {
            language: field(stored, "language").unwrap_or(defaults.language),
            theme: field(stored, "theme").unwrap_or(defaults.theme),
            notification_time: field::<String>(stored, "notificationTime")
                .filter(|time| {
                    parse_notification_time(time)
                        .inspect_err(|e| log::warn!("Ignoring stored setting: {e}"))
                        .is_ok()
                })
                .unwrap_or(defaults.notification_time),
            quiz_reminders_enabled: field(stored, "quizRemindersEnabled")
                .unwrap_or(defaults.quiz_reminders_enabled),
        }
    }
}

fn parse_notification_time(time: &str) -> Result<NaiveTime, WordlyError> {
    // chrono accepts a single-digit hour for %H; the stored form is always two digits
    if time.len() != 5 {
        return Err(WordlyError::InvalidNotificationTime(time.to_string()));
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| WordlyError::InvalidNotificationTime(time.to_string()))
}

impl<S: KeyValueStore, R: Rng> Wordbook<S, R> {
    pub fn settings(&self) -> Settings {
        let stored: Map<String, Value> = storage::load_or_default(&self.store, SETTINGS_KEY);
        Settings::from_stored(&stored)
    }

    fn update_settings(
        &mut self,
        change: impl FnOnce(&mut Settings),
    ) -> Result<Settings, WordlyError> {
        let mut settings = self.settings();
        change(&mut settings);
        storage::save(&mut self.store, SETTINGS_KEY, &settings)?;
        Ok(settings)
    }

    pub fn set_language(&mut self, language: Language) -> Result<Settings, WordlyError> {
        self.update_settings(|settings| settings.language = language)
    }

    pub fn toggle_theme(&mut self) -> Result<Settings, WordlyError> {
        self.update_settings(|settings| settings.theme = settings.theme.toggled())
    }

    pub fn set_notification_time(&mut self, time: &str) -> Result<Settings, WordlyError> {
        let time = parse_notification_time(time)?.format("%H:%M").to_string();
        self.update_settings(|settings| settings.notification_time = time)
    }

    pub fn toggle_quiz_reminders(&mut self) -> Result<Settings, WordlyError> {
        self.update_settings(|settings| {
            settings.quiz_reminders_enabled = !settings.quiz_reminders_enabled
        })
    }
}
