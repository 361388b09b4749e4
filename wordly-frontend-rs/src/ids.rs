use chrono::{DateTime, Utc};
use language_utils::Language;

/// Produces ids for newly assigned words. Implementations must not repeat an id.
///
/// `now` comes from the `Wordbook`'s clock.
pub trait IdGenerator {
    fn next_id(&mut self, language: Language, now: DateTime<Utc>) -> String;
}

/// `<language>-<unix millis>`, bumped by a millisecond whenever the clock has not moved past
/// the previous id.
#[derive(Clone, Debug, Default)]
pub struct TimestampIds {
    last_millis: i64,
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, language: Language, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_millis + 1);
        self.last_millis = millis;
        format!("{}-{millis}", language.tag())
    }
}

/// `<language>-<n>` counting up from 1.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, language: Language, _now: DateTime<Utc>) -> String {
        self.issued += 1;
        format!("{}-{}", language.tag(), self.issued)
    }
}
