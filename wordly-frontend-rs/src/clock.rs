use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};

/// Source of time: "today" for day-based word assignment and "now" for ids and seeding.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}

/// The caller's local calendar date.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time that only changes when told to. Clones share the same time, so a test can hold one
/// handle and move the day forward under a `Wordbook` that owns the other.
///
/// `today` is the UTC date of `now`.
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

fn noon(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN + chrono::TimeDelta::hours(12))
        .and_utc()
}

impl FixedClock {
    /// Starts at noon UTC on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::at(noon(today))
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.now.set(noon(today));
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance_days(&self, days: u64) {
        let now = self.now.get();
        self.now.set(now + chrono::Days::new(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
