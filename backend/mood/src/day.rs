use std::sync::RwLock;

use chrono::{Days, Local, NaiveDate};

/// Source of "today". Swapped for a [`ManualClock`] to make midnight rollover deterministic.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug)]
pub struct ManualClock {
    date: RwLock<NaiveDate>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: RwLock::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        let mut current = self.date.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = date;
    }

    pub fn advance_days(&self, days: u64) {
        let next = self.today().checked_add_days(Days::new(days));

        if let Some(next) = next {
            self.set(next);
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.date.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// One key namespace per daily signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Emotion,
    MoodScore,
    ScannerLabel,
}

impl Signal {
    pub fn prefix(&self) -> &'static str {
        match self {
            Signal::Emotion => "todayEmotion",
            Signal::MoodScore => "moodScore",
            Signal::ScannerLabel => "scannedEmotion",
        }
    }
}

/// Human readable day, e.g. `Mon Oct 19 2026`.
pub fn day_stamp(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

pub fn day_key(signal: Signal, date: NaiveDate) -> String {
    format!("{}_{}", signal.prefix(), day_stamp(date))
}
