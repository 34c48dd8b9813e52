use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{
    day::{Clock, LocalClock, Signal, day_key},
    emotion::{CanonicalEmotion, MoodScore, score_emotion},
    error::Result,
    label::{label_emotion, normalize},
    store::KeyValueStore,
};

/// Raw signals stored for one calendar day, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEmotionRecord {
    pub date: NaiveDate,
    pub emotion: Option<String>,
    pub mood_score: Option<String>,
    pub scanner_label: Option<String>,
}

impl DailyEmotionRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            emotion: None,
            mood_score: None,
            scanner_label: None,
        }
    }

    /// Total: always yields one of the four canonical emotions.
    pub fn reconcile(&self) -> CanonicalEmotion {
        reconcile(
            self.emotion.as_deref(),
            self.mood_score.as_deref(),
            self.scanner_label.as_deref(),
        )
    }
}

pub fn reconcile(
    emotion: Option<&str>,
    mood_score: Option<&str>,
    scanner_label: Option<&str>,
) -> CanonicalEmotion {
    if let Some(emotion) = emotion.and_then(CanonicalEmotion::parse) {
        return emotion;
    }

    if let Some(emotion) = mood_score
        .and_then(|score| score.trim().parse::<f64>().ok())
        .and_then(score_emotion)
    {
        return emotion;
    }

    if let Some(emotion) = scanner_label.and_then(label_emotion) {
        return emotion;
    }

    CanonicalEmotion::Idle
}

/// Per-day emotion state over an injected key-value store.
///
/// "Today" is asked of the clock on every call, so a session crossing midnight
/// lands on a fresh, empty record. Records from earlier days are never touched.
pub struct EmotionStore<S, C = LocalClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> EmotionStore<S> {
    pub fn local(store: S) -> Self {
        Self::new(store, LocalClock)
    }
}

impl<S: KeyValueStore, C: Clock> EmotionStore<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn record_for(&self, date: NaiveDate) -> DailyEmotionRecord {
        DailyEmotionRecord {
            date,
            emotion: self.store.get(&day_key(Signal::Emotion, date)),
            mood_score: self.store.get(&day_key(Signal::MoodScore, date)),
            scanner_label: self.store.get(&day_key(Signal::ScannerLabel, date)),
        }
    }

    pub fn today_record(&self) -> DailyEmotionRecord {
        self.record_for(self.today())
    }

    pub fn today_emotion(&self) -> CanonicalEmotion {
        let record = self.today_record();
        let emotion = record.reconcile();

        debug!(date = %record.date, %emotion, "reconciled today's emotion");
        emotion
    }

    /// Overwrites today's emotion. No history is kept for the same day.
    pub fn save_today_emotion(&self, emotion: CanonicalEmotion) -> Result<()> {
        self.write(Signal::Emotion, emotion.as_str())
    }

    pub fn save_today_mood_score(&self, score: MoodScore) -> Result<()> {
        self.write(Signal::MoodScore, &score.to_string())
    }

    /// Stores the label normalized but otherwise unvalidated; unknown labels stay inert.
    pub fn save_today_scanner_label(&self, label: &str) -> Result<()> {
        self.write(Signal::ScannerLabel, &normalize(label))
    }

    fn write(&self, signal: Signal, value: &str) -> Result<()> {
        let key = day_key(signal, self.today());
        debug!(%key, value, "saving daily signal");

        self.store.set(&key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{day::ManualClock, store::MemoryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_on(day: NaiveDate) -> EmotionStore<MemoryStore, ManualClock> {
        EmotionStore::new(MemoryStore::new(), ManualClock::new(day))
    }

    fn score(value: i64) -> MoodScore {
        MoodScore::new(value).unwrap()
    }

    #[test]
    fn test_no_signals_is_idle() {
        let store = store_on(date(2026, 10, 19));

        assert_eq!(store.today_emotion(), CanonicalEmotion::Idle);
        assert!(store.store().is_empty());
    }

    #[test]
    fn test_score_rule() {
        assert_eq!(reconcile(None, Some("5"), None), CanonicalEmotion::Happy);
        assert_eq!(reconcile(None, Some("4"), None), CanonicalEmotion::Happy);
        assert_eq!(reconcile(None, Some("3"), None), CanonicalEmotion::Idle);
        assert_eq!(reconcile(None, Some("2"), None), CanonicalEmotion::Sad);
        assert_eq!(reconcile(None, Some("1"), None), CanonicalEmotion::Angry);
        assert_eq!(reconcile(None, Some("0"), None), CanonicalEmotion::Idle);
    }

    #[test]
    fn test_unmatched_score_falls_through_to_scanner() {
        assert_eq!(reconcile(None, Some("0"), Some("fear")), CanonicalEmotion::Sad);
        assert_eq!(reconcile(None, Some("abc"), Some("disgust")), CanonicalEmotion::Angry);
    }

    #[test]
    fn test_scanner_rule() {
        assert_eq!(reconcile(None, None, Some("surprise")), CanonicalEmotion::Happy);
        assert_eq!(reconcile(None, None, Some("fear")), CanonicalEmotion::Sad);
        assert_eq!(reconcile(None, None, Some("disgust")), CanonicalEmotion::Angry);
        assert_eq!(reconcile(None, None, Some("neutral")), CanonicalEmotion::Idle);
        assert_eq!(reconcile(None, None, Some("unknown-word")), CanonicalEmotion::Idle);
    }

    #[test]
    fn test_numeric_scores_that_are_not_integers() {
        assert_eq!(reconcile(None, Some("4.5"), Some("fear")), CanonicalEmotion::Happy);
        assert_eq!(reconcile(None, Some("5.0"), Some("fear")), CanonicalEmotion::Happy);
        assert_eq!(reconcile(None, Some("2.0"), Some("happy")), CanonicalEmotion::Sad);
        assert_eq!(reconcile(None, Some(" 1.0 "), None), CanonicalEmotion::Angry);
        assert_eq!(
            reconcile(None, Some("99999999999999999999"), Some("fear")),
            CanonicalEmotion::Happy
        );
    }

    #[test]
    fn test_non_finite_and_between_scores_fall_through() {
        assert_eq!(reconcile(None, Some("NaN"), Some("fear")), CanonicalEmotion::Sad);
        assert_eq!(reconcile(None, Some("inf"), Some("fear")), CanonicalEmotion::Sad);
        assert_eq!(reconcile(None, Some("2.5"), Some("disgust")), CanonicalEmotion::Angry);
        assert_eq!(reconcile(None, Some("0.5"), None), CanonicalEmotion::Idle);
    }

    #[test]
    fn test_invalid_stored_emotion_is_skipped() {
        assert_eq!(reconcile(Some("ecstatic"), Some("2"), None), CanonicalEmotion::Sad);
        assert_eq!(reconcile(Some("HAPPY"), None, None), CanonicalEmotion::Idle);
    }

    #[test]
    fn test_direct_emotion_wins() {
        let store = store_on(date(2026, 10, 19));

        store.save_today_mood_score(score(1)).unwrap();
        assert_eq!(store.today_emotion(), CanonicalEmotion::Angry);

        store.save_today_emotion(CanonicalEmotion::Happy).unwrap();
        assert_eq!(store.today_emotion(), CanonicalEmotion::Happy);
    }

    #[test]
    fn test_direct_emotion_wins_regardless_of_order() {
        let store = store_on(date(2026, 10, 19));

        store.save_today_emotion(CanonicalEmotion::Sad).unwrap();
        store.save_today_mood_score(score(5)).unwrap();
        store.save_today_scanner_label("happy").unwrap();

        assert_eq!(store.today_emotion(), CanonicalEmotion::Sad);

        let record = store.today_record();
        assert_eq!(record.mood_score.as_deref(), Some("5"));
        assert_eq!(record.scanner_label.as_deref(), Some("happy"));
    }

    #[test]
    fn test_score_beats_scanner() {
        let store = store_on(date(2026, 10, 19));

        store.save_today_scanner_label("Surprise").unwrap();
        store.save_today_mood_score(score(2)).unwrap();

        assert_eq!(store.today_emotion(), CanonicalEmotion::Sad);
    }

    #[test]
    fn test_save_is_idempotent() {
        let once = store_on(date(2026, 10, 19));
        once.save_today_emotion(CanonicalEmotion::Sad).unwrap();

        let twice = store_on(date(2026, 10, 19));
        twice.save_today_emotion(CanonicalEmotion::Sad).unwrap();
        twice.save_today_emotion(CanonicalEmotion::Sad).unwrap();

        assert_eq!(once.store().keys(), twice.store().keys());
        assert_eq!(once.today_record(), twice.today_record());
    }

    #[test]
    fn test_save_overwrites() {
        let store = store_on(date(2026, 10, 19));

        store.save_today_emotion(CanonicalEmotion::Angry).unwrap();
        store.save_today_emotion(CanonicalEmotion::Happy).unwrap();

        assert_eq!(store.today_record().emotion.as_deref(), Some("happy"));
        assert_eq!(store.store().len(), 1);
    }

    #[test]
    fn test_midnight_starts_empty_day() {
        let store = store_on(date(2026, 10, 19));
        store.save_today_emotion(CanonicalEmotion::Angry).unwrap();

        store.clock().advance_days(1);

        assert_eq!(store.today(), date(2026, 10, 20));
        assert_eq!(store.today_emotion(), CanonicalEmotion::Idle);
        assert_eq!(store.today_record(), DailyEmotionRecord::empty(date(2026, 10, 20)));
    }

    #[test]
    fn test_stale_days_accumulate() {
        let store = store_on(date(2026, 10, 1));

        for _ in 0..30 {
            store.save_today_emotion(CanonicalEmotion::Happy).unwrap();
            store.save_today_mood_score(score(4)).unwrap();
            store.clock().advance_days(1);
        }

        // nothing is ever cleaned up
        assert_eq!(store.store().len(), 60);
        assert_eq!(
            store.record_for(date(2026, 10, 1)).emotion.as_deref(),
            Some("happy")
        );
    }
}
