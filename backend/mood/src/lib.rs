//! # Mood
//!
//! Shared emotion vocabulary and the per-day reconciliation store.
//!
//!
//!
//! ## Vocabulary
//! - Raw labels (**happy, sad, angry, neutral, fear, disgust, surprise**): what the
//!   classifier is asked to answer with. Anything else it says is untrusted text.
//! - Canonical emotions (**happy, sad, angry, idle**): the only values widgets such as
//!   the avatar or the counsellor dashboard consume.
//! - Mood score (**1-5**): entered by the student on the mood logging page.
//!
//!
//!
//! ## Daily Store
//! - One record per local calendar day, three independent keys per day
//! - `todayEmotion_<date>`, `moodScore_<date>`, `scannedEmotion_<date>`
//! - `<date>` is the human readable day, e.g. `Mon Oct 19 2026`
//! - No expiry, old days stay under their original key forever
//!
//! ## Reconciliation
//! First match wins.
//! 1. Stored canonical emotion (if it is still one of the four)
//! 2. Mood score: >= 4 happy, 3 idle, 2 sad, 1 angry
//! 3. Scanner label: happy/surprise, sad/fear, angry/disgust, neutral
//! 4. `idle`
pub mod day;
pub mod emotion;
pub mod error;
pub mod label;
pub mod reconcile;
pub mod store;

pub use day::{Clock, LocalClock, ManualClock, Signal};
pub use emotion::{CanonicalEmotion, MoodScore, RawLabel};
pub use error::{Error, Result};
pub use label::Classification;
pub use reconcile::{DailyEmotionRecord, EmotionStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
