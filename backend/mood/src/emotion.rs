use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// UI facing emotion. Everything downstream of the store speaks only this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalEmotion {
    Happy,
    Sad,
    Angry,
    Idle,
}

impl CanonicalEmotion {
    pub const ALL: [Self; 4] = [Self::Happy, Self::Sad, Self::Angry, Self::Idle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Idle => "idle",
        }
    }

    /// Exact match against the stored spelling. Used to re-validate values read back
    /// from durable storage, which anything else on the device may have written.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|emotion| emotion.as_str() == value)
    }
}

impl fmt::Display for CanonicalEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalEmotion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.trim().to_lowercase()).ok_or_else(|| Error::UnknownEmotion(s.to_string()))
    }
}

/// The closed set the classifier is instructed to answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawLabel {
    Happy,
    Sad,
    Angry,
    Neutral,
    Fear,
    Disgust,
    Surprise,
}

impl RawLabel {
    pub const ALL: [Self; 7] = [
        Self::Happy,
        Self::Sad,
        Self::Angry,
        Self::Neutral,
        Self::Fear,
        Self::Disgust,
        Self::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Neutral => "neutral",
            Self::Fear => "fear",
            Self::Disgust => "disgust",
            Self::Surprise => "surprise",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == value)
    }

    pub fn canonical(&self) -> CanonicalEmotion {
        match self {
            Self::Happy | Self::Surprise => CanonicalEmotion::Happy,
            Self::Sad | Self::Fear => CanonicalEmotion::Sad,
            Self::Angry | Self::Disgust => CanonicalEmotion::Angry,
            Self::Neutral => CanonicalEmotion::Idle,
        }
    }
}

impl fmt::Display for RawLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wellbeing rating, 1 (very low) to 5 (great).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(score: i64) -> Result<Self, Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&score) {
            Ok(Self(score as u8))
        } else {
            Err(Error::InvalidScore(score))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn canonical(&self) -> CanonicalEmotion {
        // every in-range score has a mapping
        score_emotion(self.0 as f64).unwrap_or(CanonicalEmotion::Idle)
    }
}

impl TryFrom<i64> for MoodScore {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodScore> for i64 {
    fn from(score: MoodScore) -> Self {
        score.0 as i64
    }
}

impl fmt::Display for MoodScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Score rule of the reconciliation. Non-finite values, values below 1 and
/// fractions between the whole scores match nothing.
pub fn score_emotion(score: f64) -> Option<CanonicalEmotion> {
    if !score.is_finite() {
        return None;
    }

    if score >= 4.0 {
        Some(CanonicalEmotion::Happy)
    } else if score == 3.0 {
        Some(CanonicalEmotion::Idle)
    } else if score == 2.0 {
        Some(CanonicalEmotion::Sad)
    } else if score == 1.0 {
        Some(CanonicalEmotion::Angry)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_mapping() {
        assert_eq!(score_emotion(5.0), Some(CanonicalEmotion::Happy));
        assert_eq!(score_emotion(4.0), Some(CanonicalEmotion::Happy));
        assert_eq!(score_emotion(3.0), Some(CanonicalEmotion::Idle));
        assert_eq!(score_emotion(2.0), Some(CanonicalEmotion::Sad));
        assert_eq!(score_emotion(1.0), Some(CanonicalEmotion::Angry));
    }

    #[test]
    fn test_score_out_of_range() {
        assert_eq!(score_emotion(0.0), None);
        assert_eq!(score_emotion(-3.0), None);
        assert_eq!(score_emotion(9.0), Some(CanonicalEmotion::Happy));
        assert_eq!(score_emotion(4.5), Some(CanonicalEmotion::Happy));
        assert_eq!(score_emotion(2.5), None);
        assert_eq!(score_emotion(f64::NAN), None);
        assert_eq!(score_emotion(f64::INFINITY), None);
    }

    #[test]
    fn test_mood_score_bounds() {
        assert!(MoodScore::new(0).is_err());
        assert!(MoodScore::new(6).is_err());
        assert_eq!(MoodScore::new(5).unwrap().value(), 5);
        assert_eq!(MoodScore::new(2).unwrap().canonical(), CanonicalEmotion::Sad);
    }

    #[test]
    fn test_raw_label_table() {
        assert_eq!(RawLabel::Surprise.canonical(), CanonicalEmotion::Happy);
        assert_eq!(RawLabel::Fear.canonical(), CanonicalEmotion::Sad);
        assert_eq!(RawLabel::Disgust.canonical(), CanonicalEmotion::Angry);
        assert_eq!(RawLabel::Neutral.canonical(), CanonicalEmotion::Idle);
    }

    #[test]
    fn test_canonical_parse_is_exact() {
        assert_eq!(CanonicalEmotion::parse("sad"), Some(CanonicalEmotion::Sad));
        assert_eq!(CanonicalEmotion::parse("Sad"), None);
        assert_eq!(CanonicalEmotion::parse("neutral"), None);
    }

    #[test]
    fn test_canonical_from_str_is_lenient() {
        assert_eq!(" Angry ".parse::<CanonicalEmotion>().unwrap(), CanonicalEmotion::Angry);
        assert!("calm".parse::<CanonicalEmotion>().is_err());
    }

    #[test]
    fn test_serde_spelling() {
        assert_eq!(serde_json::to_string(&CanonicalEmotion::Idle).unwrap(), "\"idle\"");
        assert_eq!(serde_json::to_string(&RawLabel::Surprise).unwrap(), "\"surprise\"");
        assert!(serde_json::from_str::<MoodScore>("7").is_err());
    }
}
