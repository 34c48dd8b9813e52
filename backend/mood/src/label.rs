//! Boundary validation for text coming back from the classifier.
use std::sync::LazyLock;

use regex::Regex;

use crate::emotion::{CanonicalEmotion, RawLabel};

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s-]").expect("noise pattern is valid"));

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("spaces pattern is valid"));

/// Trim, lower-case, drop quotes and punctuation, collapse inner whitespace.
pub fn normalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let cleaned = NOISE.replace_all(&lowered, "");

    SPACES.replace_all(cleaned.trim(), " ").into_owned()
}

/// Result of checking a provider answer against the closed label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Recognized(RawLabel),
    Unrecognized(String),
}

impl Classification {
    pub fn from_response(text: &str) -> Self {
        let normalized = normalize(text);

        match RawLabel::parse(&normalized) {
            Some(label) => Self::Recognized(label),
            None => Self::Unrecognized(text.trim().to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }

    /// Unrecognized answers fall back to `neutral` so no free text leaves the boundary.
    pub fn label(&self) -> RawLabel {
        match self {
            Self::Recognized(label) => *label,
            Self::Unrecognized(_) => RawLabel::Neutral,
        }
    }

    pub fn canonical(&self) -> CanonicalEmotion {
        self.label().canonical()
    }
}

/// Scanner rule of the reconciliation. Stored labels are normalized before lookup.
pub fn label_emotion(label: &str) -> Option<CanonicalEmotion> {
    RawLabel::parse(&normalize(label)).map(|label| label.canonical())
}
