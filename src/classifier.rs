//! Keyword-based emotional-category classifier.
//!
//! Maps free-text user input to one of a fixed set of emotional
//! categories via case-insensitive substring matching. The category
//! iteration order is fixed and deterministic: the first category with
//! a matching keyword wins, so a text that mentions both anxiety and
//! sadness always resolves to anxiety. This ordering is a pinned
//! contract (see the regression tests below), not a tunable priority.
//!
//! The classifier is a pure function with no error path: any input,
//! including the empty string, resolves to a category.

use serde::{Deserialize, Serialize};

/// One fixed emotional bucket used to select a supportive reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    /// Anxiety, stress, nervousness, panic.
    Anxiety,
    /// Sadness, low mood, hopelessness.
    Sadness,
    /// Loneliness, isolation.
    Lonely,
    /// Low energy, lack of focus or motivation.
    Unmotivated,
    /// Anger, irritation, frustration.
    Anger,
    /// Concern for someone else (friend, family, partner).
    Others,
    /// Fallback when no keyword matches.
    Default,
}

impl EmotionCategory {
    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Anxiety => "anxiety",
            Self::Sadness => "sadness",
            Self::Lonely => "lonely",
            Self::Unmotivated => "unmotivated",
            Self::Anger => "anger",
            Self::Others => "others",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// (category, trigger substrings), in pinned first-match-wins order.
const KEYWORD_TABLE: &[(EmotionCategory, &[&str])] = &[
    (
        EmotionCategory::Anxiety,
        &["anxious", "stressed", "nervous", "panic"],
    ),
    (
        EmotionCategory::Sadness,
        &["sad", "down", "depressed", "hopeless"],
    ),
    (
        EmotionCategory::Lonely,
        &["lonely", "alone", "isolated"],
    ),
    (
        EmotionCategory::Unmotivated,
        &["lazy", "tired", "can't focus", "unmotivated"],
    ),
    (
        EmotionCategory::Anger,
        &["angry", "irritated", "frustrated", "mad"],
    ),
    (
        EmotionCategory::Others,
        &["my friend", "someone", "brother", "sister", "cousin", "partner"],
    ),
];

/// Classify user input into an emotional category.
///
/// Lower-cases the input, then scans the keyword table in its fixed
/// order and returns the first category with any keyword occurring as a
/// substring. Returns [`EmotionCategory::Default`] when nothing matches
/// (including for empty input).
#[must_use]
pub fn classify(text: &str) -> EmotionCategory {
    let lower = text.to_lowercase();

    for &(category, keywords) in KEYWORD_TABLE {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return category;
        }
    }

    EmotionCategory::Default
}

/// All categories that carry keywords, in classification order.
#[must_use]
pub fn keyword_categories() -> impl Iterator<Item = EmotionCategory> {
    KEYWORD_TABLE.iter().map(|&(category, _)| category)
}
