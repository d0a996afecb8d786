//! Session context: all mutable state tied to one user's interaction
//! lifetime.
//!
//! The session is a single-owner value threaded explicitly through the
//! engine's handlers — never ambient global state. Handlers run one at
//! a time between refresh cycles, so no locking is involved. Nothing
//! here outlives the process; the plain-text transcript export is the
//! only way anything leaves memory.

use crate::breathing::BreathingTimer;
use crate::classifier::EmotionCategory;
use crate::error::{CompanionError, Result};
use crate::speech::VoiceSettings;
use crate::translate::Language;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person talking to the companion.
    User,
    /// The companion's reply.
    Assistant,
}

/// One entry in the append-only conversation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Faith selection used to offer comforting verses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faith {
    #[default]
    NotSpecified,
    Hinduism,
    Christianity,
    Jainism,
    Buddhism,
    Atheist,
    /// Explicitly no faith (distinct from "prefer not to say").
    NoFaith,
}

impl Faith {
    /// Whether faith-based comfort should be offered to this user.
    #[must_use]
    pub fn seeks_faith_comfort(self) -> bool {
        !matches!(self, Self::NotSpecified | Self::Atheist | Self::NoFaith)
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotSpecified => "Not specified",
            Self::Hinduism => "Hinduism",
            Self::Christianity => "Christianity",
            Self::Jainism => "Jainism",
            Self::Buddhism => "Buddhism",
            Self::Atheist => "Atheist",
            Self::NoFaith => "None",
        }
    }
}

/// Minimal user profile collected before the chat opens.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub faith: Faith,
}

/// Youngest supported user age.
pub const MIN_AGE: u8 = 5;
/// Oldest accepted age.
pub const MAX_AGE: u8 = 120;

/// Parse and range-check a user-supplied age string.
///
/// # Errors
///
/// Returns [`CompanionError::Session`] with a user-presentable message
/// for non-numeric input or an out-of-range value. Callers surface the
/// message as a warning and leave the profile unchanged.
pub fn validate_age(raw: &str) -> Result<u8> {
    let age: u16 = raw
        .trim()
        .parse()
        .map_err(|_| CompanionError::Session("Please enter a valid number for age.".to_owned()))?;
    if age < u16::from(MIN_AGE) {
        return Err(CompanionError::Session(format!(
            "Age must be at least {MIN_AGE} years."
        )));
    }
    if age > u16::from(MAX_AGE) {
        return Err(CompanionError::Session(format!(
            "Please enter a valid age (under {MAX_AGE})."
        )));
    }
    Ok(age as u8)
}

/// A single mood rating on the 1–5 scale.
#[derive(Debug, Clone)]
pub struct MoodRating {
    /// 1 (very sad) to 5 (very happy).
    pub rating: u8,
    /// Emoji shown for this rating.
    pub emoji: &'static str,
    pub recorded_at: DateTime<Local>,
}

/// (emoji, rating, label) options offered after a conversation.
pub const MOOD_SCALE: &[(&str, u8, &str)] = &[
    ("😢", 1, "Very Sad"),
    ("😞", 2, "Sad"),
    ("😐", 3, "Neutral"),
    ("😊", 4, "Happy"),
    ("😁", 5, "Very Happy"),
];

/// A timestamped journal entry, optionally written against a prompt.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub prompt: Option<String>,
    pub text: String,
    pub recorded_at: DateTime<Local>,
}

/// Goal bucket for grouping wellness goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    #[default]
    Wellness,
    Social,
    Productivity,
    Mindfulness,
    PersonalGrowth,
}

impl GoalCategory {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Wellness => "Wellness",
            Self::Social => "Social",
            Self::Productivity => "Productivity",
            Self::Mindfulness => "Mindfulness",
            Self::PersonalGrowth => "Personal Growth",
        }
    }
}

/// A wellness goal with completion tracking.
#[derive(Debug, Clone)]
pub struct Goal {
    pub text: String,
    pub category: GoalCategory,
    pub created_at: DateTime<Local>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Local>>,
}

/// One remembered fact about the user.
#[derive(Debug, Clone)]
pub struct MemoryItem {
    pub value: String,
    pub recorded_at: DateTime<Local>,
}

/// Consecutive-day visit streak.
#[derive(Debug, Clone)]
pub struct DailyStreak {
    last_seen: NaiveDate,
    count: u32,
}

impl DailyStreak {
    /// Start a streak on the first visit day.
    #[must_use]
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            last_seen: today,
            count: 1,
        }
    }

    /// Record a visit on `today`.
    ///
    /// A visit the day after the last one extends the streak; a gap
    /// resets it to 1; repeat visits on the same day change nothing.
    pub fn record_visit(&mut self, today: NaiveDate) {
        if today == self.last_seen {
            return;
        }
        if Some(self.last_seen) == today.pred_opt() {
            self.count += 1;
        } else {
            self.count = 1;
        }
        self.last_seen = today;
    }

    /// Current streak length in days.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// In-memory state for one user's interaction lifetime.
#[derive(Debug)]
pub struct Session {
    pub profile: UserProfile,
    pub language: Language,
    pub voice: VoiceSettings,
    pub breathing: BreathingTimer,
    /// Lines of the most recent reply (post-translation), for replay
    /// through the speech synthesizer.
    pub last_reply: Vec<String>,
    /// Category behind the most recent scripted reply, if any.
    pub last_category: Option<EmotionCategory>,
    turns: Vec<ConversationTurn>,
    moods: Vec<MoodRating>,
    journal: Vec<JournalEntry>,
    goals: Vec<Goal>,
    memory: BTreeMap<String, MemoryItem>,
    streak: DailyStreak,
}

impl Session {
    /// Create a fresh session starting its streak today.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    /// Create a session with an explicit first-visit date (testable).
    #[must_use]
    pub fn starting_on(today: NaiveDate) -> Self {
        Self {
            profile: UserProfile::default(),
            language: Language::English,
            voice: VoiceSettings::default(),
            breathing: BreathingTimer::new(),
            last_reply: Vec::new(),
            last_category: None,
            turns: Vec::new(),
            moods: Vec::new(),
            journal: Vec::new(),
            goals: Vec::new(),
            memory: BTreeMap::new(),
            streak: DailyStreak::starting(today),
        }
    }

    // ── Conversation log ────────────────────────────────────────────

    /// Append a turn to the conversation log.
    pub fn push_turn(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role,
            content: content.into(),
        });
    }

    /// The append-only conversation log, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Render the conversation as a plain-text transcript for download.
    #[must_use]
    pub fn export_transcript(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            let who = match turn.role {
                Role::User => "User",
                Role::Assistant => "Bot",
            };
            out.push_str(&format!("**{who}:** {}\n\n", turn.content));
        }
        out
    }

    // ── User memory ─────────────────────────────────────────────────

    /// Remember a fact about the user, overwriting any previous value.
    pub fn remember(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.memory.insert(
            key.into(),
            MemoryItem {
                value: value.into(),
                recorded_at: Local::now(),
            },
        );
    }

    /// Look up a remembered value.
    #[must_use]
    pub fn recall(&self, key: &str) -> Option<&str> {
        self.memory.get(key).map(|item| item.value.as_str())
    }

    /// Render remembered facts as context lines for the generative
    /// collaborator. Empty string when nothing is remembered.
    #[must_use]
    pub fn memory_context(&self) -> String {
        if self.memory.is_empty() {
            return String::new();
        }
        let mut out = String::from("Here's what I remember about the user:\n");
        for (key, item) in &self.memory {
            out.push_str(&format!(
                "- {key}: {} (mentioned on {})\n",
                item.value,
                item.recorded_at.format("%Y-%m-%d")
            ));
        }
        out
    }

    // ── Wellness records ────────────────────────────────────────────

    /// Record a 1–5 mood rating.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Session`] for a rating outside the
    /// mood scale.
    pub fn add_mood(&mut self, rating: u8) -> Result<()> {
        let (emoji, rating, _) = MOOD_SCALE
            .iter()
            .find(|&&(_, r, _)| r == rating)
            .copied()
            .ok_or_else(|| {
                CompanionError::Session(format!("mood rating {rating} is outside the 1-5 scale"))
            })?;
        self.moods.push(MoodRating {
            rating,
            emoji,
            recorded_at: Local::now(),
        });
        Ok(())
    }

    /// Recorded mood ratings, oldest first.
    #[must_use]
    pub fn moods(&self) -> &[MoodRating] {
        &self.moods
    }

    /// Save a journal entry.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Session`] for an empty entry; nothing
    /// is recorded in that case.
    pub fn add_journal_entry(&mut self, text: &str, prompt: Option<&str>) -> Result<()> {
        if text.trim().is_empty() {
            return Err(CompanionError::Session(
                "Please write something before saving.".to_owned(),
            ));
        }
        self.journal.push(JournalEntry {
            prompt: prompt.filter(|p| !p.trim().is_empty()).map(str::to_owned),
            text: text.trim().to_owned(),
            recorded_at: Local::now(),
        });
        Ok(())
    }

    /// Saved journal entries, oldest first.
    #[must_use]
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Add a wellness goal.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Session`] for an empty goal.
    pub fn add_goal(&mut self, text: &str, category: GoalCategory) -> Result<()> {
        if text.trim().is_empty() {
            return Err(CompanionError::Session("Please enter a goal.".to_owned()));
        }
        self.goals.push(Goal {
            text: text.trim().to_owned(),
            category,
            created_at: Local::now(),
            completed: false,
            completed_at: None,
        });
        Ok(())
    }

    /// Mark the goal at `index` complete.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Session`] for an out-of-range index.
    pub fn complete_goal(&mut self, index: usize) -> Result<()> {
        let goal = self.goals.get_mut(index).ok_or_else(|| {
            CompanionError::Session(format!("no goal at index {index}"))
        })?;
        if !goal.completed {
            goal.completed = true;
            goal.completed_at = Some(Local::now());
        }
        Ok(())
    }

    /// Current goals, oldest first.
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    // ── Streak ──────────────────────────────────────────────────────

    /// Record a visit today (or on an injected date in tests).
    pub fn record_visit(&mut self, today: NaiveDate) {
        self.streak.record_visit(today);
    }

    /// Current daily streak length.
    #[must_use]
    pub fn streak_days(&self) -> u32 {
        self.streak.count()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
