//! Speech synthesis and recognition collaborator seams.
//!
//! The core never talks to a speech engine directly; it goes through
//! these traits so the host can plug in a platform engine and tests can
//! plug in recordings. Synthesis is spoken on a detached task with no
//! result observed by the core — a failed utterance is logged, never
//! raised. Recognition listens for a fixed window and distinguishes
//! "nothing understood" (a normal outcome) from transport faults
//! (errors).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Which synthesized voice to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceChoice {
    #[default]
    Female,
    Male,
}

/// User-tunable synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub choice: VoiceChoice,
    /// Speaking rate in words per minute.
    pub rate: u16,
    /// Pitch as a percentage of the voice default.
    pub pitch: u16,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            choice: VoiceChoice::Female,
            rate: 130,
            pitch: 100,
        }
    }
}

/// Default speech-recognition listening window.
pub const DEFAULT_LISTEN_WINDOW: Duration = Duration::from_secs(5);

/// Speech synthesis collaborator.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Speak `text` with the given voice settings.
    ///
    /// Called from a detached task; the engine never awaits the outcome
    /// of an utterance directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine fails. The engine
    /// logs and swallows it.
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<()>;

    /// Halt any playback currently in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine fails to stop.
    async fn stop(&self) -> Result<()>;
}

/// Result of one recognition window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Speech was recognized as text.
    Recognized(String),
    /// The window elapsed without intelligible speech.
    Unrecognized,
}

/// Speech recognition collaborator.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Listen on the microphone for up to `window` and transcribe.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport faults (e.g. the recognition
    /// service is unreachable); an empty or unintelligible window is
    /// the [`ListenOutcome::Unrecognized`] outcome, not an error.
    async fn listen(&self, window: Duration) -> Result<ListenOutcome>;
}

/// Synthesizer that logs instead of speaking.
///
/// Used by the CLI when no platform engine is wired up, and as a
/// harmless default anywhere speech output is optional.
#[derive(Debug, Default, Clone)]
pub struct NullSynthesizer;

#[async_trait]
impl Synthesizer for NullSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceSettings) -> Result<()> {
        info!(
            voice = ?voice.choice,
            rate = voice.rate,
            "(voice output unavailable) would speak: {text}"
        );
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// Recognizer that never hears anything.
#[derive(Debug, Default, Clone)]
pub struct NullRecognizer;

#[async_trait]
impl Recognizer for NullRecognizer {
    async fn listen(&self, _window: Duration) -> Result<ListenOutcome> {
        Ok(ListenOutcome::Unrecognized)
    }
}
