//! FeelEase: a mental-health companion chatbot core.
//!
//! The crate wires a small conversation engine around a session
//! context: user text is screened for crisis keywords, classified into
//! an emotion category by keyword match (or handed to a hosted
//! generative API), answered from a canned response table, optionally
//! translated, and optionally spoken aloud. A guided breathing session
//! runs alongside as a pure phase state machine.
//!
//! # Architecture
//!
//! - **Classifier**: keyword tables mapping text to an emotion category
//! - **Responses**: canned multi-line replies per category
//! - **Breathing**: 4-4-4 Inhale/Hold/Exhale timer with exhale cues
//! - **Session**: conversation log, user profile, memory, mood/journal
//! - **Collaborators**: translation, generative replies, quotes (HTTP)
//!   and speech in/out plus the audio cue (trait seams)
//!
//! All collaborators degrade gracefully: a failure is logged and the
//! reply falls back to English or a canned message. The only fatal
//! startup condition is a missing API credential when the generative
//! backend is configured.

pub mod audio;
pub mod breathing;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod resources;
pub mod responses;
pub mod session;
pub mod speech;
pub mod translate;

pub use breathing::{BreathPhase, BreathingTick, BreathingTimer, SessionState};
pub use classifier::{EmotionCategory, classify};
pub use config::CompanionConfig;
pub use engine::{Companion, Reply, ReplySource};
pub use error::{CompanionError, Result};
pub use session::Session;
pub use translate::Language;
