//! Error types for the companion core.

/// Top-level error type for the companion system.
#[derive(Debug, thiserror::Error)]
pub enum CompanionError {
    /// Configuration error (missing credential, invalid config file,
    /// empty response table entry).
    #[error("config error: {0}")]
    Config(String),

    /// Breathing-session state machine error.
    #[error("breathing error: {0}")]
    Breathing(String),

    /// Translation collaborator error.
    #[error("translation error: {0}")]
    Translate(String),

    /// Generative-reply collaborator error.
    #[error("generative reply error: {0}")]
    Llm(String),

    /// Speech recognition collaborator error (transport faults only;
    /// "nothing understood" is a normal outcome, not an error).
    #[error("speech recognition error: {0}")]
    Stt(String),

    /// Speech synthesis collaborator error.
    #[error("speech synthesis error: {0}")]
    Tts(String),

    /// Audio cue playback error (advisory only, never fatal).
    #[error("audio cue error: {0}")]
    Audio(String),

    /// Session state error (invalid profile input, export failure).
    #[error("session error: {0}")]
    Session(String),

    /// Wellness resource fetch error.
    #[error("resource error: {0}")]
    Resource(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CompanionError>;
