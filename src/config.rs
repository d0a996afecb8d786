//! Configuration types for the companion core.

use crate::error::{CompanionError, Result};
use crate::speech::VoiceSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompanionConfig {
    /// Reply-path selection and seeding.
    pub responder: ResponderConfig,
    /// Generative-reply collaborator settings.
    pub generative: GenerativeConfig,
    /// Translation collaborator settings.
    pub translation: TranslationConfig,
    /// Motivational-quote collaborator settings.
    pub quotes: QuoteConfig,
    /// Breathing session settings.
    pub breathing: BreathingConfig,
    /// Speech recognition settings.
    pub listening: ListenConfig,
    /// Default voice for speech synthesis.
    pub voice: VoiceSettings,
}

/// Which path produces the supportive reply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderBackend {
    /// Keyword classification into canned replies (offline, default).
    #[default]
    Scripted,
    /// Hosted generative API with the supportive system instruction.
    Generative,
}

/// Reply-path configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Which backend produces replies.
    pub backend: ResponderBackend,
    /// Fixed seed for canned-reply selection. `None` draws from
    /// entropy; set in tests to pin selections.
    pub seed: Option<u64>,
}

/// Generative-reply collaborator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeConfig {
    /// Base URL of the hosted generative API.
    pub api_url: String,
    /// Model identifier appended to the generate endpoint.
    pub api_model: String,
    /// Environment variable holding the API credential.
    ///
    /// The credential itself never lives in the config file. A missing
    /// or empty variable is a fatal configuration error at startup.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum retained history turns after the system instruction
    /// (0 = unlimited).
    pub max_history_turns: usize,
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_owned(),
            api_model: "gemini-2.5-flash-preview-05-20".to_owned(),
            api_key_env: "GOOGLE_API_KEY".to_owned(),
            timeout_secs: 20,
            max_history_turns: 40,
        }
    }
}

impl GenerativeConfig {
    /// Resolve the API credential from the configured environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] when the variable is unset or
    /// empty so the process can refuse to start.
    pub fn resolve_api_key(&self) -> Result<String> {
        let value = std::env::var(&self.api_key_env).map_err(|_| {
            CompanionError::Config(format!(
                "API key not found: set the {} environment variable",
                self.api_key_env
            ))
        })?;
        if value.trim().is_empty() {
            return Err(CompanionError::Config(format!(
                "API key environment variable is empty: {}",
                self.api_key_env
            )));
        }
        Ok(value)
    }
}

/// Translation collaborator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Base URL of the machine-translation service.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://libretranslate.com".to_owned(),
            timeout_secs: 5,
        }
    }
}

/// Motivational-quote collaborator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Base URL of the quote service.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            api_url: "https://zenquotes.io".to_owned(),
            timeout_secs: 3,
        }
    }
}

/// Breathing session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    /// Total session length in seconds.
    pub duration_secs: u64,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self { duration_secs: 300 }
    }
}

/// Speech recognition configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Fixed microphone listening window in seconds.
    pub window_secs: u64,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self { window_secs: 5 }
    }
}

impl CompanionConfig {
    /// Default config file path (`~/.feelease/config.toml`).
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".feelease")
            .join("config.toml")
    }

    /// Load configuration from a toml file.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] if the file cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CompanionError::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| CompanionError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Load from the default path, or fall back to defaults when no
    /// file exists.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] only for a present-but-broken
    /// file; absence is not an error.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the configuration to a toml file, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] on serialization failure, or
    /// an I/O error from writing.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self)
            .map_err(|e| CompanionError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
