//! Machine-translation collaborator.
//!
//! Replies are written in English and optionally translated into the
//! user's chosen language before display and speech. The target set is
//! a small fixed list mapped to ISO codes; English is an identity
//! mapping that never touches the network. The client speaks the
//! LibreTranslate-style JSON API (`POST /translate` with `q`, `source`,
//! `target`) with a short imposed timeout — callers convert a failure
//! into an untranslated fallback rather than propagating it.

use crate::config::TranslationConfig;
use crate::error::{CompanionError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Supported reply languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Bengali,
}

impl Language {
    /// ISO 639-1 code used on the wire.
    #[must_use]
    pub fn iso_code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Bengali => "bn",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Bengali => "Bengali",
        }
    }

    /// All supported languages, in menu order.
    #[must_use]
    pub fn all() -> &'static [Language] {
        &[Self::English, Self::Hindi, Self::Bengali]
    }
}

impl std::str::FromStr for Language {
    type Err = CompanionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "hindi" | "hi" => Ok(Self::Hindi),
            "bengali" | "bn" => Ok(Self::Bengali),
            other => Err(CompanionError::Translate(format!(
                "unsupported language: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// HTTP client for the translation service.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranslationClient {
    /// Create a client from config.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CompanionError::Config(format!("failed to build translation client: {e}"))
            })?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Translate one text into the target language.
    ///
    /// The source language is auto-detected by the service. English
    /// targets return the input unchanged without a request.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Translate`] on transport failure, a
    /// non-success status, or an unexpected response shape.
    pub async fn translate(&self, text: &str, target: Language) -> Result<String> {
        if target == Language::English || text.trim().is_empty() {
            return Ok(text.to_owned());
        }

        let url = format!("{}/translate", self.base_url);
        let body = serde_json::json!({
            "q": text,
            "source": "auto",
            "target": target.iso_code(),
            "format": "text",
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompanionError::Translate(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CompanionError::Translate(format!(
                "service returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompanionError::Translate(format!("invalid response body: {e}")))?;

        let translated = payload["translatedText"].as_str().ok_or_else(|| {
            CompanionError::Translate("response missing translatedText".to_owned())
        })?;

        debug!(target = target.iso_code(), "translated {} chars", text.len());
        Ok(translated.to_owned())
    }

    /// Translate each line of a reply, preserving order.
    ///
    /// # Errors
    ///
    /// Fails on the first line that cannot be translated.
    pub async fn translate_lines(&self, lines: &[String], target: Language) -> Result<Vec<String>> {
        if target == Language::English {
            return Ok(lines.to_vec());
        }
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            out.push(self.translate(line, target).await?);
        }
        Ok(out)
    }
}
