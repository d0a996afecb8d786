//! Wellness resources: helplines, journal prompts, community messages,
//! soundscape and video links, and the motivational-quote collaborator.

use crate::config::QuoteConfig;
use crate::error::{CompanionError, Result};
use std::time::Duration;

/// National mental-health helplines (name, contact).
pub const HELPLINES: &[(&str, &str)] = &[
    ("Vandrevala Foundation", "+91 99996 66666"),
    ("Aasra", "+91 98204 66726"),
];

/// Counselling websites (name, URL).
pub const WEBSITES: &[(&str, &str)] = &[
    ("YourDOST", "www.yourdost.com"),
    ("TISS iCALL", "www.icallhelpline.org"),
];

/// Prompts offered when starting a journal entry.
pub const JOURNAL_PROMPTS: &[&str] = &[
    "What are you grateful for today?",
    "What challenged you today?",
    "What made you smile today?",
    "What did you learn about yourself today?",
    "What would you like to let go of?",
];

/// Encouraging messages shown in the community panel.
pub const COMMUNITY_MESSAGES: &[&str] = &[
    "You're stronger than you think. Keep going!",
    "It's okay to not be okay. Tomorrow is a new day.",
    "Small steps still move you forward. Celebrate them!",
    "Your feelings are valid. You matter.",
];

/// Meditation and soundscape suggestions (name, search query).
pub const SOUNDSCAPES: &[(&str, &str)] = &[
    ("Rain Sounds", "rain sounds relaxation"),
    ("Ocean Waves", "ocean waves relaxation"),
    ("Forest Ambience", "forest sounds relaxation"),
    ("Guided Meditation", "guided meditation for anxiety"),
    ("Calming Music", "calming music for stress relief"),
];

/// Shown when the quote service is unreachable.
pub const QUOTE_FALLBACK: &str = "Your connection seems disturbed.";

/// Build a video search link for a free-text query.
#[must_use]
pub fn video_search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

/// HTTP client for the motivational-quote service.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuoteClient {
    /// Create a client from config.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &QuoteConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompanionError::Config(format!("failed to build quote client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch one random quote as `"text — author"`.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Resource`] on transport failure or an
    /// unexpected response shape; callers substitute
    /// [`QUOTE_FALLBACK`].
    pub async fn fetch_random(&self) -> Result<String> {
        let url = format!("{}/api/random", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CompanionError::Resource(format!("quote request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CompanionError::Resource(format!(
                "quote service returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompanionError::Resource(format!("invalid quote body: {e}")))?;

        let quote = payload[0]["q"].as_str();
        let author = payload[0]["a"].as_str();
        match (quote, author) {
            (Some(q), Some(a)) => Ok(format!("{q} — {a}")),
            _ => Err(CompanionError::Resource(
                "quote response missing fields".to_owned(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn video_search_url_encodes_query() {
        let url = video_search_url("stress relief & calm");
        assert_eq!(
            url,
            "https://www.youtube.com/results?search_query=stress%20relief%20%26%20calm"
        );
    }

    #[test]
    fn resource_tables_are_populated() {
        assert!(!HELPLINES.is_empty());
        assert!(!WEBSITES.is_empty());
        assert_eq!(JOURNAL_PROMPTS.len(), 5);
        assert_eq!(SOUNDSCAPES.len(), 5);
        assert!(!COMMUNITY_MESSAGES.is_empty());
    }
}
