//! Generative-reply collaborator.
//!
//! HTTP client for a hosted `generateContent`-style API. The client
//! keeps the structured conversation history (role/content turns, with
//! the supportive system instruction as the hidden first turn), builds
//! each request from it, and imposes the configured timeout. Transport
//! and response-shape failures are returned as errors; the engine
//! converts them into user-facing fallback messages instead of
//! propagating them — a collaborator failure must never crash the
//! session.

use crate::config::GenerativeConfig;
use crate::error::{CompanionError, Result};
use crate::prompt::SYSTEM_PROMPT;
use std::time::{Duration, Instant};
use tracing::info;

/// Fallback shown when the generative service cannot be reached.
pub const FALLBACK_NETWORK: &str = "Sorry, I'm having trouble connecting right now. \
     Please check your internet connection and try again.";

/// Fallback shown when the service replies with an unexpected shape.
pub const FALLBACK_INVALID: &str = "Sorry, I received an invalid response from the server.";

/// Map a generative-client error to its user-facing fallback line.
///
/// Response-shape failures (the service answered, but not usably) get
/// [`FALLBACK_INVALID`]; everything else reads as a connectivity
/// problem and gets [`FALLBACK_NETWORK`].
#[must_use]
pub fn fallback_for(err: &CompanionError) -> &'static str {
    match err {
        CompanionError::Llm(msg)
            if msg.starts_with("invalid response") || msg.starts_with("response missing") =>
        {
            FALLBACK_INVALID
        }
        _ => FALLBACK_NETWORK,
    }
}

/// A single turn in the structured conversation history.
#[derive(Debug, Clone)]
struct HistoryTurn {
    /// `"user"` or `"model"` on the wire.
    role: &'static str,
    content: String,
}

/// Client for the hosted generative API.
#[derive(Debug)]
pub struct GenerativeClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    max_history_turns: usize,
    /// History after the system instruction (which always stays first).
    history: Vec<HistoryTurn>,
}

impl GenerativeClient {
    /// Create a client, resolving the API credential.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Config`] when the credential
    /// environment variable is missing or empty — callers treat this as
    /// fatal at startup — or if the HTTP client cannot be built.
    pub fn new(config: &GenerativeConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CompanionError::Config(format!("failed to build generative client: {e}"))
            })?;

        info!(
            "generative reply configured: {} model={}",
            config.api_url, config.api_model
        );

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            model: config.api_model.clone(),
            api_key,
            max_history_turns: config.max_history_turns,
            history: Vec::new(),
        })
    }

    /// Generate a reply to `prompt`.
    ///
    /// `memory_context` (remembered user facts) is prefixed onto the
    /// prompt when non-empty; `extra_instruction` (e.g. the faith-verse
    /// hint) is appended to the request as its own turn without being
    /// recorded in the durable history.
    ///
    /// # Errors
    ///
    /// Returns [`CompanionError::Llm`] on transport failure, a
    /// non-success status, or a response missing the generated text.
    pub async fn generate(
        &mut self,
        prompt: &str,
        memory_context: &str,
        extra_instruction: Option<&str>,
    ) -> Result<String> {
        let enhanced = if memory_context.is_empty() {
            prompt.to_owned()
        } else {
            format!("{memory_context}\nUser: {prompt}")
        };

        let mut contents = vec![serde_json::json!({
            "role": "user",
            "parts": [{"text": SYSTEM_PROMPT}],
        })];
        if let Some(instruction) = extra_instruction {
            contents.push(serde_json::json!({
                "role": "user",
                "parts": [{"text": instruction}],
            }));
        }
        for turn in &self.history {
            contents.push(serde_json::json!({
                "role": turn.role,
                "parts": [{"text": turn.content}],
            }));
        }
        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{"text": enhanced}],
        }));

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = serde_json::json!({ "contents": contents });

        let gen_start = Instant::now();
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompanionError::Llm(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CompanionError::Llm(format!(
                "service returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompanionError::Llm(format!("invalid response body: {e}")))?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| CompanionError::Llm("response missing generated text".to_owned()))?
            .trim()
            .to_owned();

        info!(
            "generated {} chars in {:.1}s",
            text.len(),
            gen_start.elapsed().as_secs_f64()
        );

        self.history.push(HistoryTurn {
            role: "user",
            content: prompt.to_owned(),
        });
        self.history.push(HistoryTurn {
            role: "model",
            content: text.clone(),
        });
        self.trim_history();

        Ok(text)
    }

    /// Number of retained history turns (system instruction excluded).
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn trim_history(&mut self) {
        let max = self.max_history_turns;
        if max == 0 {
            return;
        }
        if self.history.len() > max {
            let drain_end = self.history.len() - max;
            self.history.drain(..drain_end);
        }
    }
}
