//! Companion engine: handler-per-interaction orchestration.
//!
//! [`Companion`] owns the session context and the collaborator handles
//! and exposes one method per user interaction (respond, quick
//! category, speak, listen, breathing control). Handlers run one at a
//! time between host refresh cycles; the only concurrency is the
//! fire-and-forget speech and cue tasks, whose outcomes the engine
//! never observes.
//!
//! Failure policy is uniformly best-effort continue: a collaborator
//! failure degrades to a fallback message or an untranslated reply and
//! is logged, never propagated as fatal. The single fatal path is a
//! missing API credential when the generative backend is configured,
//! which fails construction.

use crate::audio::{CuePlayer, fire_cue};
use crate::breathing::BreathingTick;
use crate::classifier::{EmotionCategory, classify};
use crate::config::{CompanionConfig, ResponderBackend};
use crate::error::Result;
use crate::llm::{fallback_for, FALLBACK_NETWORK, GenerativeClient};
use crate::prompt;
use crate::responses::select_response;
use crate::session::{Role, Session};
use crate::speech::{ListenOutcome, Recognizer, Synthesizer};
use crate::translate::TranslationClient;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Canned reply selected for a classified (or overridden) category.
    Scripted(EmotionCategory),
    /// Text from the generative collaborator.
    Generative,
    /// The crisis response path.
    Crisis,
}

/// One reply as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply lines, post-translation.
    pub lines: Vec<String>,
    pub source: ReplySource,
}

/// The companion engine.
pub struct Companion {
    config: CompanionConfig,
    /// Session context, owned here and threaded through every handler.
    pub session: Session,
    rng: StdRng,
    translator: TranslationClient,
    /// Present only when the generative backend is configured.
    generative: Option<GenerativeClient>,
    synthesizer: Arc<dyn Synthesizer>,
    recognizer: Arc<dyn Recognizer>,
    cue: Arc<dyn CuePlayer>,
}

impl Companion {
    /// Build the engine from config and collaborator handles.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CompanionError::Config`] if an HTTP
    /// client cannot be built, or — when the generative backend is
    /// selected — if the API credential is missing (the fail-fast
    /// startup contract).
    pub fn new(
        config: CompanionConfig,
        synthesizer: Arc<dyn Synthesizer>,
        recognizer: Arc<dyn Recognizer>,
        cue: Arc<dyn CuePlayer>,
    ) -> Result<Self> {
        let translator = TranslationClient::new(&config.translation)?;
        let generative = match config.responder.backend {
            ResponderBackend::Generative => Some(GenerativeClient::new(&config.generative)?),
            ResponderBackend::Scripted => None,
        };
        let rng = match config.responder.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = Session::new();
        session.voice = config.voice.clone();
        session.breathing = crate::breathing::BreathingTimer::with_duration(
            Duration::from_secs(config.breathing.duration_secs),
        );

        Ok(Self {
            config,
            session,
            rng,
            translator,
            generative,
            synthesizer,
            recognizer,
            cue,
        })
    }

    // ── Chat ────────────────────────────────────────────────────────

    /// Produce a supportive reply to user text.
    ///
    /// Runs memory extraction, then the crisis gate, then the
    /// configured reply path, then translation. Collaborator failures
    /// degrade to fallbacks; this only errors if the static response
    /// table is broken.
    pub async fn respond(&mut self, input: &str) -> Result<Reply> {
        if let Some(name) = prompt::extract_name(input) {
            info!("remembering user name: {name}");
            self.session.remember("name", name);
        }

        self.session.push_turn(Role::User, input);

        if prompt::contains_crisis(input) {
            warn!("crisis keywords detected; responding with crisis support");
            let lines = self.translate_or_fallback(prompt::crisis_reply_lines()).await;
            self.finish_reply(&lines, None);
            return Ok(Reply {
                lines,
                source: ReplySource::Crisis,
            });
        }

        // An empty prompt has nothing for the generative collaborator;
        // both backends resolve it through the scripted default path.
        let use_generative =
            self.config.responder.backend == ResponderBackend::Generative
                && !input.trim().is_empty();

        let (lines, source) = if use_generative {
            let text = self.generate_or_fallback(input).await;
            (vec![text], ReplySource::Generative)
        } else {
            let category = classify(input);
            let reply = select_response(category, &mut self.rng)?;
            let lines: Vec<String> = reply.iter().map(|&l| l.to_owned()).collect();
            (lines, ReplySource::Scripted(category))
        };

        let lines = self.translate_or_fallback(lines).await;
        let category = match source {
            ReplySource::Scripted(c) => Some(c),
            _ => None,
        };
        self.finish_reply(&lines, category);

        Ok(Reply { lines, source })
    }

    /// Reply for an explicitly chosen category, skipping classification
    /// (the "pick one that fits best" quick options).
    pub async fn quick_response(&mut self, category: EmotionCategory) -> Result<Reply> {
        let reply = select_response(category, &mut self.rng)?;
        let lines: Vec<String> = reply.iter().map(|&l| l.to_owned()).collect();
        let lines = self.translate_or_fallback(lines).await;
        self.finish_reply(&lines, Some(category));
        Ok(Reply {
            lines,
            source: ReplySource::Scripted(category),
        })
    }

    /// Listen for one window and respond to whatever was recognized.
    ///
    /// Returns `Ok(None)` when nothing intelligible was heard.
    /// Transport faults from the recognizer are logged and also yield
    /// `None` — the session stays interactive.
    pub async fn listen_and_respond(&mut self) -> Result<Option<Reply>> {
        let window = Duration::from_secs(self.config.listening.window_secs);
        match self.recognizer.listen(window).await {
            Ok(ListenOutcome::Recognized(text)) => {
                info!("recognized: {text}");
                Ok(Some(self.respond(&text).await?))
            }
            Ok(ListenOutcome::Unrecognized) => {
                info!("listening window elapsed without intelligible speech");
                Ok(None)
            }
            Err(e) => {
                warn!("speech recognition unavailable (non-fatal): {e}");
                Ok(None)
            }
        }
    }

    // ── Speech output ───────────────────────────────────────────────

    /// Speak the last reply on a detached task.
    ///
    /// No result is observed; synthesis failure is logged, never
    /// raised. A no-op when there is nothing to speak.
    pub fn speak_last(&self) {
        if self.session.last_reply.is_empty() {
            return;
        }
        let text = self.session.last_reply.join(" ");
        let voice = self.session.voice.clone();
        let synthesizer = Arc::clone(&self.synthesizer);
        tokio::spawn(async move {
            if let Err(e) = synthesizer.speak(&text, &voice).await {
                warn!("speech synthesis failed (non-fatal): {e}");
            }
        });
    }

    /// Halt any speech currently playing.
    pub async fn stop_speaking(&self) {
        if let Err(e) = self.synthesizer.stop().await {
            warn!("failed to stop speech (non-fatal): {e}");
        }
    }

    // ── Breathing ───────────────────────────────────────────────────

    /// Start a breathing session at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CompanionError::Breathing`] if one is
    /// already running.
    pub fn start_breathing(&mut self, now: Instant) -> Result<()> {
        self.session.breathing.start(now)
    }

    /// Advance the breathing session and fire the exhale cue when the
    /// tick reports a fresh Exhale entry.
    pub fn breathing_tick(&mut self, now: Instant) -> BreathingTick {
        let tick = self.session.breathing.tick(now);
        if tick.fire_exhale_cue {
            fire_cue(Arc::clone(&self.cue));
        }
        tick
    }

    /// Cancel the running breathing session (idempotent).
    pub fn stop_breathing(&mut self) {
        self.session.breathing.cancel();
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn generate_or_fallback(&mut self, input: &str) -> String {
        let Some(generative) = self.generative.as_mut() else {
            // Unreachable by construction; degrade rather than panic.
            return FALLBACK_NETWORK.to_owned();
        };

        let memory_context = self.session.memory_context();
        let hint = if prompt::is_negative_mood(input) {
            prompt::faith_hint(self.session.profile.faith)
        } else {
            None
        };

        match generative
            .generate(input, &memory_context, hint.as_deref())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("generative reply failed, using fallback: {e}");
                fallback_for(&e).to_owned()
            }
        }
    }

    async fn translate_or_fallback(&self, lines: Vec<String>) -> Vec<String> {
        let target = self.session.language;
        match self.translator.translate_lines(&lines, target).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("translation to {target} failed, showing original: {e}");
                lines
            }
        }
    }

    fn finish_reply(&mut self, lines: &[String], category: Option<EmotionCategory>) {
        self.session.last_reply = lines.to_vec();
        self.session.last_category = category;
        self.session.push_turn(Role::Assistant, lines.join("\n"));
    }
}
