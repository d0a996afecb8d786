//! End-to-end engine scenarios against mocked collaborators.

use async_trait::async_trait;
use feelease::audio::CuePlayer;
use feelease::classifier::EmotionCategory;
use feelease::config::{CompanionConfig, ResponderBackend, ResponderConfig};
use feelease::llm::{FALLBACK_INVALID, FALLBACK_NETWORK};
use feelease::speech::{NullRecognizer, NullSynthesizer, Recognizer, Synthesizer, VoiceSettings};
use feelease::translate::Language;
use feelease::{Companion, Reply, ReplySource};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Synthesizer that records every utterance.
#[derive(Default)]
struct RecordingSynth {
    spoken: Mutex<Vec<String>>,
}

#[async_trait]
impl Synthesizer for RecordingSynth {
    async fn speak(&self, text: &str, _voice: &VoiceSettings) -> feelease::Result<()> {
        self.spoken.lock().unwrap().push(text.to_owned());
        Ok(())
    }

    async fn stop(&self) -> feelease::Result<()> {
        Ok(())
    }
}

/// Recognizer that returns a fixed transcription once.
struct OneShotRecognizer {
    text: String,
}

#[async_trait]
impl Recognizer for OneShotRecognizer {
    async fn listen(
        &self,
        _window: Duration,
    ) -> feelease::Result<feelease::speech::ListenOutcome> {
        Ok(feelease::speech::ListenOutcome::Recognized(self.text.clone()))
    }
}

/// Cue player that counts plays.
#[derive(Default)]
struct CountingCue {
    plays: AtomicUsize,
}

#[async_trait]
impl CuePlayer for CountingCue {
    async fn play(&self) -> feelease::Result<()> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn scripted_config(seed: u64) -> CompanionConfig {
    CompanionConfig {
        responder: ResponderConfig {
            backend: ResponderBackend::Scripted,
            seed: Some(seed),
        },
        ..CompanionConfig::default()
    }
}

fn companion_with(
    config: CompanionConfig,
    synth: Arc<dyn Synthesizer>,
    cue: Arc<dyn CuePlayer>,
) -> Companion {
    Companion::new(config, synth, Arc::new(NullRecognizer), cue).expect("engine builds")
}

async fn wait_for<F: Fn() -> bool>(check: F) {
    for _ in 0..100 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 1s");
}

#[tokio::test]
async fn anxious_text_is_answered_translated_and_spoken() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({"target": "hi"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"translatedText": "अनुवादित पंक्ति"})),
        )
        .mount(&server)
        .await;

    let mut config = scripted_config(11);
    config.translation.api_url = server.uri();

    let synth = Arc::new(RecordingSynth::default());
    let mut companion = companion_with(config, synth.clone(), Arc::new(CountingCue::default()));
    companion.session.language = Language::Hindi;

    let reply = companion
        .respond("I feel so anxious about my exam")
        .await
        .unwrap();
    assert_eq!(reply.source, ReplySource::Scripted(EmotionCategory::Anxiety));
    assert!(reply.lines.iter().all(|l| l == "अनुवादित पंक्ति"));

    companion.speak_last();
    wait_for(|| !synth.spoken.lock().unwrap().is_empty()).await;
    let spoken = synth.spoken.lock().unwrap();
    assert!(spoken[0].contains("अनुवादित पंक्ति"));
}

#[tokio::test]
async fn translation_failure_degrades_to_english() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut config = scripted_config(12);
    config.translation.api_url = server.uri();

    let mut companion = companion_with(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(CountingCue::default()),
    );
    companion.session.language = Language::Hindi;

    let reply = companion.respond("feeling really sad").await.unwrap();
    assert_eq!(reply.source, ReplySource::Scripted(EmotionCategory::Sadness));
    // Untranslated English lines, still a complete reply.
    assert!(!reply.lines.is_empty());
    assert!(reply.lines.iter().all(|l| l.is_ascii()));
}

#[tokio::test]
async fn empty_input_defaults_then_quick_pick_overrides() {
    let mut companion = companion_with(
        scripted_config(13),
        Arc::new(NullSynthesizer),
        Arc::new(CountingCue::default()),
    );

    let reply = companion.respond("   ").await.unwrap();
    assert_eq!(reply.source, ReplySource::Scripted(EmotionCategory::Default));

    let reply = companion.quick_response(EmotionCategory::Anger).await.unwrap();
    assert_eq!(reply.source, ReplySource::Scripted(EmotionCategory::Anger));
    assert_eq!(
        companion.session.last_category,
        Some(EmotionCategory::Anger)
    );
}

#[tokio::test]
async fn generative_backend_answers_from_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "I hear you. That must be difficult."}]}
            }]
        })))
        .mount(&server)
        .await;

    std::env::set_var("FEELEASE_SCENARIO_KEY_OK", "k");
    let mut config = scripted_config(14);
    config.responder.backend = ResponderBackend::Generative;
    config.generative.api_url = server.uri();
    config.generative.api_key_env = "FEELEASE_SCENARIO_KEY_OK".to_owned();

    let mut companion = companion_with(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(CountingCue::default()),
    );
    let reply = companion.respond("I've been feeling low").await.unwrap();
    assert_eq!(reply.source, ReplySource::Generative);
    assert_eq!(reply.lines, vec!["I hear you. That must be difficult."]);
}

#[tokio::test]
async fn generative_failures_fall_back_without_erroring() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    std::env::set_var("FEELEASE_SCENARIO_KEY_DOWN", "k");
    let mut config = scripted_config(15);
    config.responder.backend = ResponderBackend::Generative;
    config.generative.api_url = server.uri();
    config.generative.api_key_env = "FEELEASE_SCENARIO_KEY_DOWN".to_owned();

    let mut companion = companion_with(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(CountingCue::default()),
    );
    let reply = companion.respond("hello").await.unwrap();
    assert_eq!(reply.lines, vec![FALLBACK_NETWORK.to_owned()]);
}

#[tokio::test]
async fn generative_bad_shape_uses_invalid_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    std::env::set_var("FEELEASE_SCENARIO_KEY_SHAPE", "k");
    let mut config = scripted_config(16);
    config.responder.backend = ResponderBackend::Generative;
    config.generative.api_url = server.uri();
    config.generative.api_key_env = "FEELEASE_SCENARIO_KEY_SHAPE".to_owned();

    let mut companion = companion_with(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(CountingCue::default()),
    );
    let reply = companion.respond("hello").await.unwrap();
    assert_eq!(reply.lines, vec![FALLBACK_INVALID.to_owned()]);
}

#[tokio::test]
async fn crisis_bypasses_the_generative_backend() {
    let server = MockServer::start().await;
    // Strict server with no mocks: any generative call would 404.
    std::env::set_var("FEELEASE_SCENARIO_KEY_CRISIS", "k");
    let mut config = scripted_config(17);
    config.responder.backend = ResponderBackend::Generative;
    config.generative.api_url = server.uri();
    config.generative.api_key_env = "FEELEASE_SCENARIO_KEY_CRISIS".to_owned();

    let mut companion = companion_with(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(CountingCue::default()),
    );
    let reply = companion
        .respond("this is an emergency, I can't cope")
        .await
        .unwrap();
    assert_eq!(reply.source, ReplySource::Crisis);
    assert!(reply.lines.iter().any(|l| l.contains("Vandrevala")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn voice_input_flows_into_the_chat_path() {
    let mut companion = Companion::new(
        scripted_config(18),
        Arc::new(NullSynthesizer),
        Arc::new(OneShotRecognizer {
            text: "I feel lonely tonight".to_owned(),
        }),
        Arc::new(CountingCue::default()),
    )
    .unwrap();

    let reply: Option<Reply> = companion.listen_and_respond().await.unwrap();
    let reply = reply.expect("speech recognized");
    assert_eq!(reply.source, ReplySource::Scripted(EmotionCategory::Lonely));
}

#[tokio::test]
async fn breathing_session_fires_cue_each_exhale_cycle() {
    let cue = Arc::new(CountingCue::default());
    let mut companion = companion_with(
        scripted_config(19),
        Arc::new(NullSynthesizer),
        cue.clone(),
    );

    let origin = Instant::now();
    companion.start_breathing(origin).unwrap();

    // Walk the first two cycles second by second.
    for s in 0..=23 {
        companion.breathing_tick(origin + Duration::from_secs(s));
    }
    wait_for(|| cue.plays.load(Ordering::SeqCst) == 2).await;

    // Cancelled sessions tick but never cue.
    companion.stop_breathing();
    companion.breathing_tick(origin + Duration::from_secs(32));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(cue.plays.load(Ordering::SeqCst), 2);
}
