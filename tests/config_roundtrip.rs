//! Config persistence round-trip and credential fail-fast tests.

use feelease::audio::NullCue;
use feelease::config::{CompanionConfig, GenerativeConfig, ResponderBackend};
use feelease::error::CompanionError;
use feelease::speech::{NullRecognizer, NullSynthesizer, VoiceChoice};
use feelease::Companion;
use std::sync::Arc;

#[test]
fn save_then_load_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = CompanionConfig::default();
    config.responder.backend = ResponderBackend::Generative;
    config.responder.seed = Some(99);
    config.breathing.duration_secs = 180;
    config.translation.api_url = "http://localhost:5000".to_owned();
    config.voice.choice = VoiceChoice::Male;
    config.voice.rate = 150;

    config.save(&path).unwrap();
    let loaded = CompanionConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CompanionConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CompanionError::Config(_)));
}

#[test]
fn load_broken_file_reports_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "breathing = \"not a table\"").unwrap();
    let err = CompanionConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn empty_credential_is_rejected() {
    std::env::set_var("FEELEASE_ROUNDTRIP_KEY_EMPTY", "   ");
    let config = GenerativeConfig {
        api_key_env: "FEELEASE_ROUNDTRIP_KEY_EMPTY".to_owned(),
        ..GenerativeConfig::default()
    };
    let err = config.resolve_api_key().unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn generative_engine_without_credential_fails_at_startup() {
    let mut config = CompanionConfig::default();
    config.responder.backend = ResponderBackend::Generative;
    config.generative.api_key_env = "FEELEASE_ROUNDTRIP_KEY_ABSENT".to_owned();

    let err = Companion::new(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(NullRecognizer),
        Arc::new(NullCue),
    )
    .err()
    .expect("construction must fail without a credential");
    assert!(matches!(err, CompanionError::Config(_)));
}

#[test]
fn scripted_engine_needs_no_credential() {
    let config = CompanionConfig::default();
    assert!(Companion::new(
        config,
        Arc::new(NullSynthesizer),
        Arc::new(NullRecognizer),
        Arc::new(NullCue),
    )
    .is_ok());
}
