//! Translation Service Contract Tests
//!
//! Verify exact HTTP format compliance for the translation collaborator:
//! request body shape, response parsing, and error mapping.

use feelease::config::TranslationConfig;
use feelease::error::CompanionError;
use feelease::translate::{Language, TranslationClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TranslationClient {
    TranslationClient::new(&TranslationConfig {
        api_url: server.uri(),
        timeout_secs: 2,
    })
    .expect("client builds")
}

#[tokio::test]
async fn request_carries_query_auto_source_and_target() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({
            "q": "You're not alone.",
            "source": "auto",
            "target": "hi",
            "format": "text"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"translatedText": "आप अकेले नहीं हैं।"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = client
        .translate("You're not alone.", Language::Hindi)
        .await
        .expect("translation succeeds");
    assert_eq!(out, "आप अकेले नहीं हैं।");
}

#[tokio::test]
async fn bengali_target_uses_bn_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({"target": "bn"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translatedText": "ঠিক আছে"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = client.translate("Okay", Language::Bengali).await.unwrap();
    assert_eq!(out, "ঠিক আছে");
}

#[tokio::test]
async fn english_target_never_hits_the_service() {
    let server = MockServer::start().await;
    // No mock mounted: any request would 404 and the strict check below
    // would catch it.

    let client = client_for(&server);
    let out = client
        .translate("Stay with me.", Language::English)
        .await
        .unwrap();
    assert_eq!(out, "Stay with me.");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn http_error_maps_to_translate_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.translate("hello", Language::Hindi).await.unwrap_err();
    assert!(matches!(err, CompanionError::Translate(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn missing_translated_text_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detected": "en"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.translate("hello", Language::Hindi).await.unwrap_err();
    assert!(err.to_string().contains("translatedText"));
}

#[tokio::test]
async fn translate_lines_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({"q": "first"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translatedText": "पहला"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({"q": "second"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translatedText": "दूसरा"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = client
        .translate_lines(
            &["first".to_owned(), "second".to_owned()],
            Language::Hindi,
        )
        .await
        .unwrap();
    assert_eq!(out, vec!["पहला".to_owned(), "दूसरा".to_owned()]);
}
