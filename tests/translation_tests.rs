//! HTTP translation client tests against a local stub service

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use mantra_core::Language;
use mantra_translate::{HttpTranslator, TranslateConfig, TranslateError, Translator};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{}/translate", addr)
}

fn fast_config(endpoint: String) -> TranslateConfig {
    let mut config = TranslateConfig::new(endpoint);
    config.retry.max_retries = 0;
    config.retry.initial_delay_ms = 1;
    config
}

#[tokio::test]
async fn test_happy_path_round_trip() {
    let app = Router::new().route(
        "/translate",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["title"], "Hello");
            assert_eq!(body["content"], "World.");
            assert_eq!(body["targetLanguage"], "Spanish");
            Json(json!({
                "translatedTitle": "Hola",
                "translatedContent": "Mundo."
            }))
        }),
    );
    let endpoint = spawn_server(app).await;

    let translator = HttpTranslator::new(fast_config(endpoint)).unwrap();
    let result = translator
        .translate("Hello", "World.", Language::Spanish)
        .await
        .unwrap();

    assert_eq!(result.title, "Hola");
    assert_eq!(result.content, "Mundo.");
}

#[tokio::test]
async fn test_api_key_sent_as_bearer_token() {
    let app = Router::new().route(
        "/translate",
        post(|headers: HeaderMap, Json(_): Json<Value>| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            assert_eq!(auth, "Bearer sekrit");
            Json(json!({
                "translatedTitle": "T",
                "translatedContent": "C."
            }))
        }),
    );
    let endpoint = spawn_server(app).await;

    let mut config = fast_config(endpoint);
    config.api_key = Some("sekrit".to_string());
    let translator = HttpTranslator::new(config).unwrap();
    translator
        .translate("t", "c", Language::German)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_malformed_success_body_degrades_to_raw_text() {
    let app = Router::new().route(
        "/translate",
        post(|| async { "Texto traducido sin envoltura JSON." }),
    );
    let endpoint = spawn_server(app).await;

    let translator = HttpTranslator::new(fast_config(endpoint)).unwrap();
    let result = translator
        .translate("Original Title", "Body.", Language::Spanish)
        .await
        .unwrap();

    // 2xx with an unexpected shape still yields speakable text; the
    // original title is kept.
    assert_eq!(result.title, "Original Title");
    assert_eq!(result.content, "Texto traducido sin envoltura JSON.");
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let app = Router::new().route(
        "/translate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let endpoint = spawn_server(app).await;

    let translator = HttpTranslator::new(fast_config(endpoint)).unwrap();
    let error = translator
        .translate("t", "c", Language::French)
        .await
        .unwrap_err();

    match error {
        TranslateError::Api(message) => assert!(message.contains("500"), "got: {}", message),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failure() {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = hits.clone();
    let app = Router::new().route(
        "/translate",
        post(move || {
            let hits = handler_hits.clone();
            async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response()
                } else {
                    Json(json!({
                        "translatedTitle": "Titre",
                        "translatedContent": "Corps."
                    }))
                    .into_response()
                }
            }
        }),
    );
    let endpoint = spawn_server(app).await;

    let mut config = fast_config(endpoint);
    config.retry.max_retries = 3;
    let translator = HttpTranslator::new(config).unwrap();
    let result = translator
        .translate("Title", "Body.", Language::French)
        .await
        .unwrap();

    assert_eq!(result.title, "Titre");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalid_endpoint_rejected_up_front() {
    let config = TranslateConfig::new("ftp://translate.example.com");
    assert!(HttpTranslator::new(config).is_err());
}
