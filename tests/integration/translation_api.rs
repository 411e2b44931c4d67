//! In-process tests for the translation, preference and access-control surface

use axum::http::StatusCode;
use serde_json::json;

use shelfmark_server::models::{enums::Language, user::Role};

use crate::common::{get_request, json_request, StubProvider, TestApp};

fn app() -> TestApp {
    TestApp::new(
        StubProvider::default()
            .with_phrase("Hello World", "es", "Hola Mundo")
            .with_phrase("Good morning", "fr", "Bonjour"),
    )
}

#[tokio::test]
async fn test_translate_then_served_from_cache() {
    let app = app();
    let body = json!({"text": "Hello World", "source_language": "en", "target_language": "es"}).to_string();

    let (status, first) = app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["original"], "Hello World");
    assert_eq!(first["translated"], "Hola Mundo");
    assert_eq!(first["cached"], false);

    let (status, second) = app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["translated"], "Hola Mundo");
    assert_eq!(second["cached"], true);

    assert_eq!(app.provider.calls(), 1);
    assert_eq!(app.cache.len(), 1);
}

#[tokio::test]
async fn test_translate_trims_text_before_lookup() {
    let app = app();
    let body = json!({"text": "  Hello World \n", "target_language": "es"}).to_string();

    let (status, response) = app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["original"], "Hello World");
    assert_eq!(response["source_language"], "en");
    assert_eq!(response["translated"], "Hola Mundo");
}

#[tokio::test]
async fn test_same_language_returns_text_unchanged() {
    let app = app();
    let body = json!({"text": "Hello World", "source_language": "en", "target_language": "en"}).to_string();

    let (status, response) = app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["translated"], "Hello World");
    assert_eq!(response["cached"], false);
    assert_eq!(app.provider.calls(), 0);
    assert_eq!(app.cache.len(), 0);
}

#[tokio::test]
async fn test_provider_failure_returns_original_without_caching() {
    let app = app();
    let body = json!({"text": "Unknown phrase", "source_language": "en", "target_language": "de"}).to_string();

    let (status, response) = app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(response["translated"], "Unknown phrase");
    assert_eq!(response["cached"], false);
    assert_eq!(app.cache.len(), 0);

    // Not cached, so the provider is asked again
    app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(app.provider.calls(), 2);
}

#[tokio::test]
async fn test_translate_rejects_missing_text() {
    let app = app();

    for body in [json!({}), json!({"text": ""}), json!({"text": "   "})] {
        let (status, response) = app
            .send(json_request("POST", "/api/v1/translate", &body.to_string(), None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"], "No text provided");
    }
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn test_translate_rejects_malformed_json() {
    let app = app();

    let (status, response) = app
        .send(json_request("POST", "/api/v1/translate", "{not json", None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_translate_rejects_oversized_text() {
    let app = app();
    let text = "a".repeat(app.config.translation.max_text_length + 1);
    let body = json!({"text": text, "target_language": "es"}).to_string();

    let (status, response) = app.send(json_request("POST", "/api/v1/translate", &body, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn test_preference_requires_authentication() {
    let app = app();

    let (status, response) = app.send(get_request("/api/v1/get-preference", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["success"], false);

    let (status, _) = app
        .send(json_request("POST", "/api/v1/set-preference", r#"{"language":"fr"}"#, None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(get_request("/api/v1/get-preference", Some("not-a-token")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_preference_defaults_to_english() {
    let app = app();
    let token = app.token_for(7, Role::Member);

    let (status, response) = app.send(get_request("/api/v1/get-preference", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(response["language"], "en");
    assert!(app.preferences.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_set_preference_then_read_back() {
    let app = app();
    let token = app.token_for(7, Role::Member);

    let (status, response) = app
        .send(json_request("POST", "/api/v1/set-preference", r#"{"language":"fr"}"#, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["language"], "fr");
    assert_eq!(response["message"], "Language preference updated");

    let (_, response) = app
        .send(json_request("POST", "/api/v1/set-preference", r#"{"language":"zh-hans"}"#, Some(&token)))
        .await;
    assert_eq!(response["language"], "zh-hans");

    let (status, response) = app.send(get_request("/api/v1/get-preference", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["language"], "zh-hans");
    assert_eq!(app.preferences.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_preference_without_language_uses_english() {
    let app = app();
    let token = app.token_for(3, Role::Member);

    let (status, response) = app
        .send(json_request("POST", "/api/v1/set-preference", "{}", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["language"], "en");
}

#[tokio::test]
async fn test_invalid_preference_leaves_stored_value() {
    let app = app();
    let token = app.token_for(9, Role::Member);
    app.preferences.rows.lock().unwrap().insert(9, Language::De);

    let (status, response) = app
        .send(json_request("POST", "/api/v1/set-preference", r#"{"language":"xx"}"#, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Invalid language");

    assert_eq!(app.preferences.rows.lock().unwrap().get(&9), Some(&Language::De));
}

#[tokio::test]
async fn test_list_languages() {
    let app = app();

    let (status, response) = app.send(get_request("/api/v1/languages", None)).await;
    assert_eq!(status, StatusCode::OK);
    let languages = response.as_array().expect("array");
    assert_eq!(languages.len(), 8);
    assert_eq!(languages[0]["code"], "en");
    assert_eq!(languages[0]["name"], "English");
    assert!(languages.iter().any(|l| l["code"] == "zh-hans"));
}

#[tokio::test]
async fn test_admin_routes_reject_members() {
    let app = app();
    let token = app.token_for(5, Role::Member);

    let (status, response) = app
        .send(get_request("/api/v1/admin/translations", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(response["success"], false);

    let (status, _) = app
        .send(get_request("/api/v1/admin/preferences", None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_docs() {
    let app = app();

    let (status, response) = app.send(get_request("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");

    let (status, doc) = app.send(get_request("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/translate"].is_object());
}
