//! Live server tests
//!
//! Require a running server with a migrated database and an `admin` account
//! whose password is `admin-password`. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a token for the seeded administrator
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Register a throwaway member and return its token
async fn register_member(client: &Client) -> String {
    let username = format!("member_{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let password = "member-password";

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");
    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_and_readiness() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_invalid_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_translate_is_cached_in_database() {
    let client = Client::new();
    let text = format!("Live cache probe {}", chrono::Utc::now().timestamp_millis());
    let body = json!({ "text": text, "source_language": "en", "target_language": "es" });

    let first: Value = client
        .post(format!("{}/translate", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(first["success"], true);

    // A provider outage leaves nothing cached, so only check a hit after a real translation
    if first["translated"] != first["original"] {
        let second: Value = client
            .post(format!("{}/translate", BASE_URL))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        assert_eq!(second["cached"], true);
        assert_eq!(second["translated"], first["translated"]);
    }
}

#[tokio::test]
#[ignore]
async fn test_preference_round_trip() {
    let client = Client::new();
    let token = register_member(&client).await;

    let body: Value = client
        .get(format!("{}/get-preference", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["language"], "en");

    let response = client
        .post(format!("{}/set-preference", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "language": "ja" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = client
        .get(format!("{}/get-preference", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["language"], "ja");
}

#[tokio::test]
#[ignore]
async fn test_catalog_review_and_stock_flow() {
    let client = Client::new();
    let admin = get_admin_token(&client).await;
    let member = register_member(&client).await;

    let book: Value = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({
            "title": "The Left Hand of Darkness",
            "author": "Ursula K. Le Guin",
            "genre": "Science fiction",
            "summary": "An envoy visits a planet whose people have no fixed sex."
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("book id");

    let branch: Value = client
        .post(format!("{}/admin/branches", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Central", "latitude": 48.8566, "longitude": 2.3522 }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let branch_id = branch["id"].as_i64().expect("branch id");

    let response = client
        .put(format!("{}/admin/stock", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({ "book_id": book_id, "branch_id": branch_id, "count": 3 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let availability: Value = client
        .get(format!("{}/books/{}/branches", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(availability["branches"][0]["count"], 3);

    let response = client
        .post(format!("{}/books/{}/reviews", BASE_URL, book_id))
        .bearer_auth(&member)
        .json(&json!({ "comment": "Superb", "rating": 5 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let details: Value = client
        .get(format!("{}/books/{}?lang=fr", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(details["current_language"], "fr");
    assert_eq!(details["reviews"][0]["comment"], "Superb");

    let response = client
        .delete(format!("{}/admin/books/{}", BASE_URL, book_id))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_members_cannot_administer() {
    let client = Client::new();
    let member = register_member(&client).await;

    let response = client
        .get(format!("{}/admin/translations", BASE_URL))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}
