//! In-process tests for request validation on catalog and account endpoints
//!
//! Each request here is rejected before any database access.

use axum::http::StatusCode;
use serde_json::json;

use shelfmark_server::models::user::Role;

use crate::common::{json_request, StubProvider, TestApp};

#[tokio::test]
async fn test_blank_review_comment_rejected() {
    let app = TestApp::new(StubProvider::default());
    let token = app.token_for(4, Role::Member);

    for comment in ["   ", "\n\t"] {
        let body = json!({"comment": comment, "rating": 4}).to_string();
        let (status, response) = app
            .send(json_request("POST", "/api/v1/books/1/reviews", &body, Some(&token)))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
    }

    let body = json!({"comment": "  "}).to_string();
    let (status, _) = app
        .send(json_request("PUT", "/api/v1/books/1/reviews/1", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_rating_out_of_range_rejected() {
    let app = TestApp::new(StubProvider::default());
    let token = app.token_for(4, Role::Member);
    let body = json!({"comment": "Fine", "rating": 6}).to_string();

    let (status, _) = app
        .send(json_request("POST", "/api/v1/books/1/reviews", &body, Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_padded_short_username_rejected() {
    let app = TestApp::new(StubProvider::default());
    let body = json!({"username": "  ab  ", "password": "long enough"}).to_string();

    let (status, response) = app
        .send(json_request("POST", "/api/v1/auth/register", &body, None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
}
