
use std::time::Duration;

use chrono::Utc;
use portfolio_contact::limiter::rate_limiter::RateLimiter;
use serde_json::{json, Value};
use test_utils::{RecordingStore, TestApp};

fn valid_body() -> Value {
    json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" })
}

#[tokio::test]
async fn valid_submission_persists_exactly_once() {
    let app = TestApp::spawn().await;

    let response = app.post_contact("203.0.113.7", &valid_body()).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let docs = app.store.as_ref().unwrap().created();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].doc_type, "contactMessage");
    assert_eq!(docs[0].name, "Ada");
    assert_eq!(docs[0].email, "ada@example.com");
    assert_eq!(docs[0].message, "Hello");

    let age = Utc::now().signed_duration_since(docs[0].submitted_at);
    assert!(age.num_seconds() >= 0 && age.num_seconds() < 60);
}

#[tokio::test]
async fn all_invalid_fields_are_reported_in_order() {
    let app = TestApp::spawn().await;

    let response = app
        .post_contact("203.0.113.8", &json!({ "name": "   ", "email": "nope", "message": "" }))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0], json!({ "field": "name", "message": "Name is required" }));
    assert_eq!(errors[1], json!({ "field": "email", "message": "Valid email is required" }));
    assert_eq!(errors[2], json!({ "field": "message", "message": "Message is required" }));

    assert!(app.store.as_ref().unwrap().created().is_empty());
}

#[tokio::test]
async fn missing_fields_fail_validation_rather_than_deserialization() {
    let app = TestApp::spawn().await;

    let response = app.post_contact("203.0.113.9", &json!({})).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn bad_email_is_the_only_reported_error() {
    let app = TestApp::spawn().await;

    let response = app
        .post_contact(
            "203.0.113.10",
            &json!({ "name": "Ada", "email": "not-an-email", "message": "Hello" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "email");

    assert!(app.store.as_ref().unwrap().created().is_empty());
}

#[tokio::test]
async fn fourth_request_in_window_is_limited() {
    let app = TestApp::spawn_with(
        Some(RecordingStore::new()),
        RateLimiter::new(3, Duration::from_millis(800)),
    )
    .await;

    for _ in 0..3 {
        let response = app.post_contact("198.51.100.1", &valid_body()).await;
        assert_eq!(response.status(), 200);
    }

    let limited = app.post_contact("198.51.100.1", &valid_body()).await;
    assert_eq!(limited.status(), 429);

    let body: Value = limited.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        "Too many requests from this IP, please try again later."
    );

    // The refused attempt never reached the store.
    assert_eq!(app.store.as_ref().unwrap().created().len(), 3);

    // A fresh window grants a fresh budget.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let response = app.post_contact("198.51.100.1", &valid_body()).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn rate_limit_budgets_are_per_ip() {
    let app = TestApp::spawn().await;

    for _ in 0..3 {
        assert_eq!(app.post_contact("198.51.100.2", &valid_body()).await.status(), 200);
    }
    assert_eq!(app.post_contact("198.51.100.2", &valid_body()).await.status(), 429);

    // A different client still has its full budget.
    assert_eq!(app.post_contact("198.51.100.3", &valid_body()).await.status(), 200);
}

#[tokio::test]
async fn preflight_returns_200_with_cors_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/api/contact", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST, OPTIONS");
    assert!(headers.get("access-control-allow-headers").is_some());

    assert!(app.store.as_ref().unwrap().created().is_empty());
}

#[tokio::test]
async fn non_post_methods_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/contact", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 405);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "message": "Method not allowed" }));

    let response = app
        .client
        .put(format!("{}/api/contact", app.address))
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn store_failure_surfaces_as_generic_500() {
    let app = TestApp::spawn_with(
        Some(RecordingStore::failing()),
        RateLimiter::new(3, Duration::from_secs(900)),
    )
    .await;

    let response = app.post_contact("203.0.113.11", &valid_body()).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], "An error occurred while processing your request.");
    // No internal detail leaks into the response.
    assert!(!body["message"].as_str().unwrap().contains("outage"));
}

#[tokio::test]
async fn missing_store_accepts_submissions_in_dev_mode() {
    let app = TestApp::spawn_with(None, RateLimiter::new(3, Duration::from_secs(900))).await;

    let response = app.post_contact("203.0.113.12", &valid_body()).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].as_str().unwrap().contains("dev mode"));
}

#[tokio::test]
async fn malformed_json_body_gets_the_standard_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/api/contact", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "message": "Invalid request body" }));
}

#[tokio::test]
async fn health_reports_store_state() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["content_store"], "configured");

    let app = TestApp::spawn_with(None, RateLimiter::new(3, Duration::from_secs(900))).await;
    let body: Value = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["content_store"], "not configured (dev mode)");
}
