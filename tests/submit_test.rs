mod common;

use common::TestApp;
use contact_service::services::MockPublisher;
use reqwest::Client;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

// =============================================================================
// Health and metrics
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "contact-service");
}

#[tokio::test]
async fn metrics_endpoint_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

// =============================================================================
// Submission happy path
// =============================================================================

#[tokio::test]
async fn valid_submission_returns_notification_id() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&app.submit_url())
        .json(&json!({"email": "a@b.com", "message": "hi"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let notification_id = body["notificationId"]
        .as_str()
        .expect("notificationId should be a string");
    assert!(!notification_id.is_empty());
    assert_eq!(body["message"], "Mensagem enviada com sucesso via SNS!");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn submission_builds_the_expected_notification() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    client
        .post(&app.submit_url())
        .json(&json!({"email": "a@b.com", "message": "hi"}))
        .send()
        .await
        .expect("Failed to execute request");

    let published = app.publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].body, "Mensagem de: a@b.com\n\nhi");
    assert_eq!(published[0].subject, "Nova mensagem recebida");
    assert_eq!(
        published[0].topic_arn,
        "arn:aws:sns:us-east-1:000000000000:contact-topic-test"
    );
}

// =============================================================================
// Validation and decode failures
// =============================================================================

#[tokio::test]
async fn empty_email_is_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&app.submit_url())
        .json(&json!({"email": "", "message": "hi"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "email and message are required");
    assert_eq!(app.publisher.send_count(), 0);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&app.submit_url())
        .json(&json!({"email": "a@b.com", "message": ""}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "email and message are required");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&app.submit_url())
        .json(&json!({"email": "a@b.com"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "email and message are required");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(&app.submit_url())
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "invalid request format");
    assert_eq!(app.publisher.send_count(), 0);
}

#[tokio::test]
async fn non_post_method_is_not_allowed() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(&app.submit_url())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 405);
}

// =============================================================================
// Provider failures
// =============================================================================

#[tokio::test]
async fn provider_failure_returns_generic_error() {
    let publisher = Arc::new(MockPublisher::new(true));
    publisher.fail_with("simulated SNS outage");
    let app = TestApp::spawn_with(publisher).await;
    let client = Client::new();

    let response = client
        .post(&app.submit_url())
        .json(&json!({"email": "a@b.com", "message": "hi"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);

    // Only the generic message goes to the caller; the detail stays server-side.
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "failed to send notification");
    assert!(!body.to_string().contains("simulated SNS outage"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_submissions_get_independent_responses() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let requests = (0..100).map(|i| {
        let client = client.clone();
        let url = app.submit_url();
        async move {
            let response = client
                .post(&url)
                .json(&json!({
                    "email": format!("user{}@example.com", i),
                    "message": format!("message {}", i),
                }))
                .send()
                .await
                .expect("Failed to execute request");

            assert_eq!(response.status().as_u16(), 200);

            let body: serde_json::Value =
                response.json().await.expect("Failed to parse response");
            body["notificationId"]
                .as_str()
                .expect("notificationId should be a string")
                .to_string()
        }
    });

    let ids: Vec<String> = futures::future::join_all(requests).await;

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 100);
    assert_eq!(app.publisher.send_count(), 100);
}
