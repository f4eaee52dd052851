mod common;

use common::TestApp;
use notification_service::grpc::proto::{GetStatusRequest, SendNotificationRequest};
use reqwest::Client;

// =============================================================================
// Health Check (HTTP)
// =============================================================================

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "notification-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_serves_prometheus_text() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/metrics", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}

// =============================================================================
// SendNotification (gRPC)
// =============================================================================

#[tokio::test]
async fn send_notification_via_grpc() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client().await;

    let response = client
        .send_notification(SendNotificationRequest {
            user_id: "1".to_string(),
            message: "Event Created: team offsite".to_string(),
        })
        .await
        .expect("Failed to send notification")
        .into_inner();

    assert!(response.success);
}

#[tokio::test]
async fn send_notification_accepts_empty_fields() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client().await;

    let response = client
        .send_notification(SendNotificationRequest {
            user_id: String::new(),
            message: String::new(),
        })
        .await
        .expect("Failed to send notification")
        .into_inner();

    assert!(response.success);
}

#[tokio::test]
async fn concurrent_sends_all_acknowledge() {
    let app = TestApp::spawn().await;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let mut client = app.grpc_client().await;
        tasks.spawn(async move {
            client
                .send_notification(SendNotificationRequest {
                    user_id: i.to_string(),
                    message: format!("message {}", i),
                })
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        let response = result
            .expect("sender task panicked")
            .expect("Failed to send notification");
        assert!(response.into_inner().success);
    }
}

// =============================================================================
// GetStatus (gRPC)
// =============================================================================

#[tokio::test]
async fn get_status_via_grpc() {
    let app = TestApp::spawn().await;
    let mut client = app.grpc_client().await;

    let response = client
        .get_status(GetStatusRequest {})
        .await
        .expect("Failed to get status")
        .into_inner();

    assert!(response.status.contains("notification-service"));
}
