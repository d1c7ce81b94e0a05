//! API tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create an intervention and return its id
async fn create_intervention(client: &Client, company: &str) -> String {
    let response = client
        .post(format!("{}/interventions", BASE_URL))
        .json(&json!({
            "company_name": company,
            "email": "office@example.com",
            "phone": "+39 011 000000",
            "address": "Via Garibaldi 3, Torino"
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse create response");
    body["id"].as_str().expect("No intervention ID").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_interventions() {
    let client = Client::new();

    let response = client
        .get(format!("{}/interventions?status=all", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_create_and_start_intervention() {
    let client = Client::new();
    let id = create_intervention(&client, "Live Test Srl").await;

    let response = client
        .put(format!("{}/interventions/{}/status", BASE_URL, id))
        .json(&json!({ "status": "in_progress" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "in_progress");
}

#[tokio::test]
#[ignore]
async fn test_cancelled_cannot_be_reopened() {
    let client = Client::new();
    let id = create_intervention(&client, "Live Cancel Srl").await;

    let response = client
        .put(format!("{}/interventions/{}/status", BASE_URL, id))
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/interventions/{}/status", BASE_URL, id))
        .json(&json!({ "status": "requested" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unknown_intervention() {
    let client = Client::new();

    let response = client
        .get(format!("{}/interventions/no-such-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
