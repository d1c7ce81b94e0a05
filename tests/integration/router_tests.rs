//! Router tests over the in-memory repository

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use fieldcare_server::{
    api, config::LifecycleConfig, repository::Repository, services::Services, AppState,
};

async fn app() -> Router {
    let services = Services::new(Repository::in_memory(), LifecycleConfig::default());
    services
        .interventions
        .refresh()
        .await
        .expect("Failed to seed interventions");
    api::router(AppState {
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, json)
}

async fn create(app: &Router, company: &str, extra: Value) -> Value {
    let mut body = json!({
        "company_name": company,
        "email": "office@example.com",
        "phone": "+39 011 000000",
        "address": "Via Garibaldi 3, Torino"
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }
    let (status, created) = send(app, "POST", "/api/v1/interventions", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    created
}

#[tokio::test]
async fn test_health_and_ready() {
    let services = Services::new(Repository::in_memory(), LifecycleConfig::default());
    let app = api::router(AppState {
        services: Arc::new(services),
    });

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    // Cache not seeded yet
    let (status, body) = send(&app, "GET", "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "loading");

    // The first read seeds it
    let (status, _) = send(&app, "GET", "/api/v1/interventions", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_create_intervention() {
    let app = app().await;

    let created = create(&app, "Acme Srl", json!({ "brand": "  ", "model": "X200" })).await;
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["status"], "requested");
    assert_eq!(created["brand"], Value::Null);
    assert_eq!(created["model"], "X200");
    assert_eq!(created["concluded"], false);
}

#[tokio::test]
async fn test_create_without_company_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/interventions",
        Some(json!({
            "company_name": " ",
            "email": "office@example.com",
            "phone": "123",
            "address": "Via Roma 1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, list) = send(&app, "GET", "/api/v1/interventions", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_intervention_lifecycle() {
    let app = app().await;
    let created = create(&app, "Beta Spa", json!({})).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}/status", id),
        Some(json!({ "status": "In corso" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");

    // Partial logging while in progress; client-sent totals are ignored
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}", id),
        Some(json!({
            "time_entries": [{
                "date": "2025-04-02",
                "technician": "Rossi",
                "start1": "08:00",
                "end1": "12:00",
                "start2": "13:00",
                "end2": "15:30",
                "total_hours": 100
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time_entries"][0]["total_hours"], 6.5);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/interventions/{}/conclude", id),
        Some(json!({
            "work_description": "Replaced circulation pump",
            "kilometers": 24.5,
            "quote_requested": true,
            "time_entries": [{
                "date": "2025-04-02",
                "technician": "Rossi",
                "start1": "08:00",
                "end1": "09:30"
            }],
            "materials": [{ "unit": "pz", "quantity": 1, "description": "Pump" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["concluded"], true);
    assert_eq!(body["labor_hours"], 1.5);
    assert_eq!(body["materials"][0]["unit"], "PZ");

    // Completed is terminal
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}/status", id),
        Some(json!({ "status": "in_progress" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", &format!("/api/v1/interventions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["kilometers"], 24.5);
}

#[tokio::test]
async fn test_conclude_requires_work_in_progress() {
    let app = app().await;
    let created = create(&app, "Delta Impianti", json!({})).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}/status", id),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", &format!("/api/v1/interventions/{}/conclude", id), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    // Cancelled records refuse conclusion data through a plain update too
    send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}/status", id),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}", id),
        Some(json!({ "concluded": true, "work_description": "done", "kilometers": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", &format!("/api/v1/interventions/{}", id), None).await;
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["concluded"], false);
    assert_eq!(body["kilometers"], Value::Null);
}

#[tokio::test]
async fn test_conclude_keeps_logged_entries() {
    let app = app().await;
    let created = create(&app, "Epsilon Srl", json!({})).await;
    let id = created["id"].as_str().unwrap();

    send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}", id),
        Some(json!({
            "status": "in_progress",
            "time_entries": [{
                "date": "2025-04-03",
                "technician": "Neri",
                "start1": "14:00",
                "end1": "16:00"
            }]
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/interventions/{}/conclude", id),
        Some(json!({ "work_description": "Filter cleaned" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["time_entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["labor_hours"], 2.0);
}

#[tokio::test]
async fn test_search_and_status_filter() {
    let app = app().await;
    create(&app, "Acme Srl", json!({ "system_type": "Caldaia" })).await;
    let beta = create(&app, "Beta Spa", json!({ "assigned_technicians": "Verdi" })).await;
    create(&app, "Gamma Snc", json!({ "office_notes": "Chiamare prima" })).await;

    send(
        &app,
        "PUT",
        &format!("/api/v1/interventions/{}/status", beta["id"].as_str().unwrap()),
        Some(json!({ "status": "in_progress" })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/v1/interventions?q=ACME", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["company_name"], "Acme Srl");

    let (_, body) = send(&app, "GET", "/api/v1/interventions?q=verdi&status=in_progress", None).await;
    assert_eq!(body["total"], 1);

    let (_, body) = send(&app, "GET", "/api/v1/interventions?status=requested", None).await;
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["company_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acme Srl", "Gamma Snc"]);

    let (_, body) = send(&app, "GET", "/api/v1/interventions?q=nothing-like-this&status=all", None).await;
    assert_eq!(body["total"], 0);

    let (status, _) = send(&app, "GET", "/api/v1/interventions?status=closed", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_intervention() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/v1/interventions/does-not-exist",
        Some(json!({ "office_notes": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchIntervention");
}

#[tokio::test]
async fn test_timesheet_helpers() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/v1/timesheet/slots", None).await;
    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().unwrap();
    assert_eq!(slots.len(), 48);
    assert_eq!(slots[0], "00:00");
    assert_eq!(slots[47], "23:30");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/timesheet/hours",
        Some(json!({ "start1": "09:00", "end1": "09:00", "start2": "14:00", "end2": "bad" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_slot_minutes"], 0);
    assert_eq!(body["second_slot_minutes"], 0);
    assert_eq!(body["total_hours"], 0.0);
}
