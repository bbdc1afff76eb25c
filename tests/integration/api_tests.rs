//! API integration tests against a running server with a database

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000/api";

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
async fn test_record_visit_and_read_summary() {
    let client = Client::new();

    let response = client
        .post(format!("{}/visits", BASE_URL))
        .json(&json!({
            "client_name": "Integration Test",
            "contact": "9000000001",
            "visit_date": "2020-01-15",
            "start_time": "10:00",
            "end_time": "11:30",
            "artist": "Integration Artist",
            "services": [{"name": "Haircut", "price": 500}],
            "subtotal": 500,
            "final_total": 500,
            "payment_status": "success"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let visit: Value = response.json().await.expect("Failed to parse response");
    assert!(visit["id"].is_string());

    let response = client
        .get(format!("{}/analytics/summary?from=2020-01-15&to=2020-01-15", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_visits"].as_i64().unwrap() >= 1);
    assert!(body["total_revenue"].as_f64().unwrap() >= 500.0);
}

#[tokio::test]
#[ignore]
async fn test_employee_leaderboard_ranks() {
    let client = Client::new();

    let response = client
        .get(format!("{}/analytics/employees?from=2020-01-01&to=2030-12-31", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let ranks: Vec<i64> = body
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|e| e["rank"].as_i64().unwrap())
        .collect();
    assert_eq!(ranks, (1..=ranks.len() as i64).collect::<Vec<_>>());
}

#[tokio::test]
#[ignore]
async fn test_unknown_employee_is_all_zero() {
    let client = Client::new();

    let response = client
        .get(format!("{}/analytics/employee/Nobody%20At%20All", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Nobody At All");
    assert_eq!(body["rank"], 0);
    assert_eq!(body["visits"], 0);
}

#[tokio::test]
#[ignore]
async fn test_export_is_attachment() {
    let client = Client::new();

    let response = client
        .get(format!("{}/analytics/export?from=1990-01-01&to=1990-01-31", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("visits_1990-01-01_1990-01-31.xlsx"));

    let bytes = response.bytes().await.expect("Failed to read body");
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
#[ignore]
async fn test_repeat_customers_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/analytics/repeat-customers", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let total = body["total_customers"].as_i64().unwrap();
    let repeat = body["repeat_customers"].as_i64().unwrap();
    let new = body["new_customers"].as_i64().unwrap();
    assert_eq!(total, repeat + new);
}
