//! Router tests driving the axum app in-process (no database, stub payment gateway)

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use salon_server::{
    api::create_router,
    config::{AppConfig, PaymentConfig},
    services::{
        payments::{sign, PaymentProvider, PaymentsService},
        razorpay::{GatewayError, NewOrder, NewPaymentLink, Order, PaymentGateway, PaymentLink},
    },
    AppState,
};

const SECRET: &str = "router_test_secret";

/// Echoes requests back as created resources
struct StubGateway;

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, GatewayError> {
        Ok(Order {
            id: "order_stub".to_string(),
            amount: order.amount,
            currency: order.currency.clone(),
            receipt: Some(order.receipt.clone()),
        })
    }

    async fn create_payment_link(&self, link: &NewPaymentLink) -> Result<PaymentLink, GatewayError> {
        Ok(PaymentLink {
            id: "plink_stub".to_string(),
            short_url: "https://rzp.io/i/stub".to_string(),
            amount: link.amount,
            currency: link.currency.clone(),
        })
    }
}

/// Rejects everything the way the provider does for bad credentials
struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn create_order(&self, _order: &NewOrder) -> Result<Order, GatewayError> {
        Err(GatewayError::Api {
            status: 401,
            message: "Authentication failed".to_string(),
        })
    }

    async fn create_payment_link(&self, _link: &NewPaymentLink) -> Result<PaymentLink, GatewayError> {
        Err(GatewayError::Api {
            status: 401,
            message: "Authentication failed".to_string(),
        })
    }
}

fn app_with(gateway: Option<Arc<dyn PaymentGateway>>) -> Router {
    let provider = gateway.map(|gateway| PaymentProvider {
        key_id: "rzp_test_router".to_string(),
        key_secret: SECRET.to_string(),
        gateway,
    });
    let payments = PaymentsService::new(PaymentConfig::default(), provider);
    create_router(AppState::with_payments(AppConfig::default(), payments))
}

fn app() -> Router {
    app_with(Some(Arc::new(StubGateway)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_does_not_connect() {
    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "not_connected");
    assert_eq!(body["payments"], "configured");
}

#[tokio::test]
async fn test_form_data() {
    let (status, body) = send(app(), get("/api/form-data")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["artists"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(body["services"][0]["price"].is_number());
}

#[tokio::test]
async fn test_responses_are_gzipped_on_request() {
    let request = Request::builder()
        .uri("/api/form-data")
        .header("accept-encoding", "gzip")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-encoding"], "gzip");
}

#[tokio::test]
async fn test_create_order_returns_paise() {
    let request = post_json(
        "/api/create-order",
        json!({"name": "Asha", "phone": "9876543210", "amount": 1234.5}),
    );
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_id"], "order_stub");
    assert_eq!(body["amount"], 123450);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["key_id"], "rzp_test_router");
}

#[tokio::test]
async fn test_create_order_rejects_bad_input() {
    let cases = [
        json!({"name": "Asha", "phone": "9876543210", "amount": 0.5}),
        json!({"name": "Asha", "phone": "9876543210", "amount": "abc"}),
        json!({"name": "Asha", "phone": "9876543210"}),
        json!({"phone": "9876543210", "amount": 500}),
        json!({"name": "Asha", "amount": 500}),
    ];
    for case in cases {
        let (status, body) = send(app(), post_json("/api/create-order", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_malformed_bodies_are_400_with_error_body() {
    let cases = [
        ("/api/create-order", json!({"name": null, "phone": "9876543210", "amount": 500})),
        ("/api/create-order", json!({"name": 42, "phone": "9876543210", "amount": 500})),
        ("/api/create-payment-link", json!({"name": "Asha", "phone": ["98"], "amount": 500})),
        ("/api/verify-order-payment", json!({"razorpay_order_id": 7})),
        ("/api/visits", json!({"client_name": "Asha", "age": "x"})),
    ];
    for (uri, case) in cases {
        let (status, body) = send(app(), post_json(uri, case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {case}");
        assert_eq!(body["error"], "BadValue", "{uri} {case}");
        assert!(body["message"].is_string());
    }

    let not_json = Request::builder()
        .method("POST")
        .uri("/api/create-order")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send(app(), not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/create-order")
        .body(Body::from(
            json!({"name": "Asha", "phone": "9876543210", "amount": 500}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(app(), no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_provider_failure_is_500_with_message() {
    let request = post_json(
        "/api/create-order",
        json!({"name": "Asha", "phone": "9876543210", "amount": 500}),
    );
    let (status, body) = send(app_with(Some(Arc::new(FailingGateway))), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("Authentication failed"));
}

#[tokio::test]
async fn test_verify_order_payment() {
    let signature = sign(SECRET, "order_stub|pay_123");
    let request = post_json(
        "/api/verify-order-payment",
        json!({
            "razorpay_order_id": "order_stub",
            "razorpay_payment_id": "pay_123",
            "razorpay_signature": signature
        }),
    );
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], true);

    let request = post_json(
        "/api/verify-order-payment",
        json!({
            "razorpay_order_id": "order_stub",
            "razorpay_payment_id": "pay_124",
            "razorpay_signature": signature
        }),
    );
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "SignatureMismatch");
}

#[tokio::test]
async fn test_payment_link_flow() {
    let request = post_json(
        "/api/create-payment-link",
        json!({"name": "Asha", "phone": "9876543210", "amount": "750"}),
    );
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["short_url"], "https://rzp.io/i/stub");
    assert_eq!(body["amount"], 75000);

    let reference = body["reference_id"].as_str().unwrap().to_string();
    let signature = sign(SECRET, &format!("plink_stub|{}|paid|pay_9", reference));
    let uri = format!(
        "/api/verify-payment?razorpay_payment_id=pay_9&razorpay_payment_link_id=plink_stub\
         &razorpay_payment_link_reference_id={}&razorpay_payment_link_status=paid\
         &razorpay_signature={}",
        reference, signature
    );
    let (status, body) = send(app(), get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paid");

    let tampered = uri.replace("status=paid", "status=pair");
    let (status, _) = send(app(), get(&tampered)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payments_unavailable_without_credentials() {
    let request = post_json(
        "/api/create-order",
        json!({"name": "Asha", "phone": "9876543210", "amount": 500}),
    );
    let (status, _) = send(app_with(None), request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(app_with(None), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payments"], "not_configured");
}

#[tokio::test]
async fn test_analytics_rejects_invalid_dates() {
    let (status, _) = send(app(), get("/api/analytics/summary?from=31-12-2024")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app(), get("/api/analytics/employees?from=2024-06-01&to=2024-05-01")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
