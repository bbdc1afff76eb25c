//! API handlers for the salon REST endpoints

pub mod analytics;
pub mod form_data;
pub mod health;
pub mod openapi;
pub mod payments;
pub mod visits;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections are reported as `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor whose rejections are reported as `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let analytics_routes = Router::new()
        .route("/summary", get(analytics::get_summary))
        .route("/top-services", get(analytics::get_top_services))
        .route("/employees", get(analytics::get_employees))
        .route("/employee/:name", get(analytics::get_employee))
        .route("/repeat-customers", get(analytics::get_repeat_customers))
        .route("/export", get(analytics::export_visits));

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Booking form catalogue
        .route("/form-data", get(form_data::get_form_data))
        // Payments (order flow)
        .route("/create-order", post(payments::create_order))
        .route("/verify-order-payment", post(payments::verify_order_payment))
        // Payments (link flow)
        .route("/create-payment-link", post(payments::create_payment_link))
        .route("/verify-payment", get(payments::verify_payment))
        // Visits
        .route("/visits", get(visits::list_visits).post(visits::create_visit))
        // Analytics
        .nest("/analytics", analytics_routes)
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
