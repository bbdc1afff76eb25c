//! Payment endpoints (Razorpay order and payment-link flows)

use axum::{extract::State, Json};

use super::{AppJson, AppQuery};
use crate::{
    error::AppResult,
    models::payment::{
        CreateOrderResponse, CreatePaymentLinkResponse, PaymentRequest, VerifyOrderRequest,
        VerifyOrderResponse, VerifyPaymentLinkQuery, VerifyPaymentLinkResponse,
    },
};

/// Create an order for embedded checkout
#[utoipa::path(
    post,
    path = "/create-order",
    tag = "payments",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Missing fields or invalid amount", body = crate::error::ErrorResponse),
        (status = 500, description = "Payment provider error", body = crate::error::ErrorResponse),
        (status = 503, description = "Payments not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<PaymentRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let order = state.services.payments.create_order(&request).await?;
    Ok(Json(order))
}

/// Verify the checkout signature of an order payment
#[utoipa::path(
    post,
    path = "/verify-order-payment",
    tag = "payments",
    request_body = VerifyOrderRequest,
    responses(
        (status = 200, description = "Signature valid", body = VerifyOrderResponse),
        (status = 400, description = "Missing fields or signature mismatch", body = crate::error::ErrorResponse),
        (status = 503, description = "Payments not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn verify_order_payment(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<VerifyOrderRequest>,
) -> AppResult<Json<VerifyOrderResponse>> {
    let verified = state.services.payments.verify_order_payment(&request)?;
    Ok(Json(verified))
}

/// Create a hosted payment link
#[utoipa::path(
    post,
    path = "/create-payment-link",
    tag = "payments",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment link created", body = CreatePaymentLinkResponse),
        (status = 400, description = "Missing fields or invalid amount", body = crate::error::ErrorResponse),
        (status = 500, description = "Payment provider error", body = crate::error::ErrorResponse),
        (status = 503, description = "Payments not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_payment_link(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<PaymentRequest>,
) -> AppResult<Json<CreatePaymentLinkResponse>> {
    let link = state.services.payments.create_payment_link(&request).await?;
    Ok(Json(link))
}

/// Verify the redirect of a payment link
#[utoipa::path(
    get,
    path = "/verify-payment",
    tag = "payments",
    params(VerifyPaymentLinkQuery),
    responses(
        (status = 200, description = "Signature valid", body = VerifyPaymentLinkResponse),
        (status = 400, description = "Missing parameters or signature mismatch", body = crate::error::ErrorResponse),
        (status = 503, description = "Payments not configured", body = crate::error::ErrorResponse)
    )
)]
pub async fn verify_payment(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<VerifyPaymentLinkQuery>,
) -> AppResult<Json<VerifyPaymentLinkResponse>> {
    let verified = state.services.payments.verify_payment_link(&query)?;
    Ok(Json(verified))
}
