//! Payment request and response payloads

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Customer and amount for either payment flow
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PaymentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    /// Amount in rupees (number or numeric string)
    #[schema(value_type = f64)]
    pub amount: Option<serde_json::Value>,
    /// Shown on the hosted payment page (link flow only)
    pub description: Option<String>,
}

/// Order handle for client-side checkout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub order_id: String,
    /// Amount in paise
    pub amount: i64,
    pub currency: String,
    /// Public key for the checkout widget
    pub key_id: String,
    pub receipt: String,
}

/// Checkout callback fields for the order flow
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyOrderRequest {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOrderResponse {
    pub verified: bool,
    pub order_id: String,
    pub payment_id: String,
}

/// Hosted payment link
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentLinkResponse {
    pub payment_link_id: String,
    pub short_url: String,
    /// Amount in paise
    pub amount: i64,
    pub currency: String,
    pub reference_id: String,
}

/// Redirect query parameters for the link flow
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct VerifyPaymentLinkQuery {
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_payment_link_id: String,
    #[serde(default)]
    pub razorpay_payment_link_reference_id: String,
    #[serde(default)]
    pub razorpay_payment_link_status: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentLinkResponse {
    pub verified: bool,
    pub payment_id: String,
    pub payment_link_id: String,
    /// Link status reported by the provider (e.g. "paid")
    pub status: String,
}
