//! Payment service: amount handling, provider calls and signature verification

use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::{PaymentConfig, RazorpayConfig},
    error::{AppError, AppResult},
    models::payment::{
        CreateOrderResponse, CreatePaymentLinkResponse, PaymentRequest, VerifyOrderRequest,
        VerifyOrderResponse, VerifyPaymentLinkQuery, VerifyPaymentLinkResponse,
    },
    services::razorpay::{
        LinkCustomer, LinkNotify, NewOrder, NewPaymentLink, OrderNotes, PaymentGateway,
        RazorpayClient,
    },
};

type HmacSha256 = Hmac<Sha256>;

/// Credentials and client of a configured payment provider
#[derive(Clone)]
pub struct PaymentProvider {
    /// Public key handed to the checkout widget
    pub key_id: String,
    /// Signing secret, never sent to clients
    pub key_secret: String,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl PaymentProvider {
    /// Razorpay provider, or `None` when credentials are missing
    pub fn razorpay(config: &RazorpayConfig) -> Option<Self> {
        let (key_id, key_secret) = config.credentials()?;
        let client = RazorpayClient::new(&config.api_base, key_id.clone(), key_secret.clone());
        Some(Self {
            key_id,
            key_secret,
            gateway: Arc::new(client),
        })
    }
}

#[derive(Clone)]
pub struct PaymentsService {
    config: PaymentConfig,
    provider: Option<PaymentProvider>,
}

impl PaymentsService {
    /// Without a provider every payment operation answers 503
    pub fn new(config: PaymentConfig, provider: Option<PaymentProvider>) -> Self {
        Self { config, provider }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> AppResult<&PaymentProvider> {
        self.provider.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("Payment gateway is not configured".to_string())
        })
    }

    /// Validate customer fields and convert the rupee amount to paise
    fn checked_amount(&self, request: &PaymentRequest) -> AppResult<i64> {
        request.validate()?;
        let amount = request
            .amount
            .as_ref()
            .ok_or_else(|| AppError::Validation("Amount is required".to_string()))?;
        to_paise(amount, self.config.min_amount_rupees)
    }

    /// Create a provider order for client-side checkout
    pub async fn create_order(&self, request: &PaymentRequest) -> AppResult<CreateOrderResponse> {
        let provider = self.provider()?;
        let amount = self.checked_amount(request)?;

        let receipt = format!("rcpt_{}", &Uuid::new_v4().simple().to_string()[..16]);
        let order = NewOrder {
            amount,
            currency: self.config.currency.clone(),
            receipt: receipt.clone(),
            notes: OrderNotes {
                customer_name: request.name.trim().to_string(),
                customer_phone: request.phone.trim().to_string(),
            },
        };

        let created = provider.gateway.create_order(&order).await?;
        tracing::info!("Created order {} for {} paise", created.id, created.amount);

        Ok(CreateOrderResponse {
            order_id: created.id,
            amount: created.amount,
            currency: created.currency,
            key_id: provider.key_id.clone(),
            receipt: created.receipt.unwrap_or(receipt),
        })
    }

    /// Verify the checkout signature for an order payment
    pub fn verify_order_payment(&self, request: &VerifyOrderRequest) -> AppResult<VerifyOrderResponse> {
        let provider = self.provider()?;

        if request.razorpay_order_id.is_empty()
            || request.razorpay_payment_id.is_empty()
            || request.razorpay_signature.is_empty()
        {
            return Err(AppError::Validation(
                "razorpay_order_id, razorpay_payment_id and razorpay_signature are required".to_string(),
            ));
        }

        let payload = order_signature_payload(&request.razorpay_order_id, &request.razorpay_payment_id);
        if !verify_signature(&provider.key_secret, &payload, &request.razorpay_signature) {
            return Err(AppError::SignatureMismatch("Invalid payment signature".to_string()));
        }

        tracing::info!(
            "Verified payment {} for order {}",
            request.razorpay_payment_id,
            request.razorpay_order_id
        );

        Ok(VerifyOrderResponse {
            verified: true,
            order_id: request.razorpay_order_id.clone(),
            payment_id: request.razorpay_payment_id.clone(),
        })
    }

    /// Create a hosted payment link that redirects to the configured callback
    pub async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> AppResult<CreatePaymentLinkResponse> {
        let provider = self.provider()?;
        let amount = self.checked_amount(request)?;

        let reference_id = format!("ref_{}", &Uuid::new_v4().simple().to_string()[..16]);
        let link = NewPaymentLink {
            amount,
            currency: self.config.currency.clone(),
            reference_id: reference_id.clone(),
            description: request
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "Salon services".to_string()),
            customer: LinkCustomer {
                name: request.name.trim().to_string(),
                contact: request.phone.trim().to_string(),
            },
            notify: LinkNotify { sms: true, email: false },
            callback_url: self.config.callback_url.clone(),
            callback_method: "get".to_string(),
        };

        let created = provider.gateway.create_payment_link(&link).await?;
        tracing::info!("Created payment link {} for {} paise", created.id, created.amount);

        Ok(CreatePaymentLinkResponse {
            payment_link_id: created.id,
            short_url: created.short_url,
            amount: created.amount,
            currency: created.currency,
            reference_id,
        })
    }

    /// Verify the redirect signature of a payment link callback
    pub fn verify_payment_link(
        &self,
        query: &VerifyPaymentLinkQuery,
    ) -> AppResult<VerifyPaymentLinkResponse> {
        let provider = self.provider()?;

        if query.razorpay_payment_id.is_empty()
            || query.razorpay_payment_link_id.is_empty()
            || query.razorpay_payment_link_status.is_empty()
            || query.razorpay_signature.is_empty()
        {
            return Err(AppError::Validation(
                "Missing payment link callback parameters".to_string(),
            ));
        }

        let payload = link_signature_payload(
            &query.razorpay_payment_link_id,
            &query.razorpay_payment_link_reference_id,
            &query.razorpay_payment_link_status,
            &query.razorpay_payment_id,
        );
        if !verify_signature(&provider.key_secret, &payload, &query.razorpay_signature) {
            return Err(AppError::SignatureMismatch("Invalid payment signature".to_string()));
        }

        tracing::info!(
            "Verified payment {} for link {} ({})",
            query.razorpay_payment_id,
            query.razorpay_payment_link_id,
            query.razorpay_payment_link_status
        );

        Ok(VerifyPaymentLinkResponse {
            verified: true,
            payment_id: query.razorpay_payment_id.clone(),
            payment_link_id: query.razorpay_payment_link_id.clone(),
            status: query.razorpay_payment_link_status.clone(),
        })
    }
}

/// Convert a rupee amount (JSON number or numeric string) to paise
pub fn to_paise(amount: &serde_json::Value, min_rupees: u32) -> AppResult<i64> {
    let rupees = match amount {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .ok_or_else(|| AppError::Validation("Amount must be a number".to_string()))?;

    if rupees < f64::from(min_rupees) {
        return Err(AppError::Validation(format!(
            "Amount must be at least {} rupee(s)",
            min_rupees
        )));
    }

    let paise = (rupees * 100.0).round();
    if paise > i64::MAX as f64 {
        return Err(AppError::Validation("Amount is too large".to_string()));
    }
    Ok(paise as i64)
}

/// `order_id|payment_id`
pub fn order_signature_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// `link_id|reference_id|status|payment_id`
pub fn link_signature_payload(
    link_id: &str,
    reference_id: &str,
    status: &str,
    payment_id: &str,
) -> String {
    format!("{}|{}|{}|{}", link_id, reference_id, status, payment_id)
}

/// Hex-encoded HMAC-SHA256 of `payload`
pub fn sign(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time check of a hex signature against `payload`
pub fn verify_signature(secret: &str, payload: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
