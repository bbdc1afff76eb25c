//! Razorpay REST client (orders and hosted payment links)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to payment provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
}

/// Order creation parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    /// Amount in the currency's minor unit
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderNotes {
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Payment link creation parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPaymentLink {
    pub amount: i64,
    pub currency: String,
    pub reference_id: String,
    pub description: String,
    pub customer: LinkCustomer,
    pub notify: LinkNotify,
    pub callback_url: String,
    pub callback_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkCustomer {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkNotify {
    pub sms: bool,
    pub email: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLink {
    pub id: String,
    pub short_url: String,
    pub amount: i64,
    pub currency: String,
}

/// Payment provider operations used by the payment service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, GatewayError>;

    async fn create_payment_link(&self, link: &NewPaymentLink) -> Result<PaymentLink, GatewayError>;
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// HTTP client authenticating with key id / secret (basic auth)
#[derive(Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    api_base: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(api_base: &str, key_id: String, key_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            key_id,
            key_secret,
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.error.description.or(body.error.code))
                .unwrap_or_else(|| {
                    if text.is_empty() {
                        status.to_string()
                    } else {
                        text
                    }
                });
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, GatewayError> {
        self.post("/orders", order).await
    }

    async fn create_payment_link(&self, link: &NewPaymentLink) -> Result<PaymentLink, GatewayError> {
        self.post("/payment_links", link).await
    }
}
