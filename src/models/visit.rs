//! Visit model (one recorded salon appointment)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::Postgres, types::Json, Decode, Encode, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Loose phone/contact check: digits with optional leading `+`, spaces or dashes
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").unwrap());

/// One billed service line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceLine {
    /// Service name
    pub name: String,
    /// Price in rupees
    pub price: Decimal,
}

/// Payment outcome recorded on a visit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// SQLx conversion for PaymentStatus (stored as TEXT)
impl sqlx::Type<Postgres> for PaymentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for PaymentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for PaymentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Visit record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visit {
    pub id: Uuid,
    pub client_name: String,
    /// Phone number, used as the customer identity in analytics
    pub contact: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    /// Local calendar date of the visit
    pub visit_date: NaiveDate,
    /// Start time of day (HH:MM)
    pub start_time: String,
    /// End time of day (HH:MM)
    pub end_time: String,
    pub artist: String,
    pub service_type: Option<String>,
    #[schema(value_type = Vec<ServiceLine>)]
    pub services: Json<Vec<ServiceLine>>,
    pub filled_by: Option<String>,
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub final_total: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Visit {
    /// Minutes between start and end time, floored at zero.
    /// Unparseable times count as zero.
    pub fn worked_minutes(&self) -> i64 {
        match (parse_time_of_day(&self.start_time), parse_time_of_day(&self.end_time)) {
            (Some(start), Some(end)) => (end - start).num_minutes().max(0),
            _ => 0,
        }
    }
}

/// Parse `HH:MM` (or `HH:MM:SS`) into a time of day
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_time_of_day(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("time_of_day"))
    }
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::new("non_negative"))
    } else {
        Ok(())
    }
}

/// Create visit request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVisit {
    #[serde(default)]
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    #[serde(default)]
    #[validate(regex(path = *CONTACT_RE, message = "Invalid contact number"))]
    pub contact: String,
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    /// Visit date (YYYY-MM-DD)
    #[serde(default)]
    pub visit_date: String,
    /// Start time (HH:MM)
    #[serde(default)]
    #[validate(custom(function = "validate_time_of_day", message = "Invalid start time"))]
    pub start_time: String,
    /// End time (HH:MM)
    #[serde(default)]
    #[validate(custom(function = "validate_time_of_day", message = "Invalid end time"))]
    pub end_time: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Artist is required"))]
    pub artist: String,
    pub service_type: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
    pub filled_by: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_non_negative", message = "Subtotal must not be negative"))]
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_non_negative", message = "Final total must not be negative"))]
    pub final_total: Decimal,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
}

/// Date range query parameters shared by visit listing and analytics
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct RangeQuery {
    /// Start date, inclusive (YYYY-MM-DD or RFC 3339). Defaults to the first day of the current month.
    pub from: Option<String>,
    /// End date, inclusive (YYYY-MM-DD or RFC 3339). Defaults to today.
    pub to: Option<String>,
}
