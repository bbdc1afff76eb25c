//! Static booking form catalogue (artists, service types, staff, priced services)

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::visit::ServiceLine;

const ARTISTS: &[&str] = &["Priya", "Meera", "Kavya", "Rohan", "Sana"];

const SERVICE_TYPES: &[&str] = &["Hair", "Skin", "Nails", "Makeup", "Bridal"];

const STAFF: &[&str] = &["Reception", "Anil", "Deepa"];

/// (name, price in rupees)
const SERVICES: &[(&str, i64)] = &[
    ("Haircut", 500),
    ("Hair Spa", 1200),
    ("Hair Colour", 2500),
    ("Blow Dry", 400),
    ("Keratin Treatment", 4500),
    ("Facial", 1500),
    ("Cleanup", 800),
    ("Threading", 100),
    ("Waxing", 700),
    ("Manicure", 600),
    ("Pedicure", 800),
    ("Nail Art", 900),
    ("Party Makeup", 3000),
    ("Bridal Makeup", 15000),
];

/// Form data served to the booking frontend
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormData {
    pub artists: Vec<String>,
    pub service_types: Vec<String>,
    pub staff: Vec<String>,
    pub services: Vec<ServiceLine>,
}

static FORM_DATA: Lazy<FormData> = Lazy::new(|| FormData {
    artists: ARTISTS.iter().map(|s| s.to_string()).collect(),
    service_types: SERVICE_TYPES.iter().map(|s| s.to_string()).collect(),
    staff: STAFF.iter().map(|s| s.to_string()).collect(),
    services: SERVICES
        .iter()
        .map(|(name, price)| ServiceLine {
            name: name.to_string(),
            price: Decimal::from(*price),
        })
        .collect(),
});

/// The shared read-only catalogue
pub fn form_data() -> &'static FormData {
    &FORM_DATA
}
