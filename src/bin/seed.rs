//! Seed the visits table with sample data built from the form catalogue.
//!
//! Usage: `cargo run --bin seed -- [count]` (default 60 visits, spread over
//! the last 60 days).

use anyhow::Context;
use chrono::{Duration, Local};
use rust_decimal::Decimal;

use salon_server::{
    config::AppConfig,
    models::{
        catalog::form_data,
        visit::{CreateVisit, PaymentStatus, ServiceLine},
    },
    repository::{Database, Repository},
};

const CLIENTS: &[(&str, &str)] = &[
    ("Asha Rao", "9876500001"),
    ("Neha Kapoor", "9876500002"),
    ("Ritu Sharma", "9876500003"),
    ("Kiran Das", "9876500004"),
    ("Pooja Iyer", "9876500005"),
    ("Farah Khan", "9876500006"),
    ("Divya Menon", "9876500007"),
];

const SLOTS: &[(&str, &str)] = &[
    ("10:00", "11:00"),
    ("11:30", "12:15"),
    ("13:00", "14:30"),
    ("15:00", "15:45"),
    ("16:30", "18:00"),
];

/// Deterministic sample visit number `i`
fn sample_visit(i: usize) -> CreateVisit {
    let catalogue = form_data();
    let (client_name, contact) = CLIENTS[i % CLIENTS.len()];
    let (start, end) = SLOTS[i % SLOTS.len()];

    let services: Vec<ServiceLine> = (0..=(i % 2))
        .map(|offset| catalogue.services[(i * 3 + offset * 5) % catalogue.services.len()].clone())
        .collect();

    let subtotal: Decimal = services.iter().map(|s| s.price).sum();
    let discount_percent = if i % 4 == 0 { Decimal::from(10) } else { Decimal::ZERO };
    let discount_amount = (subtotal * discount_percent / Decimal::from(100)).round_dp(2);

    CreateVisit {
        client_name: client_name.to_string(),
        contact: contact.to_string(),
        age: Some(20 + (i % 30) as i32),
        gender: Some(if i % 5 == 0 { "M" } else { "F" }.to_string()),
        visit_date: (Local::now().date_naive() - Duration::days((i % 60) as i64)).to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        artist: catalogue.artists[i % catalogue.artists.len()].clone(),
        service_type: Some(catalogue.service_types[i % catalogue.service_types.len()].clone()),
        services,
        filled_by: Some(catalogue.staff[i % catalogue.staff.len()].clone()),
        subtotal,
        discount_percent,
        discount_amount,
        final_total: subtotal - discount_amount,
        payment_status: if i % 7 == 3 { PaymentStatus::Failed } else { PaymentStatus::Success },
        payment_id: Some(format!("pay_seed{:06}", i)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let count: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("count must be a positive integer")?,
        None => 60,
    };

    let config = AppConfig::load().context("Failed to load configuration")?;
    let repository = Repository::new(Database::new(config.database));

    for i in 0..count {
        let visit = sample_visit(i);
        let visit_date = visit
            .visit_date
            .parse()
            .context("sample visit date is not a valid date")?;
        repository
            .visits
            .create(&visit, visit_date)
            .await
            .with_context(|| format!("Failed to insert sample visit {}", i))?;
    }

    tracing::info!("Inserted {} sample visits", count);
    Ok(())
}
