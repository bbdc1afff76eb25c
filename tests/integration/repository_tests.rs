//! Repository tests against a throwaway Postgres container (requires Docker)

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use salon_server::{
    config::DatabaseConfig,
    models::visit::{CreateVisit, PaymentStatus, ServiceLine},
    repository::{Database, Repository},
    services::analytics,
};

/// Start Postgres and point a lazily connected repository at it.
/// The container must outlive the repository.
async fn start_postgres() -> (ContainerAsync<Postgres>, Repository) {
    let container = Postgres::default()
        .with_user("salon_test")
        .with_password("salon_test_password")
        .with_db_name("salon_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get container host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let config = DatabaseConfig {
        url: format!("postgres://salon_test:salon_test_password@{host}:{port}/salon_test"),
        max_connections: 5,
        min_connections: 1,
        acquire_timeout_secs: 30,
    };

    (container, Repository::new(Database::new(config)))
}

fn visit_on(day: NaiveDate, contact: &str, final_total: i64) -> CreateVisit {
    let total = Decimal::from(final_total);
    CreateVisit {
        client_name: format!("Client {contact}"),
        contact: contact.to_string(),
        age: None,
        gender: None,
        visit_date: day.to_string(),
        start_time: "10:00".to_string(),
        end_time: "11:00".to_string(),
        artist: "Priya".to_string(),
        service_type: Some("Hair".to_string()),
        services: vec![ServiceLine {
            name: "Haircut".to_string(),
            price: total,
        }],
        filled_by: None,
        subtotal: total,
        discount_percent: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        final_total: total,
        payment_status: PaymentStatus::Success,
        payment_id: None,
    }
}

#[tokio::test]
async fn test_range_includes_both_ends_only() {
    let (_container, repository) = start_postgres().await;

    let from = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let to = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    let seeded = [
        (from - Duration::days(1), "9000000001", 100),
        (from, "9000000002", 250),
        (to, "9000000003", 400),
        (to + Duration::days(1), "9000000004", 800),
    ];
    for (day, contact, total) in seeded {
        repository
            .visits
            .create(&visit_on(day, contact, total), day)
            .await
            .expect("Failed to insert visit");
    }
    assert!(repository.db.is_connected());

    let visits = repository.visits.list_in_range(from, to).await.unwrap();
    let dates: Vec<NaiveDate> = visits.iter().map(|v| v.visit_date).collect();
    assert_eq!(dates, vec![from, to]);

    let summary = analytics::summary(&visits);
    assert_eq!(summary.total_revenue, Decimal::from(650));
    assert_eq!(summary.total_visits, 2);
    assert_eq!(summary.unique_customers, 2);
    assert_eq!(summary.avg_ticket, 325);
}

#[tokio::test]
async fn test_single_day_range_and_stored_fields() {
    let (_container, repository) = start_postgres().await;

    let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    repository
        .visits
        .create(&visit_on(day, "9000000010", 500), day)
        .await
        .unwrap();
    repository
        .visits
        .create(&visit_on(day + Duration::days(1), "9000000011", 700), day + Duration::days(1))
        .await
        .unwrap();

    let visits = repository.visits.list_in_range(day, day).await.unwrap();
    assert_eq!(visits.len(), 1);

    let stored = &visits[0];
    assert_eq!(stored.contact, "9000000010");
    assert_eq!(stored.final_total, Decimal::from(500));
    assert_eq!(stored.payment_status, PaymentStatus::Success);
    assert_eq!(stored.services.0.len(), 1);
    assert_eq!(stored.services.0[0].name, "Haircut");

    let empty = repository
        .visits
        .list_in_range(day + Duration::days(5), day + Duration::days(6))
        .await
        .unwrap();
    assert!(empty.is_empty());
}
