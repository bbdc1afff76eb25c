//! Visits repository

use chrono::NaiveDate;
use sqlx::types::Json;

use crate::{
    error::AppResult,
    models::visit::{CreateVisit, Visit},
};

use super::Database;

#[derive(Clone)]
pub struct VisitsRepository {
    db: Database,
}

impl VisitsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List visits whose date falls within `[from, to]`, both inclusive
    pub async fn list_in_range(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Visit>> {
        let pool = self.db.pool().await?;

        let rows = sqlx::query_as::<_, Visit>(
            r#"
            SELECT * FROM visits
            WHERE visit_date >= $1 AND visit_date <= $2
            ORDER BY visit_date, start_time, created_at
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Insert a visit. `visit_date` must already be parsed.
    pub async fn create(&self, data: &CreateVisit, visit_date: NaiveDate) -> AppResult<Visit> {
        let pool = self.db.pool().await?;

        let row = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (
                client_name, contact, age, gender, visit_date, start_time, end_time,
                artist, service_type, services, filled_by,
                subtotal, discount_percent, discount_amount, final_total,
                payment_status, payment_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(data.client_name.trim())
        .bind(data.contact.trim())
        .bind(data.age)
        .bind(&data.gender)
        .bind(visit_date)
        .bind(data.start_time.trim())
        .bind(data.end_time.trim())
        .bind(data.artist.trim())
        .bind(&data.service_type)
        .bind(Json(&data.services))
        .bind(&data.filled_by)
        .bind(data.subtotal)
        .bind(data.discount_percent)
        .bind(data.discount_amount)
        .bind(data.final_total)
        .bind(data.payment_status)
        .bind(&data.payment_id)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }
}
