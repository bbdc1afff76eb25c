//! Visit entry service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::visit::{CreateVisit, Visit},
    repository::Repository,
    services::analytics::{parse_local_date, DateRange},
};

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
}

impl VisitsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Visits in range, newest first
    pub async fn list(&self, range: DateRange) -> AppResult<Vec<Visit>> {
        let mut visits = self.repository.visits.list_in_range(range.from, range.to).await?;
        visits.reverse();
        Ok(visits)
    }

    /// Validate and store a visit record
    pub async fn create(&self, data: &CreateVisit) -> AppResult<Visit> {
        data.validate()?;
        let visit_date = parse_local_date(data.visit_date.trim())
            .ok_or_else(|| AppError::Validation("Invalid or missing visit_date".to_string()))?;

        let visit = self.repository.visits.create(data, visit_date).await?;
        tracing::info!("Recorded visit {} for artist {}", visit.id, visit.artist);
        Ok(visit)
    }
}
