//! Business logic services

pub mod analytics;
pub mod export;
pub mod payments;
pub mod razorpay;
pub mod visits;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub analytics: analytics::AnalyticsService,
    pub payments: payments::PaymentsService,
    pub visits: visits::VisitsService,
    pub repository: Repository,
}

impl Services {
    /// Create all services over the given repository and payment service
    pub fn new(repository: Repository, payments: payments::PaymentsService) -> Self {
        Self {
            analytics: analytics::AnalyticsService::new(repository.clone()),
            visits: visits::VisitsService::new(repository.clone()),
            payments,
            repository,
        }
    }
}
