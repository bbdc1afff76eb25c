//! Salon booking, payments and analytics server
//!
//! REST JSON API backing the salon booking form and analytics dashboard:
//! Razorpay order and payment-link flows, a static form-data catalogue,
//! visit entry and range-scoped reports over stored visits.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::{Database, Repository};
use services::{
    payments::{PaymentProvider, PaymentsService},
    Services,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services from configuration. The database connects on first use.
    pub fn new(config: AppConfig) -> Self {
        let provider = PaymentProvider::razorpay(&config.razorpay);
        if provider.is_none() {
            tracing::warn!("Razorpay credentials missing, payment endpoints will answer 503");
        }
        let payments = PaymentsService::new(config.payment.clone(), provider);
        Self::with_payments(config, payments)
    }

    /// Wire services around an explicit payment service
    pub fn with_payments(config: AppConfig, payments: PaymentsService) -> Self {
        let repository = Repository::new(Database::new(config.database.clone()));
        Self {
            config: Arc::new(config),
            services: Arc::new(Services::new(repository, payments)),
        }
    }
}
