//! Repository layer for database operations

pub mod visits;

use std::{sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use tokio::sync::OnceCell;

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Lazily connected database handle shared by every request.
///
/// The first caller opens the pool and runs migrations; callers racing during
/// cold start wait on that same attempt. A failed attempt leaves the cell
/// empty so the next request tries again.
#[derive(Clone)]
pub struct Database {
    config: DatabaseConfig,
    pool: Arc<OnceCell<Pool<Postgres>>>,
}

impl Database {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: Arc::new(OnceCell::new()),
        }
    }

    /// Whether a connection has been established yet
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Get the pool, connecting on first use
    pub async fn pool(&self) -> AppResult<&Pool<Postgres>> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!("Connecting to database");
                let pool = PgPoolOptions::new()
                    .max_connections(self.config.max_connections)
                    .min_connections(self.config.min_connections)
                    .acquire_timeout(Duration::from_secs(self.config.acquire_timeout_secs))
                    .connect(&self.config.url)
                    .await
                    .map_err(|e| {
                        tracing::error!("Database connection failed: {}", e);
                        AppError::ServiceUnavailable(format!("Database unavailable: {}", e))
                    })?;

                sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
                    tracing::error!("Database migrations failed: {}", e);
                    AppError::ServiceUnavailable(format!("Database migrations failed: {}", e))
                })?;

                tracing::info!("Connected to database, migrations completed");
                Ok::<_, AppError>(pool)
            })
            .await
    }
}

/// Main repository struct holding the shared database handle
#[derive(Clone)]
pub struct Repository {
    pub db: Database,
    pub visits: visits::VisitsRepository,
}

impl Repository {
    /// Create a new repository over the given database handle
    pub fn new(db: Database) -> Self {
        Self {
            visits: visits::VisitsRepository::new(db.clone()),
            db,
        }
    }
}
