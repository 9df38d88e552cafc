//! # PostgreSQL Persistence
//!
//! PostgreSQL implementations of the repository traits using sqlx.
//!
//! A [`Database`] owns the connection pool. It is opened once at process
//! start, handed to every repository, and closed at shutdown after the HTTP
//! server has drained.
//!
//! # Examples
//!
//! ```ignore
//! use event_manager::config::DatabaseConfig;
//! use event_manager::infrastructure::persistence::postgres::Database;
//!
//! let db = Database::connect(&config.database).await?;
//! db.migrate().await?;
//! let repositories = db.repositories();
//! // ...
//! db.close().await;
//! ```

mod errors;

pub mod attendee_repository;
pub mod event_repository;
pub mod registration_repository;
pub mod speaker_repository;
pub mod venue_repository;

pub use attendee_repository::PostgresAttendeeRepository;
pub use event_repository::PostgresEventRepository;
pub use registration_repository::PostgresRegistrationRepository;
pub use speaker_repository::PostgresSpeakerRepository;
pub use venue_repository::PostgresVenueRepository;

use crate::application::error::InfrastructureError;
use crate::config::DatabaseConfig;
use crate::infrastructure::persistence::Repositories;
use crate::infrastructure::persistence::traits::{RepositoryResult, StoreProbe};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

/// Handle to the PostgreSQL store.
///
/// Cloning yields another handle to the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Opens a connection pool and verifies one connection.
    ///
    /// # Errors
    ///
    /// Returns [`InfrastructureError::Database`] if no connection can be
    /// established within the configured timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| InfrastructureError::database(e.to_string()))?;

        tracing::info!(
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`InfrastructureError::Database`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| InfrastructureError::database(e.to_string()))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Bundles every repository over this pool.
    #[must_use]
    pub fn repositories(&self) -> Repositories {
        Repositories {
            venues: Arc::new(PostgresVenueRepository::new(self.pool.clone())),
            events: Arc::new(PostgresEventRepository::new(self.pool.clone())),
            speakers: Arc::new(PostgresSpeakerRepository::new(self.pool.clone())),
            attendees: Arc::new(PostgresAttendeeRepository::new(self.pool.clone())),
            registrations: Arc::new(PostgresRegistrationRepository::new(self.pool.clone())),
            probe: Arc::new(self.clone()),
        }
    }

    /// Closes every pooled connection.
    ///
    /// Waits for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[async_trait]
impl StoreProbe for Database {
    async fn ping(&self) -> RepositoryResult<()> {
        let (_one,): (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(errors::store_error)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
