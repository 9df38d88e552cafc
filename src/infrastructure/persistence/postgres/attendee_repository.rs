//! # PostgreSQL Attendee Repository
//!
//! PostgreSQL implementation of [`AttendeeRepository`] over the `attendees` table.

use super::errors::store_error;
use crate::domain::entities::{Attendee, AttendeeDetails};
use crate::domain::value_objects::AttendeeId;
use crate::infrastructure::persistence::traits::{
    AttendeeRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of [`AttendeeRepository`].
///
/// Registrations of a deleted attendee are removed by `ON DELETE CASCADE`.
#[derive(Debug, Clone)]
pub struct PostgresAttendeeRepository {
    pool: PgPool,
}

impl PostgresAttendeeRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeeRepository for PostgresAttendeeRepository {
    async fn list(&self) -> RepositoryResult<Vec<Attendee>> {
        let rows: Vec<AttendeeRow> = sqlx::query_as(
            r#"
            SELECT attendee_id, first_name, last_name, email
            FROM attendees
            ORDER BY last_name, first_name, attendee_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(AttendeeRow::try_into_attendee).collect()
    }

    async fn get(&self, id: AttendeeId) -> RepositoryResult<Option<Attendee>> {
        let row: Option<AttendeeRow> = sqlx::query_as(
            r#"
            SELECT attendee_id, first_name, last_name, email
            FROM attendees
            WHERE attendee_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(AttendeeRow::try_into_attendee).transpose()
    }

    async fn exists(&self, id: AttendeeId) -> RepositoryResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM attendees WHERE attendee_id = $1)")
                .bind(id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?;

        Ok(exists)
    }

    async fn create(&self, details: &AttendeeDetails) -> RepositoryResult<Attendee> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO attendees (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING attendee_id
            "#,
        )
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.email().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(Attendee::new(AttendeeId::new(id), details.clone()))
    }

    async fn update(
        &self,
        id: AttendeeId,
        details: &AttendeeDetails,
    ) -> RepositoryResult<Option<Attendee>> {
        let result = sqlx::query(
            r#"
            UPDATE attendees
            SET first_name = $1, last_name = $2, email = $3
            WHERE attendee_id = $4
            "#,
        )
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.email().as_str())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Attendee::new(id, details.clone())))
    }

    async fn delete(&self, id: AttendeeId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM attendees WHERE attendee_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Row type for attendee queries.
#[derive(Debug, sqlx::FromRow)]
struct AttendeeRow {
    attendee_id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

impl AttendeeRow {
    /// Converts the row into an Attendee.
    fn try_into_attendee(self) -> RepositoryResult<Attendee> {
        let details = AttendeeDetails::new(&self.first_name, &self.last_name, &self.email)
            .map_err(|e| {
                RepositoryError::internal(format!("attendee {}: {e}", self.attendee_id))
            })?;
        Ok(Attendee::new(AttendeeId::new(self.attendee_id), details))
    }
}
