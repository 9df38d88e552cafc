//! # PostgreSQL Venue Repository
//!
//! PostgreSQL implementation of [`VenueRepository`] over the `venues` table.

use super::errors::{EVENT_VENUE_FK, store_error, violation};
use crate::domain::entities::{Venue, VenueDetails};
use crate::domain::value_objects::VenueId;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VenueRepository,
};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of [`VenueRepository`].
#[derive(Debug, Clone)]
pub struct PostgresVenueRepository {
    pool: PgPool,
}

impl PostgresVenueRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for PostgresVenueRepository {
    async fn list(&self) -> RepositoryResult<Vec<Venue>> {
        let rows: Vec<VenueRow> = sqlx::query_as(
            r#"
            SELECT venue_id, venue_name, location, capacity
            FROM venues
            ORDER BY venue_name, venue_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(VenueRow::try_into_venue).collect()
    }

    async fn get(&self, id: VenueId) -> RepositoryResult<Option<Venue>> {
        let row: Option<VenueRow> = sqlx::query_as(
            r#"
            SELECT venue_id, venue_name, location, capacity
            FROM venues
            WHERE venue_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(VenueRow::try_into_venue).transpose()
    }

    async fn create(&self, details: &VenueDetails) -> RepositoryResult<Venue> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO venues (venue_name, location, capacity)
            VALUES ($1, $2, $3)
            RETURNING venue_id
            "#,
        )
        .bind(details.name())
        .bind(details.location())
        .bind(details.capacity())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(Venue::new(VenueId::new(id), details.clone()))
    }

    async fn update(
        &self,
        id: VenueId,
        details: &VenueDetails,
    ) -> RepositoryResult<Option<Venue>> {
        let result = sqlx::query(
            r#"
            UPDATE venues
            SET venue_name = $1, location = $2, capacity = $3
            WHERE venue_id = $4
            "#,
        )
        .bind(details.name())
        .bind(details.location())
        .bind(details.capacity())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Venue::new(id, details.clone())))
    }

    async fn delete(&self, id: VenueId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM venues WHERE venue_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(v) if v.is(EVENT_VENUE_FK) => RepositoryError::still_referenced("Venue", id),
                _ => store_error(e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Row type for venue queries.
#[derive(Debug, sqlx::FromRow)]
struct VenueRow {
    venue_id: i64,
    venue_name: String,
    location: String,
    capacity: i32,
}

impl VenueRow {
    /// Converts the row into a Venue.
    fn try_into_venue(self) -> RepositoryResult<Venue> {
        let details = VenueDetails::new(&self.venue_name, &self.location, self.capacity)
            .map_err(|e| RepositoryError::internal(format!("venue {}: {e}", self.venue_id)))?;
        Ok(Venue::new(VenueId::new(self.venue_id), details))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_venue() {
        let row = VenueRow {
            venue_id: 3,
            venue_name: "Main Hall".to_string(),
            location: "Corvallis, OR".to_string(),
            capacity: 250,
        };
        let venue = row.try_into_venue().unwrap();
        assert_eq!(venue.id, VenueId::new(3));
        assert_eq!(venue.details.capacity(), 250);
    }

    #[test]
    fn corrupt_row_is_internal_error() {
        let row = VenueRow {
            venue_id: 3,
            venue_name: " ".to_string(),
            location: "Corvallis, OR".to_string(),
            capacity: 250,
        };
        let err = row.try_into_venue().unwrap_err();
        assert!(matches!(err, RepositoryError::Internal(_)));
    }
}
