//! # PostgreSQL Event Repository
//!
//! PostgreSQL implementation of [`EventRepository`] over the `events` table.
//!
//! Listings join each event with its venue. Deletes rely on the schema's
//! `ON DELETE CASCADE` for registrations and `ON DELETE SET NULL` for
//! speakers.

use super::errors::{EVENT_VENUE_FK, store_error, violation};
use crate::domain::entities::{Event, EventDetails, EventListing};
use crate::domain::value_objects::{EventId, VenueId};
use crate::infrastructure::persistence::traits::{
    EventRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// PostgreSQL implementation of [`EventRepository`].
#[derive(Debug, Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(err: sqlx::Error, venue_id: VenueId) -> RepositoryError {
    match violation(&err) {
        Some(v) if v.is(EVENT_VENUE_FK) => RepositoryError::missing_reference("Venue", venue_id),
        _ => store_error(err),
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn list(&self) -> RepositoryResult<Vec<EventListing>> {
        let rows: Vec<EventListingRow> = sqlx::query_as(
            r#"
            SELECT e.event_id, e.event_name, e.event_date, e.event_description,
                   e.venue_id, v.venue_name, v.location, v.capacity
            FROM events e
            JOIN venues v ON v.venue_id = e.venue_id
            ORDER BY e.event_date DESC, e.event_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter()
            .map(EventListingRow::try_into_listing)
            .collect()
    }

    async fn get(&self, id: EventId) -> RepositoryResult<Option<EventListing>> {
        let row: Option<EventListingRow> = sqlx::query_as(
            r#"
            SELECT e.event_id, e.event_name, e.event_date, e.event_description,
                   e.venue_id, v.venue_name, v.location, v.capacity
            FROM events e
            JOIN venues v ON v.venue_id = e.venue_id
            WHERE e.event_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(EventListingRow::try_into_listing).transpose()
    }

    async fn exists(&self, id: EventId) -> RepositoryResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM events WHERE event_id = $1)")
                .bind(id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?;

        Ok(exists)
    }

    async fn create(&self, details: &EventDetails) -> RepositoryResult<Event> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO events (event_name, event_date, event_description, venue_id)
            VALUES ($1, $2, $3, $4)
            RETURNING event_id
            "#,
        )
        .bind(details.name())
        .bind(details.date())
        .bind(details.description())
        .bind(details.venue_id().get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, details.venue_id()))?;

        Ok(Event::new(EventId::new(id), details.clone()))
    }

    async fn update(
        &self,
        id: EventId,
        details: &EventDetails,
    ) -> RepositoryResult<Option<Event>> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET event_name = $1, event_date = $2, event_description = $3, venue_id = $4
            WHERE event_id = $5
            "#,
        )
        .bind(details.name())
        .bind(details.date())
        .bind(details.description())
        .bind(details.venue_id().get())
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, details.venue_id()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Event::new(id, details.clone())))
    }

    async fn delete(&self, id: EventId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Row type for event listing queries.
#[derive(Debug, sqlx::FromRow)]
struct EventListingRow {
    event_id: i64,
    event_name: String,
    event_date: NaiveDate,
    event_description: String,
    venue_id: i64,
    venue_name: String,
    location: String,
    capacity: i32,
}

impl EventListingRow {
    /// Converts the row into an EventListing.
    fn try_into_listing(self) -> RepositoryResult<EventListing> {
        let details = EventDetails::new(
            &self.event_name,
            self.event_date,
            &self.event_description,
            VenueId::new(self.venue_id),
        )
        .map_err(|e| RepositoryError::internal(format!("event {}: {e}", self.event_id)))?;

        Ok(EventListing {
            event: Event::new(EventId::new(self.event_id), details),
            venue_name: self.venue_name,
            location: self.location,
            capacity: self.capacity,
        })
    }
}
