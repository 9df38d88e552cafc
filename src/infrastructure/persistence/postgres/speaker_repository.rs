//! # PostgreSQL Speaker Repository
//!
//! PostgreSQL implementation of [`SpeakerRepository`] over the `speakers` table.

use super::errors::{SPEAKER_EVENT_FK, store_error, violation};
use crate::domain::entities::{Speaker, SpeakerDetails, SpeakerListing};
use crate::domain::value_objects::{EventId, SpeakerId};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, SpeakerRepository,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

/// PostgreSQL implementation of [`SpeakerRepository`].
#[derive(Debug, Clone)]
pub struct PostgresSpeakerRepository {
    pool: PgPool,
}

impl PostgresSpeakerRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn write_error(err: sqlx::Error, details: &SpeakerDetails) -> RepositoryError {
    match (violation(&err), details.event_id()) {
        (Some(v), Some(event_id)) if v.is(SPEAKER_EVENT_FK) => {
            RepositoryError::missing_reference("Event", event_id)
        }
        _ => store_error(err),
    }
}

#[async_trait]
impl SpeakerRepository for PostgresSpeakerRepository {
    async fn list(&self) -> RepositoryResult<Vec<SpeakerListing>> {
        let rows: Vec<SpeakerListingRow> = sqlx::query_as(
            r#"
            SELECT s.speaker_id, s.first_name, s.last_name, s.specialization,
                   s.event_id, e.event_name, e.event_date
            FROM speakers s
            LEFT JOIN events e ON e.event_id = s.event_id
            ORDER BY s.last_name, s.first_name, s.speaker_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter()
            .map(SpeakerListingRow::try_into_listing)
            .collect()
    }

    async fn get(&self, id: SpeakerId) -> RepositoryResult<Option<SpeakerListing>> {
        let row: Option<SpeakerListingRow> = sqlx::query_as(
            r#"
            SELECT s.speaker_id, s.first_name, s.last_name, s.specialization,
                   s.event_id, e.event_name, e.event_date
            FROM speakers s
            LEFT JOIN events e ON e.event_id = s.event_id
            WHERE s.speaker_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(SpeakerListingRow::try_into_listing).transpose()
    }

    async fn find_by_event(&self, event_id: EventId) -> RepositoryResult<Vec<Speaker>> {
        let rows: Vec<SpeakerListingRow> = sqlx::query_as(
            r#"
            SELECT s.speaker_id, s.first_name, s.last_name, s.specialization,
                   s.event_id, e.event_name, e.event_date
            FROM speakers s
            JOIN events e ON e.event_id = s.event_id
            WHERE s.event_id = $1
            ORDER BY s.last_name, s.first_name, s.speaker_id
            "#,
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter()
            .map(|row| row.try_into_listing().map(|listing| listing.speaker))
            .collect()
    }

    async fn create(&self, details: &SpeakerDetails) -> RepositoryResult<Speaker> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO speakers (first_name, last_name, specialization, event_id)
            VALUES ($1, $2, $3, $4)
            RETURNING speaker_id
            "#,
        )
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.specialization())
        .bind(details.event_id().map(|id| id.get()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, details))?;

        Ok(Speaker::new(SpeakerId::new(id), details.clone()))
    }

    async fn update(
        &self,
        id: SpeakerId,
        details: &SpeakerDetails,
    ) -> RepositoryResult<Option<Speaker>> {
        let result = sqlx::query(
            r#"
            UPDATE speakers
            SET first_name = $1, last_name = $2, specialization = $3, event_id = $4
            WHERE speaker_id = $5
            "#,
        )
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.specialization())
        .bind(details.event_id().map(|id| id.get()))
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, details))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Speaker::new(id, details.clone())))
    }

    async fn delete(&self, id: SpeakerId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM speakers WHERE speaker_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Row type for speaker queries, with the assigned event if any.
#[derive(Debug, sqlx::FromRow)]
struct SpeakerListingRow {
    speaker_id: i64,
    first_name: String,
    last_name: String,
    specialization: String,
    event_id: Option<i64>,
    event_name: Option<String>,
    event_date: Option<NaiveDate>,
}

impl SpeakerListingRow {
    /// Converts the row into a SpeakerListing.
    fn try_into_listing(self) -> RepositoryResult<SpeakerListing> {
        let details = SpeakerDetails::new(
            &self.first_name,
            &self.last_name,
            &self.specialization,
            self.event_id.map(EventId::new),
        )
        .map_err(|e| RepositoryError::internal(format!("speaker {}: {e}", self.speaker_id)))?;

        Ok(SpeakerListing {
            speaker: Speaker::new(SpeakerId::new(self.speaker_id), details),
            event_name: self.event_name,
            event_date: self.event_date,
        })
    }
}
