//! # PostgreSQL Registration Repository
//!
//! PostgreSQL implementation of [`RegistrationRepository`] over the
//! `event_attendees` table.
//!
//! The table's primary key and foreign keys are authoritative: an insert
//! that loses a race against a concurrent duplicate, or against a delete of
//! either side, is refused by the database and classified here.

use super::errors::{
    REGISTRATION_ATTENDEE_FK, REGISTRATION_EVENT_FK, REGISTRATION_PKEY, Violation, store_error,
    violation,
};
use crate::domain::entities::RegistrationDetail;
use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
use crate::infrastructure::persistence::traits::{
    RegistrationRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

/// PostgreSQL implementation of [`RegistrationRepository`].
#[derive(Debug, Clone)]
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    /// Creates a new repository over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const DETAIL_SELECT: &str = r#"
    SELECT ea.event_id, e.event_name, e.event_date,
           ea.attendee_id, a.first_name, a.last_name, a.email
    FROM event_attendees ea
    JOIN events e ON e.event_id = ea.event_id
    JOIN attendees a ON a.attendee_id = ea.attendee_id
"#;

const DETAIL_ORDER: &str = "ORDER BY a.last_name, a.first_name, ea.event_id";

/// Classifies a failed insert of `key`.
fn insert_error(err: sqlx::Error, key: RegistrationKey) -> RepositoryError {
    match violation(&err) {
        Some(v @ Violation::Unique(_)) if v.is(REGISTRATION_PKEY) => {
            RepositoryError::duplicate("Registration", key)
        }
        Some(v) if v.is(REGISTRATION_EVENT_FK) => {
            RepositoryError::missing_reference("Event", key.event_id)
        }
        Some(v) if v.is(REGISTRATION_ATTENDEE_FK) => {
            RepositoryError::missing_reference("Attendee", key.attendee_id)
        }
        _ => store_error(err),
    }
}

async fn insert_row(conn: &mut PgConnection, key: RegistrationKey) -> RepositoryResult<()> {
    sqlx::query("INSERT INTO event_attendees (event_id, attendee_id) VALUES ($1, $2)")
        .bind(key.event_id.get())
        .bind(key.attendee_id.get())
        .execute(conn)
        .await
        .map_err(|e| insert_error(e, key))?;
    Ok(())
}

async fn delete_row(conn: &mut PgConnection, key: RegistrationKey) -> RepositoryResult<bool> {
    let result = sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND attendee_id = $2")
        .bind(key.event_id.get())
        .bind(key.attendee_id.get())
        .execute(conn)
        .await
        .map_err(store_error)?;
    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn list(&self) -> RepositoryResult<Vec<RegistrationDetail>> {
        let sql = format!("{DETAIL_SELECT} {DETAIL_ORDER}");
        let rows: Vec<RegistrationRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(RegistrationRow::into_detail).collect())
    }

    async fn find_by_event(&self, event_id: EventId) -> RepositoryResult<Vec<RegistrationDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE ea.event_id = $1 {DETAIL_ORDER}");
        let rows: Vec<RegistrationRow> = sqlx::query_as(&sql)
            .bind(event_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(RegistrationRow::into_detail).collect())
    }

    async fn find_by_attendee(
        &self,
        attendee_id: AttendeeId,
    ) -> RepositoryResult<Vec<RegistrationDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE ea.attendee_id = $1 {DETAIL_ORDER}");
        let rows: Vec<RegistrationRow> = sqlx::query_as(&sql)
            .bind(attendee_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(RegistrationRow::into_detail).collect())
    }

    async fn get(&self, key: RegistrationKey) -> RepositoryResult<Option<RegistrationDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE ea.event_id = $1 AND ea.attendee_id = $2");
        let row: Option<RegistrationRow> = sqlx::query_as(&sql)
            .bind(key.event_id.get())
            .bind(key.attendee_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(row.map(RegistrationRow::into_detail))
    }

    async fn exists(&self, key: RegistrationKey) -> RepositoryResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM event_attendees WHERE event_id = $1 AND attendee_id = $2
            )
            "#,
        )
        .bind(key.event_id.get())
        .bind(key.attendee_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(exists)
    }

    async fn insert(&self, key: RegistrationKey) -> RepositoryResult<()> {
        let mut conn = self.pool.acquire().await.map_err(store_error)?;
        insert_row(&mut conn, key).await
    }

    async fn replace(&self, from: RegistrationKey, to: RegistrationKey) -> RepositoryResult<bool> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        if !delete_row(&mut tx, from).await? {
            tx.rollback().await.map_err(store_error)?;
            return Ok(false);
        }
        // Dropping `tx` on error rolls the delete back.
        insert_row(&mut tx, to).await?;

        tx.commit().await.map_err(store_error)?;
        Ok(true)
    }

    async fn delete(&self, key: RegistrationKey) -> RepositoryResult<bool> {
        let mut conn = self.pool.acquire().await.map_err(store_error)?;
        delete_row(&mut conn, key).await
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM event_attendees")
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

        count_to_u64(count)
    }
}

fn count_to_u64(count: i64) -> RepositoryResult<u64> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::internal(format!("negative registration count {count}")))
}

/// Row type for joined registration queries.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    event_id: i64,
    event_name: String,
    event_date: NaiveDate,
    attendee_id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

impl RegistrationRow {
    /// Converts the row into a RegistrationDetail.
    fn into_detail(self) -> RegistrationDetail {
        RegistrationDetail {
            event_id: EventId::new(self.event_id),
            event_name: self.event_name,
            event_date: self.event_date,
            attendee_id: AttendeeId::new(self.attendee_id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}
