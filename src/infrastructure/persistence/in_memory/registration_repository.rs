//! # In-Memory Registration Repository
//!
//! In-memory implementation of [`RegistrationRepository`] for testing.
//!
//! Inserts enforce the same constraints as the `event_attendees` table:
//! both referenced rows must exist and the pair must be unique. Checks and
//! writes happen under one write lock, so two concurrent inserts of the
//! same pair cannot both succeed.

use crate::domain::entities::RegistrationDetail;
use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
use crate::infrastructure::persistence::in_memory::SharedTables;
use crate::infrastructure::persistence::traits::{RegistrationRepository, RepositoryResult};
use async_trait::async_trait;

/// In-memory implementation of [`RegistrationRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryRegistrationRepository {
    tables: SharedTables,
}

impl InMemoryRegistrationRepository {
    pub(crate) fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn list(&self) -> RepositoryResult<Vec<RegistrationDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.registration_details(|_| true))
    }

    async fn find_by_event(&self, event_id: EventId) -> RepositoryResult<Vec<RegistrationDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.registration_details(|key| key.event_id == event_id))
    }

    async fn find_by_attendee(
        &self,
        attendee_id: AttendeeId,
    ) -> RepositoryResult<Vec<RegistrationDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.registration_details(|key| key.attendee_id == attendee_id))
    }

    async fn get(&self, key: RegistrationKey) -> RepositoryResult<Option<RegistrationDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.registration_detail(key))
    }

    async fn exists(&self, key: RegistrationKey) -> RepositoryResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.registrations.contains(&key))
    }

    async fn insert(&self, key: RegistrationKey) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables.check_registration_insert(key)?;
        tables.registrations.insert(key);
        Ok(())
    }

    async fn replace(&self, from: RegistrationKey, to: RegistrationKey) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.registrations.remove(&from) {
            return Ok(false);
        }
        if let Err(e) = tables.check_registration_insert(to) {
            tables.registrations.insert(from);
            return Err(e);
        }
        tables.registrations.insert(to);
        Ok(true)
    }

    async fn delete(&self, key: RegistrationKey) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.registrations.remove(&key))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.registrations.len() as u64)
    }
}
