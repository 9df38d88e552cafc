//! # In-Memory Attendee Repository
//!
//! In-memory implementation of [`AttendeeRepository`] for testing.

use crate::domain::entities::{Attendee, AttendeeDetails};
use crate::domain::value_objects::AttendeeId;
use crate::infrastructure::persistence::in_memory::SharedTables;
use crate::infrastructure::persistence::traits::{AttendeeRepository, RepositoryResult};
use async_trait::async_trait;

/// In-memory implementation of [`AttendeeRepository`].
///
/// Deleting an attendee removes its registrations.
#[derive(Debug, Clone)]
pub struct InMemoryAttendeeRepository {
    tables: SharedTables,
}

impl InMemoryAttendeeRepository {
    pub(crate) fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl AttendeeRepository for InMemoryAttendeeRepository {
    async fn list(&self) -> RepositoryResult<Vec<Attendee>> {
        let tables = self.tables.read().await;
        let mut attendees: Vec<Attendee> = tables
            .attendees
            .iter()
            .map(|(id, details)| Attendee::new(*id, details.clone()))
            .collect();
        attendees.sort_by(|a, b| {
            a.details
                .last_name()
                .cmp(b.details.last_name())
                .then_with(|| a.details.first_name().cmp(b.details.first_name()))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(attendees)
    }

    async fn get(&self, id: AttendeeId) -> RepositoryResult<Option<Attendee>> {
        let tables = self.tables.read().await;
        Ok(tables.attendee(id))
    }

    async fn exists(&self, id: AttendeeId) -> RepositoryResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.attendees.contains_key(&id))
    }

    async fn create(&self, details: &AttendeeDetails) -> RepositoryResult<Attendee> {
        let mut tables = self.tables.write().await;
        let id = tables.next_attendee_id();
        tables.attendees.insert(id, details.clone());
        Ok(Attendee::new(id, details.clone()))
    }

    async fn update(
        &self,
        id: AttendeeId,
        details: &AttendeeDetails,
    ) -> RepositoryResult<Option<Attendee>> {
        let mut tables = self.tables.write().await;
        match tables.attendees.get_mut(&id) {
            Some(row) => {
                *row = details.clone();
                Ok(Some(Attendee::new(id, details.clone())))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: AttendeeId) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.attendees.remove(&id).is_none() {
            return Ok(false);
        }
        tables.registrations.retain(|key| key.attendee_id != id);
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::RegistrationKey;
    use crate::infrastructure::persistence::in_memory::{InMemoryStore, fixtures};
    use crate::infrastructure::persistence::traits::RegistrationRepository;

    #[tokio::test]
    async fn list_is_ordered_by_last_name() {
        let store = InMemoryStore::new();
        fixtures::attendee(&store, "Zed", "Young").await;
        fixtures::attendee(&store, "Amy", "Adams").await;

        let names: Vec<String> = store
            .attendees()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.details.full_name())
            .collect();
        assert_eq!(names, ["Amy Adams", "Zed Young"]);
    }

    #[tokio::test]
    async fn exists_tracks_lifecycle() {
        let store = InMemoryStore::new();
        let attendee = fixtures::attendee(&store, "A.", "Lee").await;
        let repo = store.attendees();

        assert!(repo.exists(attendee.id).await.unwrap());
        assert!(repo.delete(attendee.id).await.unwrap());
        assert!(!repo.exists(attendee.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_overwrites_email() {
        let store = InMemoryStore::new();
        let attendee = fixtures::attendee(&store, "A.", "Lee").await;
        let new = AttendeeDetails::new("A.", "Lee", "new@example.com").unwrap();

        let updated = store
            .attendees()
            .update(attendee.id, &new)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.details.email().as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn delete_cascades_registrations() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let event = fixtures::event(&store, venue.id, "Gala").await;
        let attendee = fixtures::attendee(&store, "A.", "Lee").await;
        store
            .registrations()
            .insert(RegistrationKey::new(event.id, attendee.id))
            .await
            .unwrap();

        store.attendees().delete(attendee.id).await.unwrap();
        assert_eq!(store.registrations().count().await.unwrap(), 0);
    }
}
