//! # In-Memory Event Repository
//!
//! In-memory implementation of [`EventRepository`] for testing.

use crate::domain::entities::{Event, EventDetails, EventListing};
use crate::domain::value_objects::EventId;
use crate::infrastructure::persistence::in_memory::SharedTables;
use crate::infrastructure::persistence::traits::{EventRepository, RepositoryResult};
use async_trait::async_trait;

/// In-memory implementation of [`EventRepository`].
///
/// Deleting an event removes its registrations and unassigns its speakers,
/// matching the `ON DELETE` rules of the SQL schema.
#[derive(Debug, Clone)]
pub struct InMemoryEventRepository {
    tables: SharedTables,
}

impl InMemoryEventRepository {
    pub(crate) fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list(&self) -> RepositoryResult<Vec<EventListing>> {
        let tables = self.tables.read().await;
        let mut events: Vec<EventListing> = tables
            .events
            .keys()
            .filter_map(|id| tables.event_listing(*id))
            .collect();
        events.sort_by(|a, b| {
            b.event
                .details
                .date()
                .cmp(&a.event.details.date())
                .then_with(|| a.event.id.cmp(&b.event.id))
        });
        Ok(events)
    }

    async fn get(&self, id: EventId) -> RepositoryResult<Option<EventListing>> {
        let tables = self.tables.read().await;
        Ok(tables.event_listing(id))
    }

    async fn exists(&self, id: EventId) -> RepositoryResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.events.contains_key(&id))
    }

    async fn create(&self, details: &EventDetails) -> RepositoryResult<Event> {
        let mut tables = self.tables.write().await;
        tables.check_venue_ref(details.venue_id())?;
        let id = tables.next_event_id();
        tables.events.insert(id, details.clone());
        Ok(Event::new(id, details.clone()))
    }

    async fn update(
        &self,
        id: EventId,
        details: &EventDetails,
    ) -> RepositoryResult<Option<Event>> {
        let mut tables = self.tables.write().await;
        if !tables.events.contains_key(&id) {
            return Ok(None);
        }
        tables.check_venue_ref(details.venue_id())?;
        tables.events.insert(id, details.clone());
        Ok(Some(Event::new(id, details.clone())))
    }

    async fn delete(&self, id: EventId) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.events.remove(&id).is_none() {
            return Ok(false);
        }
        tables.registrations.retain(|key| key.event_id != id);
        for speaker in tables.speakers.values_mut() {
            if speaker.event_id() == Some(id) {
                *speaker = speaker.clone().unassigned();
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::SpeakerDetails;
    use crate::domain::value_objects::{RegistrationKey, VenueId};
    use crate::infrastructure::persistence::in_memory::{InMemoryStore, fixtures};
    use crate::infrastructure::persistence::traits::{
        RegistrationRepository, RepositoryError, SpeakerRepository,
    };

    #[tokio::test]
    async fn create_requires_existing_venue() {
        let store = InMemoryStore::new();
        let details =
            EventDetails::new("Orphan", fixtures::date(2025, 1, 1), "", VenueId::new(3)).unwrap();

        let err = store.events().create(&details).await.unwrap_err();
        assert_eq!(err.missing_entity_type(), Some("Venue"));
        assert!(store.events().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_joins_venue_and_orders_by_date_desc() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let repo = store.events();
        for (name, day) in [("Early", 1), ("Late", 20), ("Middle", 10)] {
            let details =
                EventDetails::new(name, fixtures::date(2025, 3, day), "", venue.id).unwrap();
            repo.create(&details).await.unwrap();
        }

        let listed = repo.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|e| e.event.details.name()).collect();
        assert_eq!(names, ["Late", "Middle", "Early"]);
        assert!(listed.iter().all(|e| e.venue_name == "Hall"));
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let details = EventDetails::new("X", fixtures::date(2025, 1, 1), "", venue.id).unwrap();
        assert!(
            store
                .events()
                .update(EventId::new(42), &details)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_to_missing_venue_is_refused() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let event = fixtures::event(&store, venue.id, "Gala").await;

        let moved =
            EventDetails::new("Gala", fixtures::date(2025, 1, 1), "", VenueId::new(77)).unwrap();
        let err = store.events().update(event.id, &moved).await.unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference { .. }));
    }

    #[tokio::test]
    async fn delete_cascades_and_unassigns() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let event = fixtures::event(&store, venue.id, "Gala").await;
        let attendee = fixtures::attendee(&store, "A.", "Lee").await;
        store
            .registrations()
            .insert(RegistrationKey::new(event.id, attendee.id))
            .await
            .unwrap();
        let speaker = store
            .speakers()
            .create(&SpeakerDetails::new("Ada", "Byron", "Math", Some(event.id)).unwrap())
            .await
            .unwrap();

        assert!(store.events().delete(event.id).await.unwrap());

        assert_eq!(store.registrations().count().await.unwrap(), 0);
        let speaker = store.speakers().get(speaker.id).await.unwrap().unwrap();
        assert_eq!(speaker.speaker.details.event_id(), None);
        assert!(!store.events().exists(event.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let store = InMemoryStore::new();
        assert!(!store.events().delete(EventId::new(1)).await.unwrap());
    }
}
