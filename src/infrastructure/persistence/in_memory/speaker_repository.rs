//! # In-Memory Speaker Repository
//!
//! In-memory implementation of [`SpeakerRepository`] for testing.

use crate::domain::entities::{Speaker, SpeakerDetails, SpeakerListing};
use crate::domain::value_objects::{EventId, SpeakerId};
use crate::infrastructure::persistence::in_memory::SharedTables;
use crate::infrastructure::persistence::traits::{RepositoryResult, SpeakerRepository};
use async_trait::async_trait;
use std::cmp::Ordering;

/// In-memory implementation of [`SpeakerRepository`].
#[derive(Debug, Clone)]
pub struct InMemorySpeakerRepository {
    tables: SharedTables,
}

impl InMemorySpeakerRepository {
    pub(crate) fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

fn by_name(a: &Speaker, b: &Speaker) -> Ordering {
    a.details
        .last_name()
        .cmp(b.details.last_name())
        .then_with(|| a.details.first_name().cmp(b.details.first_name()))
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl SpeakerRepository for InMemorySpeakerRepository {
    async fn list(&self) -> RepositoryResult<Vec<SpeakerListing>> {
        let tables = self.tables.read().await;
        let mut speakers: Vec<SpeakerListing> = tables
            .speakers
            .keys()
            .filter_map(|id| tables.speaker_listing(*id))
            .collect();
        speakers.sort_by(|a, b| by_name(&a.speaker, &b.speaker));
        Ok(speakers)
    }

    async fn get(&self, id: SpeakerId) -> RepositoryResult<Option<SpeakerListing>> {
        let tables = self.tables.read().await;
        Ok(tables.speaker_listing(id))
    }

    async fn find_by_event(&self, event_id: EventId) -> RepositoryResult<Vec<Speaker>> {
        let tables = self.tables.read().await;
        let mut speakers: Vec<Speaker> = tables
            .speakers
            .iter()
            .filter(|(_, details)| details.event_id() == Some(event_id))
            .map(|(id, details)| Speaker::new(*id, details.clone()))
            .collect();
        speakers.sort_by(by_name);
        Ok(speakers)
    }

    async fn create(&self, details: &SpeakerDetails) -> RepositoryResult<Speaker> {
        let mut tables = self.tables.write().await;
        tables.check_event_ref(details.event_id())?;
        let id = tables.next_speaker_id();
        tables.speakers.insert(id, details.clone());
        Ok(Speaker::new(id, details.clone()))
    }

    async fn update(
        &self,
        id: SpeakerId,
        details: &SpeakerDetails,
    ) -> RepositoryResult<Option<Speaker>> {
        let mut tables = self.tables.write().await;
        if !tables.speakers.contains_key(&id) {
            return Ok(None);
        }
        tables.check_event_ref(details.event_id())?;
        tables.speakers.insert(id, details.clone());
        Ok(Some(Speaker::new(id, details.clone())))
    }

    async fn delete(&self, id: SpeakerId) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.speakers.remove(&id).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory::{InMemoryStore, fixtures};

    #[tokio::test]
    async fn unassigned_speaker_has_no_event_name() {
        let store = InMemoryStore::new();
        let details = SpeakerDetails::new("Grace", "Hopper", "Compilers", None).unwrap();
        let speaker = store.speakers().create(&details).await.unwrap();

        let listing = store.speakers().get(speaker.id).await.unwrap().unwrap();
        assert_eq!(listing.event_name, None);
        assert_eq!(listing.event_date, None);
    }

    #[tokio::test]
    async fn listing_carries_event_name() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let event = fixtures::event(&store, venue.id, "Launch Party").await;
        let details = SpeakerDetails::new("Ada", "Byron", "Math", Some(event.id)).unwrap();
        store.speakers().create(&details).await.unwrap();

        let listed = store.speakers().list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].event_name.as_deref(), Some("Launch Party"));
    }

    #[tokio::test]
    async fn create_with_missing_event_is_refused() {
        let store = InMemoryStore::new();
        let details = SpeakerDetails::new("Ada", "Byron", "Math", Some(EventId::new(8))).unwrap();
        let err = store.speakers().create(&details).await.unwrap_err();
        assert_eq!(err.missing_entity_type(), Some("Event"));
    }

    #[tokio::test]
    async fn find_by_event_filters_and_sorts() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Hall").await;
        let event = fixtures::event(&store, venue.id, "Gala").await;
        let repo = store.speakers();
        for last in ["Turing", "Lovelace"] {
            let details = SpeakerDetails::new("X", last, "", Some(event.id)).unwrap();
            repo.create(&details).await.unwrap();
        }
        repo.create(&SpeakerDetails::new("Y", "Free", "", None).unwrap())
            .await
            .unwrap();

        let found = repo.find_by_event(event.id).await.unwrap();
        let names: Vec<&str> = found.iter().map(|s| s.details.last_name()).collect();
        assert_eq!(names, ["Lovelace", "Turing"]);
    }

    #[tokio::test]
    async fn delete() {
        let store = InMemoryStore::new();
        let details = SpeakerDetails::new("Grace", "Hopper", "", None).unwrap();
        let speaker = store.speakers().create(&details).await.unwrap();

        assert!(store.speakers().delete(speaker.id).await.unwrap());
        assert!(!store.speakers().delete(speaker.id).await.unwrap());
    }
}
