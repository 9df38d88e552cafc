//! # In-Memory Venue Repository
//!
//! In-memory implementation of [`VenueRepository`] for testing.

use crate::domain::entities::{Venue, VenueDetails};
use crate::domain::value_objects::VenueId;
use crate::infrastructure::persistence::in_memory::SharedTables;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VenueRepository,
};
use async_trait::async_trait;

/// In-memory implementation of [`VenueRepository`].
///
/// Obtained from [`InMemoryStore::venues`](super::InMemoryStore::venues).
#[derive(Debug, Clone)]
pub struct InMemoryVenueRepository {
    tables: SharedTables,
}

impl InMemoryVenueRepository {
    pub(crate) fn new(tables: SharedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn list(&self) -> RepositoryResult<Vec<Venue>> {
        let tables = self.tables.read().await;
        let mut venues: Vec<Venue> = tables
            .venues
            .iter()
            .map(|(id, details)| Venue::new(*id, details.clone()))
            .collect();
        venues.sort_by(|a, b| {
            a.details
                .name()
                .cmp(b.details.name())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(venues)
    }

    async fn get(&self, id: VenueId) -> RepositoryResult<Option<Venue>> {
        let tables = self.tables.read().await;
        Ok(tables.venue(id))
    }

    async fn create(&self, details: &VenueDetails) -> RepositoryResult<Venue> {
        let mut tables = self.tables.write().await;
        let id = tables.next_venue_id();
        tables.venues.insert(id, details.clone());
        Ok(Venue::new(id, details.clone()))
    }

    async fn update(
        &self,
        id: VenueId,
        details: &VenueDetails,
    ) -> RepositoryResult<Option<Venue>> {
        let mut tables = self.tables.write().await;
        match tables.venues.get_mut(&id) {
            Some(row) => {
                *row = details.clone();
                Ok(Some(Venue::new(id, details.clone())))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: VenueId) -> RepositoryResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.venues.contains_key(&id) {
            return Ok(false);
        }
        if tables.events.values().any(|event| event.venue_id() == id) {
            return Err(RepositoryError::still_referenced("Venue", id));
        }
        Ok(tables.venues.remove(&id).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::in_memory::{InMemoryStore, fixtures};

    fn details(name: &str) -> VenueDetails {
        VenueDetails::new(name, "Downtown", 80).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryStore::new().venues();
        let a = repo.create(&details("A")).await.unwrap();
        let b = repo.create(&details("B")).await.unwrap();
        assert_eq!(a.id, VenueId::new(1));
        assert_eq!(b.id, VenueId::new(2));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let repo = InMemoryStore::new().venues();
        repo.create(&details("Zeta Hall")).await.unwrap();
        repo.create(&details("Alpha Room")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.details.name().to_string())
            .collect();
        assert_eq!(names, ["Alpha Room", "Zeta Hall"]);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let repo = InMemoryStore::new().venues();
        assert!(repo.get(VenueId::new(5)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let repo = InMemoryStore::new().venues();
        let venue = repo.create(&details("Old")).await.unwrap();

        let new = VenueDetails::new("New", "Uptown", 5).unwrap();
        let updated = repo.update(venue.id, &new).await.unwrap().unwrap();
        assert_eq!(updated.details, new);
        assert_eq!(repo.get(venue.id).await.unwrap().unwrap().details, new);
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let repo = InMemoryStore::new().venues();
        let result = repo.update(VenueId::new(9), &details("X")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete() {
        let repo = InMemoryStore::new().venues();
        let venue = repo.create(&details("Gone")).await.unwrap();

        assert!(repo.delete(venue.id).await.unwrap());
        assert!(!repo.delete(venue.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_refused_while_hosting_events() {
        let store = InMemoryStore::new();
        let venue = fixtures::venue(&store, "Busy").await;
        fixtures::event(&store, venue.id, "Gala").await;

        let err = store.venues().delete(venue.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::StillReferenced { .. }));
        assert!(store.venues().get(venue.id).await.unwrap().is_some());
    }
}
