//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryVenueRepository`]: Venue persistence
//! - [`InMemoryEventRepository`]: Event persistence
//! - [`InMemorySpeakerRepository`]: Speaker persistence
//! - [`InMemoryAttendeeRepository`]: Attendee persistence
//! - [`InMemoryRegistrationRepository`]: Event↔Attendee association
//!
//! ## Thread Safety
//!
//! All repositories obtained from one [`InMemoryStore`] share a single
//! `Arc<RwLock<Tables>>`, so joins, cascades and constraint checks see one
//! consistent snapshot, the way a single database would.

pub mod attendee_repository;
pub mod event_repository;
pub mod registration_repository;
pub mod speaker_repository;
pub mod venue_repository;

pub use attendee_repository::InMemoryAttendeeRepository;
pub use event_repository::InMemoryEventRepository;
pub use registration_repository::InMemoryRegistrationRepository;
pub use speaker_repository::InMemorySpeakerRepository;
pub use venue_repository::InMemoryVenueRepository;

use crate::domain::entities::{
    Attendee, AttendeeDetails, Event, EventDetails, EventListing, RegistrationDetail, Speaker,
    SpeakerDetails, SpeakerListing, Venue, VenueDetails,
};
use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey, SpeakerId, VenueId};
use crate::infrastructure::persistence::Repositories;
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult, StoreProbe};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle to the in-memory tables.
pub(crate) type SharedTables = Arc<RwLock<Tables>>;

/// Row storage mirroring the SQL schema.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) venues: BTreeMap<VenueId, VenueDetails>,
    pub(crate) events: BTreeMap<EventId, EventDetails>,
    pub(crate) speakers: BTreeMap<SpeakerId, SpeakerDetails>,
    pub(crate) attendees: BTreeMap<AttendeeId, AttendeeDetails>,
    pub(crate) registrations: BTreeSet<RegistrationKey>,
    sequences: Sequences,
}

/// Per-table identity sequences, like SQL `IDENTITY` columns.
#[derive(Debug, Default)]
struct Sequences {
    venue: i64,
    event: i64,
    speaker: i64,
    attendee: i64,
}

fn advance(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

impl Tables {
    pub(crate) fn next_venue_id(&mut self) -> VenueId {
        VenueId::new(advance(&mut self.sequences.venue))
    }

    pub(crate) fn next_event_id(&mut self) -> EventId {
        EventId::new(advance(&mut self.sequences.event))
    }

    pub(crate) fn next_speaker_id(&mut self) -> SpeakerId {
        SpeakerId::new(advance(&mut self.sequences.speaker))
    }

    pub(crate) fn next_attendee_id(&mut self) -> AttendeeId {
        AttendeeId::new(advance(&mut self.sequences.attendee))
    }

    /// Foreign key check for `events.venue_id`.
    pub(crate) fn check_venue_ref(&self, venue_id: VenueId) -> RepositoryResult<()> {
        if self.venues.contains_key(&venue_id) {
            Ok(())
        } else {
            Err(RepositoryError::missing_reference("Venue", venue_id))
        }
    }

    /// Foreign key check for `speakers.event_id`.
    pub(crate) fn check_event_ref(&self, event_id: Option<EventId>) -> RepositoryResult<()> {
        match event_id {
            Some(id) if !self.events.contains_key(&id) => {
                Err(RepositoryError::missing_reference("Event", id))
            }
            _ => Ok(()),
        }
    }

    /// Foreign key and uniqueness checks for `event_attendees`.
    pub(crate) fn check_registration_insert(&self, key: RegistrationKey) -> RepositoryResult<()> {
        if !self.events.contains_key(&key.event_id) {
            return Err(RepositoryError::missing_reference("Event", key.event_id));
        }
        if !self.attendees.contains_key(&key.attendee_id) {
            return Err(RepositoryError::missing_reference(
                "Attendee",
                key.attendee_id,
            ));
        }
        if self.registrations.contains(&key) {
            return Err(RepositoryError::duplicate("Registration", key));
        }
        Ok(())
    }

    pub(crate) fn venue(&self, id: VenueId) -> Option<Venue> {
        self.venues
            .get(&id)
            .map(|details| Venue::new(id, details.clone()))
    }

    pub(crate) fn attendee(&self, id: AttendeeId) -> Option<Attendee> {
        self.attendees
            .get(&id)
            .map(|details| Attendee::new(id, details.clone()))
    }

    pub(crate) fn event_listing(&self, id: EventId) -> Option<EventListing> {
        let details = self.events.get(&id)?;
        let venue = self.venues.get(&details.venue_id())?;
        Some(EventListing {
            event: Event::new(id, details.clone()),
            venue_name: venue.name().to_string(),
            location: venue.location().to_string(),
            capacity: venue.capacity(),
        })
    }

    pub(crate) fn speaker_listing(&self, id: SpeakerId) -> Option<SpeakerListing> {
        let details = self.speakers.get(&id)?;
        let event = details
            .event_id()
            .and_then(|event_id| self.events.get(&event_id));
        Some(SpeakerListing {
            speaker: Speaker::new(id, details.clone()),
            event_name: event.map(|e| e.name().to_string()),
            event_date: event.map(EventDetails::date),
        })
    }

    pub(crate) fn registration_detail(&self, key: RegistrationKey) -> Option<RegistrationDetail> {
        if !self.registrations.contains(&key) {
            return None;
        }
        let event = self.events.get(&key.event_id)?;
        let attendee = self.attendees.get(&key.attendee_id)?;
        Some(RegistrationDetail {
            event_id: key.event_id,
            event_name: event.name().to_string(),
            event_date: event.date(),
            attendee_id: key.attendee_id,
            first_name: attendee.first_name().to_string(),
            last_name: attendee.last_name().to_string(),
            email: attendee.email().to_string(),
        })
    }

    /// Joins the matching registrations, sorted like the SQL listing.
    pub(crate) fn registration_details(
        &self,
        filter: impl Fn(&RegistrationKey) -> bool,
    ) -> Vec<RegistrationDetail> {
        let mut rows: Vec<RegistrationDetail> = self
            .registrations
            .iter()
            .filter(|key| filter(key))
            .filter_map(|key| self.registration_detail(*key))
            .collect();
        rows.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.event_id.cmp(&b.event_id))
        });
        rows
    }
}

/// An in-memory database.
///
/// Cloning yields another handle to the same tables.
///
/// # Examples
///
/// ```
/// use event_manager::infrastructure::persistence::in_memory::InMemoryStore;
/// use event_manager::infrastructure::persistence::traits::StoreProbe;
///
/// let store = InMemoryStore::new();
/// let repositories = store.repositories();
/// assert_eq!(repositories.probe.backend(), "in-memory");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: SharedTables,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Venue repository over this store.
    #[must_use]
    pub fn venues(&self) -> InMemoryVenueRepository {
        InMemoryVenueRepository::new(Arc::clone(&self.tables))
    }

    /// Event repository over this store.
    #[must_use]
    pub fn events(&self) -> InMemoryEventRepository {
        InMemoryEventRepository::new(Arc::clone(&self.tables))
    }

    /// Speaker repository over this store.
    #[must_use]
    pub fn speakers(&self) -> InMemorySpeakerRepository {
        InMemorySpeakerRepository::new(Arc::clone(&self.tables))
    }

    /// Attendee repository over this store.
    #[must_use]
    pub fn attendees(&self) -> InMemoryAttendeeRepository {
        InMemoryAttendeeRepository::new(Arc::clone(&self.tables))
    }

    /// Registration repository over this store.
    #[must_use]
    pub fn registrations(&self) -> InMemoryRegistrationRepository {
        InMemoryRegistrationRepository::new(Arc::clone(&self.tables))
    }

    /// Bundles every repository of this store.
    #[must_use]
    pub fn repositories(&self) -> Repositories {
        Repositories {
            venues: Arc::new(self.venues()),
            events: Arc::new(self.events()),
            speakers: Arc::new(self.speakers()),
            attendees: Arc::new(self.attendees()),
            registrations: Arc::new(self.registrations()),
            probe: Arc::new(self.clone()),
        }
    }

    /// Removes every row and resets identity sequences.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        *tables = Tables::default();
    }
}

#[async_trait]
impl StoreProbe for InMemoryStore {
    async fn ping(&self) -> RepositoryResult<()> {
        let _tables = self.tables.read().await;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    //! Seed helpers shared by the in-memory repository tests.

    use super::*;
    use crate::infrastructure::persistence::traits::{
        AttendeeRepository, EventRepository, VenueRepository,
    };
    use chrono::NaiveDate;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) async fn venue(store: &InMemoryStore, name: &str) -> Venue {
        let details = VenueDetails::new(name, "Corvallis, OR", 100).unwrap();
        store.venues().create(&details).await.unwrap()
    }

    pub(crate) async fn event(store: &InMemoryStore, venue_id: VenueId, name: &str) -> Event {
        let details = EventDetails::new(name, date(2025, 6, 1), "", venue_id).unwrap();
        store.events().create(&details).await.unwrap()
    }

    pub(crate) async fn attendee(store: &InMemoryStore, first: &str, last: &str) -> Attendee {
        let email = format!("{}@example.com", last.to_lowercase());
        let details = AttendeeDetails::new(first, last, &email).unwrap();
        store.attendees().create(&details).await.unwrap()
    }
}
