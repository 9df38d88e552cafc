//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) that abstract
//! persistence operations. Implementations exist for PostgreSQL and for
//! in-memory storage.
//!
//! # Available Repositories
//!
//! - [`VenueRepository`]: Persistence for venues
//! - [`EventRepository`]: Persistence for events
//! - [`SpeakerRepository`]: Persistence for speakers
//! - [`AttendeeRepository`]: Persistence for attendees
//! - [`RegistrationRepository`]: Persistence for the Event↔Attendee association
//! - [`StoreProbe`]: Connectivity check against the backing store
//!
//! # Constraints
//!
//! Every implementation enforces the same integrity rules as the SQL schema:
//!
//! - a registration pair is unique ([`RepositoryError::Duplicate`])
//! - references to absent rows are refused ([`RepositoryError::MissingReference`])
//! - a venue hosting events cannot be deleted ([`RepositoryError::StillReferenced`])
//! - deleting an event or attendee removes its registrations
//! - deleting an event unassigns its speakers
//!
//! # Examples
//!
//! ```ignore
//! use event_manager::infrastructure::persistence::traits::RegistrationRepository;
//!
//! async fn roster(repo: &impl RegistrationRepository, event_id: EventId) {
//!     let rows = repo.find_by_event(event_id).await?;
//!     println!("{} attendees", rows.len());
//! }
//! ```

use crate::domain::entities::{
    Attendee, AttendeeDetails, Event, EventDetails, EventListing, RegistrationDetail, Speaker,
    SpeakerDetails, SpeakerListing, Venue, VenueDetails,
};
use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey, SpeakerId, VenueId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Unique constraint violated.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// A written row references a row that does not exist.
    #[error("Missing reference: {entity_type} with id {id} does not exist")]
    MissingReference {
        /// Type of the referenced entity.
        entity_type: &'static str,
        /// Referenced identifier.
        id: String,
    },

    /// A deleted row is still referenced by other rows.
    #[error("Still referenced: {entity_type} with id {id} is in use")]
    StillReferenced {
        /// Type of the entity being deleted.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl ToString) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a missing reference error.
    #[must_use]
    pub fn missing_reference(entity_type: &'static str, id: impl ToString) -> Self {
        Self::MissingReference {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a still referenced error.
    #[must_use]
    pub fn still_referenced(entity_type: &'static str, id: impl ToString) -> Self {
        Self::StillReferenced {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if this is a missing reference error.
    #[must_use]
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, Self::MissingReference { .. })
    }

    /// Returns the referenced entity type of a missing reference error.
    #[must_use]
    pub fn missing_entity_type(&self) -> Option<&'static str> {
        match self {
            Self::MissingReference { entity_type, .. } => Some(entity_type),
            _ => None,
        }
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for venues.
#[async_trait]
pub trait VenueRepository: Send + Sync + fmt::Debug {
    /// Lists all venues ordered by name.
    async fn list(&self) -> RepositoryResult<Vec<Venue>>;

    /// Gets a venue by ID.
    ///
    /// Returns `None` if the venue does not exist.
    async fn get(&self, id: VenueId) -> RepositoryResult<Option<Venue>>;

    /// Inserts a venue and returns it with its new ID.
    async fn create(&self, details: &VenueDetails) -> RepositoryResult<Venue>;

    /// Overwrites every field of a venue.
    ///
    /// Returns `None` if the venue does not exist.
    async fn update(
        &self,
        id: VenueId,
        details: &VenueDetails,
    ) -> RepositoryResult<Option<Venue>>;

    /// Deletes a venue by ID.
    ///
    /// Returns `Ok(true)` if the venue was deleted, `Ok(false)` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StillReferenced` if an event is hosted there.
    async fn delete(&self, id: VenueId) -> RepositoryResult<bool>;
}

/// Repository for events.
#[async_trait]
pub trait EventRepository: Send + Sync + fmt::Debug {
    /// Lists all events with their venue, most recent date first.
    async fn list(&self) -> RepositoryResult<Vec<EventListing>>;

    /// Gets an event with its venue by ID.
    ///
    /// Returns `None` if the event does not exist.
    async fn get(&self, id: EventId) -> RepositoryResult<Option<EventListing>>;

    /// Returns true if an event with this ID exists.
    async fn exists(&self, id: EventId) -> RepositoryResult<bool>;

    /// Inserts an event and returns it with its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the venue does not exist.
    async fn create(&self, details: &EventDetails) -> RepositoryResult<Event>;

    /// Overwrites every field of an event.
    ///
    /// Returns `None` if the event does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the venue does not exist.
    async fn update(
        &self,
        id: EventId,
        details: &EventDetails,
    ) -> RepositoryResult<Option<Event>>;

    /// Deletes an event by ID, cascading to its registrations and
    /// unassigning its speakers.
    ///
    /// Returns `Ok(true)` if the event was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: EventId) -> RepositoryResult<bool>;
}

/// Repository for speakers.
#[async_trait]
pub trait SpeakerRepository: Send + Sync + fmt::Debug {
    /// Lists all speakers with their event, ordered by last name.
    async fn list(&self) -> RepositoryResult<Vec<SpeakerListing>>;

    /// Gets a speaker with its event by ID.
    ///
    /// Returns `None` if the speaker does not exist.
    async fn get(&self, id: SpeakerId) -> RepositoryResult<Option<SpeakerListing>>;

    /// Finds the speakers assigned to an event.
    async fn find_by_event(&self, event_id: EventId) -> RepositoryResult<Vec<Speaker>>;

    /// Inserts a speaker and returns it with its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the assigned event
    /// does not exist.
    async fn create(&self, details: &SpeakerDetails) -> RepositoryResult<Speaker>;

    /// Overwrites every field of a speaker.
    ///
    /// Returns `None` if the speaker does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the assigned event
    /// does not exist.
    async fn update(
        &self,
        id: SpeakerId,
        details: &SpeakerDetails,
    ) -> RepositoryResult<Option<Speaker>>;

    /// Deletes a speaker by ID.
    ///
    /// Returns `Ok(true)` if the speaker was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: SpeakerId) -> RepositoryResult<bool>;
}

/// Repository for attendees.
#[async_trait]
pub trait AttendeeRepository: Send + Sync + fmt::Debug {
    /// Lists all attendees ordered by last name.
    async fn list(&self) -> RepositoryResult<Vec<Attendee>>;

    /// Gets an attendee by ID.
    ///
    /// Returns `None` if the attendee does not exist.
    async fn get(&self, id: AttendeeId) -> RepositoryResult<Option<Attendee>>;

    /// Returns true if an attendee with this ID exists.
    async fn exists(&self, id: AttendeeId) -> RepositoryResult<bool>;

    /// Inserts an attendee and returns it with its new ID.
    async fn create(&self, details: &AttendeeDetails) -> RepositoryResult<Attendee>;

    /// Overwrites every field of an attendee.
    ///
    /// Returns `None` if the attendee does not exist.
    async fn update(
        &self,
        id: AttendeeId,
        details: &AttendeeDetails,
    ) -> RepositoryResult<Option<Attendee>>;

    /// Deletes an attendee by ID, cascading to its registrations.
    ///
    /// Returns `Ok(true)` if the attendee was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: AttendeeId) -> RepositoryResult<bool>;
}

/// Repository for the Event↔Attendee association.
#[async_trait]
pub trait RegistrationRepository: Send + Sync + fmt::Debug {
    /// Lists every registration joined with its event and attendee,
    /// ordered by attendee last name, first name, then event ID.
    async fn list(&self) -> RepositoryResult<Vec<RegistrationDetail>>;

    /// Lists the registrations of one event.
    async fn find_by_event(&self, event_id: EventId) -> RepositoryResult<Vec<RegistrationDetail>>;

    /// Lists the registrations of one attendee.
    async fn find_by_attendee(
        &self,
        attendee_id: AttendeeId,
    ) -> RepositoryResult<Vec<RegistrationDetail>>;

    /// Gets one registration with its joined details.
    ///
    /// Returns `None` if the pair is not registered.
    async fn get(&self, key: RegistrationKey) -> RepositoryResult<Option<RegistrationDetail>>;

    /// Returns true if the pair is registered.
    async fn exists(&self, key: RegistrationKey) -> RepositoryResult<bool>;

    /// Inserts a registration row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the pair is already present,
    /// or `RepositoryError::MissingReference` naming `"Event"` or
    /// `"Attendee"` if either side does not exist.
    async fn insert(&self, key: RegistrationKey) -> RepositoryResult<()>;

    /// Replaces the `from` pair with the `to` pair atomically.
    ///
    /// No other caller observes a state where neither pair is present.
    /// Returns `Ok(false)` without writing if `from` is not registered.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert) for the `to` pair; on error the
    /// `from` pair is left in place.
    async fn replace(&self, from: RegistrationKey, to: RegistrationKey) -> RepositoryResult<bool>;

    /// Deletes a registration by pair.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if none matched.
    async fn delete(&self, key: RegistrationKey) -> RepositoryResult<bool>;

    /// Counts all registrations.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Connectivity check against the backing store.
#[async_trait]
pub trait StoreProbe: Send + Sync + fmt::Debug {
    /// Performs a trivial round trip.
    async fn ping(&self) -> RepositoryResult<()>;

    /// Short name of the backend, for diagnostics.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repository_error {
        use super::*;

        #[test]
        fn not_found_error() {
            let err = RepositoryError::not_found("Venue", 12);
            assert!(err.is_not_found());
            assert!(!err.is_duplicate());
            assert!(err.to_string().contains("not found"));
            assert!(err.to_string().contains("Venue"));
            assert!(err.to_string().contains("12"));
        }

        #[test]
        fn duplicate_error() {
            let err = RepositoryError::duplicate("Registration", "event 1 / attendee 7");
            assert!(!err.is_not_found());
            assert!(err.is_duplicate());
            assert!(err.to_string().contains("Duplicate"));
            assert!(err.to_string().contains("attendee 7"));
        }

        #[test]
        fn missing_reference_error() {
            let err = RepositoryError::missing_reference("Event", 99);
            assert!(err.is_missing_reference());
            assert_eq!(err.missing_entity_type(), Some("Event"));
            assert!(err.to_string().contains("does not exist"));
        }

        #[test]
        fn missing_entity_type_only_for_missing_reference() {
            let err = RepositoryError::still_referenced("Venue", 3);
            assert_eq!(err.missing_entity_type(), None);
            assert!(err.to_string().contains("in use"));
        }

        #[test]
        fn connection_error() {
            let err = RepositoryError::connection("Connection refused");
            assert!(err.to_string().contains("Connection"));
            assert!(err.to_string().contains("refused"));
        }

        #[test]
        fn query_error() {
            let err = RepositoryError::query("syntax error at or near");
            assert!(err.to_string().contains("Query"));
        }

        #[test]
        fn internal_error() {
            let err = RepositoryError::internal("Unexpected state");
            assert!(err.to_string().contains("Internal"));
        }
    }
}
