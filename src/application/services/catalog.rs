//! # Catalog Service
//!
//! Create, read, update and delete for venues, events, speakers and
//! attendees.
//!
//! Updates overwrite every field. Referential rules are enforced by the
//! store and surface here as [`ApplicationError::MissingReference`] (an
//! event naming an absent venue, a speaker naming an absent event) or
//! [`ApplicationError::InUse`] (deleting a venue that still hosts events).

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{
    Attendee, AttendeeDetails, Event, EventDetails, EventListing, RegistrationDetail, Speaker,
    SpeakerDetails, SpeakerListing, Venue, VenueDetails,
};
use crate::domain::value_objects::{AttendeeId, EventId, SpeakerId, VenueId};
use crate::infrastructure::persistence::Repositories;
use tracing::info;

/// An event with its venue, speakers and registered attendees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    /// The event joined with its venue.
    pub listing: EventListing,
    /// Speakers assigned to the event.
    pub speakers: Vec<Speaker>,
    /// Registrations for the event.
    pub registrations: Vec<RegistrationDetail>,
}

/// An attendee with the events it is registered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeDetail {
    /// The attendee.
    pub attendee: Attendee,
    /// Registrations of the attendee.
    pub registrations: Vec<RegistrationDetail>,
}

/// Service for the venue, event, speaker and attendee catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    repositories: Repositories,
}

impl CatalogService {
    /// Creates a new CatalogService.
    #[must_use]
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    // Venues

    /// Lists venues ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn list_venues(&self) -> ApplicationResult<Vec<Venue>> {
        Ok(self.repositories.venues.list().await?)
    }

    /// Gets one venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the venue does not exist.
    pub async fn get_venue(&self, id: VenueId) -> ApplicationResult<Venue> {
        self.repositories
            .venues
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Venue", id))
    }

    /// Creates a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn create_venue(&self, details: VenueDetails) -> ApplicationResult<Venue> {
        let venue = self.repositories.venues.create(&details).await?;
        info!(venue_id = %venue.id, "Venue created");
        Ok(venue)
    }

    /// Overwrites a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the venue does not exist.
    pub async fn update_venue(&self, id: VenueId, details: VenueDetails) -> ApplicationResult<Venue> {
        self.repositories
            .venues
            .update(id, &details)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Venue", id))
    }

    /// Deletes a venue.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotFound`] if the venue does not exist
    /// - [`ApplicationError::InUse`] if an event is hosted there
    pub async fn delete_venue(&self, id: VenueId) -> ApplicationResult<()> {
        if !self.repositories.venues.delete(id).await? {
            return Err(ApplicationError::not_found("Venue", id));
        }
        info!(venue_id = %id, "Venue deleted");
        Ok(())
    }

    // Events

    /// Lists events with their venue, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn list_events(&self) -> ApplicationResult<Vec<EventListing>> {
        Ok(self.repositories.events.list().await?)
    }

    /// Gets one event with its speakers and registrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the event does not exist.
    pub async fn get_event(&self, id: EventId) -> ApplicationResult<EventDetail> {
        let listing = self
            .repositories
            .events
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Event", id))?;
        let speakers = self.repositories.speakers.find_by_event(id).await?;
        let registrations = self.repositories.registrations.find_by_event(id).await?;

        Ok(EventDetail {
            listing,
            speakers,
            registrations,
        })
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingReference`] if the venue does not exist.
    pub async fn create_event(&self, details: EventDetails) -> ApplicationResult<Event> {
        let event = self.repositories.events.create(&details).await?;
        info!(event_id = %event.id, venue_id = %details.venue_id(), "Event created");
        Ok(event)
    }

    /// Overwrites an event.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotFound`] if the event does not exist
    /// - [`ApplicationError::MissingReference`] if the venue does not exist
    pub async fn update_event(&self, id: EventId, details: EventDetails) -> ApplicationResult<Event> {
        self.repositories
            .events
            .update(id, &details)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Event", id))
    }

    /// Deletes an event, its registrations, and its speaker assignments.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the event does not exist.
    pub async fn delete_event(&self, id: EventId) -> ApplicationResult<()> {
        if !self.repositories.events.delete(id).await? {
            return Err(ApplicationError::not_found("Event", id));
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    // Speakers

    /// Lists speakers with their event, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn list_speakers(&self) -> ApplicationResult<Vec<SpeakerListing>> {
        Ok(self.repositories.speakers.list().await?)
    }

    /// Gets one speaker with its event.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the speaker does not exist.
    pub async fn get_speaker(&self, id: SpeakerId) -> ApplicationResult<SpeakerListing> {
        self.repositories
            .speakers
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Speaker", id))
    }

    /// Creates a speaker.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingReference`] if the assigned event
    /// does not exist.
    pub async fn create_speaker(&self, details: SpeakerDetails) -> ApplicationResult<Speaker> {
        let speaker = self.repositories.speakers.create(&details).await?;
        info!(speaker_id = %speaker.id, "Speaker created");
        Ok(speaker)
    }

    /// Overwrites a speaker.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotFound`] if the speaker does not exist
    /// - [`ApplicationError::MissingReference`] if the assigned event does
    ///   not exist
    pub async fn update_speaker(
        &self,
        id: SpeakerId,
        details: SpeakerDetails,
    ) -> ApplicationResult<Speaker> {
        self.repositories
            .speakers
            .update(id, &details)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Speaker", id))
    }

    /// Deletes a speaker.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the speaker does not exist.
    pub async fn delete_speaker(&self, id: SpeakerId) -> ApplicationResult<()> {
        if !self.repositories.speakers.delete(id).await? {
            return Err(ApplicationError::not_found("Speaker", id));
        }
        info!(speaker_id = %id, "Speaker deleted");
        Ok(())
    }

    // Attendees

    /// Lists attendees ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn list_attendees(&self) -> ApplicationResult<Vec<Attendee>> {
        Ok(self.repositories.attendees.list().await?)
    }

    /// Gets one attendee with its registrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the attendee does not exist.
    pub async fn get_attendee(&self, id: AttendeeId) -> ApplicationResult<AttendeeDetail> {
        let attendee = self
            .repositories
            .attendees
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Attendee", id))?;
        let registrations = self.repositories.registrations.find_by_attendee(id).await?;

        Ok(AttendeeDetail {
            attendee,
            registrations,
        })
    }

    /// Creates an attendee.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Infrastructure`] if the store fails.
    pub async fn create_attendee(&self, details: AttendeeDetails) -> ApplicationResult<Attendee> {
        let attendee = self.repositories.attendees.create(&details).await?;
        info!(attendee_id = %attendee.id, "Attendee created");
        Ok(attendee)
    }

    /// Overwrites an attendee.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the attendee does not exist.
    pub async fn update_attendee(
        &self,
        id: AttendeeId,
        details: AttendeeDetails,
    ) -> ApplicationResult<Attendee> {
        self.repositories
            .attendees
            .update(id, &details)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Attendee", id))
    }

    /// Deletes an attendee and its registrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if the attendee does not exist.
    pub async fn delete_attendee(&self, id: AttendeeId) -> ApplicationResult<()> {
        if !self.repositories.attendees.delete(id).await? {
            return Err(ApplicationError::not_found("Attendee", id));
        }
        info!(attendee_id = %id, "Attendee deleted");
        Ok(())
    }
}
