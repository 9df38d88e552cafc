//! # Persistence Layer
//!
//! Repository ports and their implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`VenueRepository`]: Persistence for venues
//! - [`EventRepository`]: Persistence for events
//! - [`SpeakerRepository`]: Persistence for speakers
//! - [`AttendeeRepository`]: Persistence for attendees
//! - [`RegistrationRepository`]: Persistence for the Event↔Attendee association
//! - [`StoreProbe`]: Store round trip for diagnostics
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for testing
//! - `postgres`: PostgreSQL implementations

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    AttendeeRepository, EventRepository, RegistrationRepository, RepositoryError,
    RepositoryResult, SpeakerRepository, StoreProbe, VenueRepository,
};

use std::sync::Arc;

/// One handle per repository, all over the same store.
///
/// Built by [`in_memory::InMemoryStore::repositories`] or
/// [`postgres::Database::repositories`].
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Venue repository.
    pub venues: Arc<dyn VenueRepository>,
    /// Event repository.
    pub events: Arc<dyn EventRepository>,
    /// Speaker repository.
    pub speakers: Arc<dyn SpeakerRepository>,
    /// Attendee repository.
    pub attendees: Arc<dyn AttendeeRepository>,
    /// Registration repository.
    pub registrations: Arc<dyn RegistrationRepository>,
    /// Store round trip.
    pub probe: Arc<dyn StoreProbe>,
}
