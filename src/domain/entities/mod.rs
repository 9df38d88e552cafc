//! # Domain Entities
//!
//! Persisted records and the read models joined from them.
//!
//! ## Entities
//!
//! - [`Venue`]: a place hosting events
//! - [`Event`]: a dated happening at one venue
//! - [`Speaker`]: a presenter, optionally assigned to one event
//! - [`Attendee`]: a person who registers for events
//!
//! Each entity pairs a store-assigned id with a validated `*Details` value
//! holding its writable fields.
//!
//! ## Association
//!
//! - [`RegistrationDetail`]: an Event↔Attendee row joined with both sides
//! - [`RegistrationRejection`]: expected reasons a registration is refused

pub mod attendee;
pub mod event;
pub mod registration;
pub mod speaker;
pub mod venue;

pub use attendee::{Attendee, AttendeeDetails};
pub use event::{Event, EventDetails, EventListing};
pub use registration::{RegistrationDetail, RegistrationRejection};
pub use speaker::{Speaker, SpeakerDetails, SpeakerListing};
pub use venue::{Venue, VenueDetails};
