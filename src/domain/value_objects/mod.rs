//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! ## Identity Types
//!
//! - [`VenueId`], [`EventId`], [`SpeakerId`], [`AttendeeId`]: store-assigned
//!   integer identifiers
//! - [`RegistrationKey`]: composite (event, attendee) key of a registration
//!
//! ## Processing
//!
//! - [`RegistrationStage`]: linear stages of a registration request
//!
//! ## Contact
//!
//! - [`Email`]: validated attendee email address

pub mod email;
pub mod ids;
pub mod registration_key;
pub mod registration_stage;

pub use email::Email;
pub use ids::{AttendeeId, EventId, SpeakerId, VenueId};
pub use registration_key::RegistrationKey;
pub use registration_stage::RegistrationStage;
