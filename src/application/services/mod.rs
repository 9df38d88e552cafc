//! # Application Services
//!
//! Services that orchestrate domain rules and the repositories.
//!
//! - [`RegistrationService`]: validated Event↔Attendee registrations
//! - [`CatalogService`]: venue, event, speaker and attendee CRUD

pub mod catalog;
pub mod registration;

pub use catalog::{AttendeeDetail, CatalogService, EventDetail};
pub use registration::RegistrationService;
