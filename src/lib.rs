//! # Event Manager
//!
//! REST service for running events: venues host events, speakers are
//! assigned to events, and attendees register for them.
//!
//! Registrations go through a validator that checks the event exists, then
//! the attendee, then that the pair is not already registered. The store's
//! key and reference constraints back every check, so concurrent requests
//! for the same pair insert at most once.
//!
//! # Architecture
//!
//! ```text
//! api::rest          axum handlers, wire DTOs, error mapping
//!     │
//! application        RegistrationService, CatalogService
//!     │
//! domain             entities, value objects, validation
//!     │
//! infrastructure     repository traits, PostgreSQL and in-memory stores
//! ```
//!
//! # Examples
//!
//! ```
//! use event_manager::application::services::RegistrationService;
//! use event_manager::domain::entities::RegistrationRejection;
//! use event_manager::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
//! use event_manager::infrastructure::persistence::in_memory::InMemoryStore;
//!
//! # tokio_test::block_on(async {
//! let service = RegistrationService::from_repositories(&InMemoryStore::new().repositories());
//! let key = RegistrationKey::new(EventId::new(1), AttendeeId::new(7));
//!
//! let err = service.register(key).await.unwrap_err();
//! assert_eq!(err.rejection(), Some(RegistrationRejection::InvalidEvent));
//! # });
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod telemetry;
