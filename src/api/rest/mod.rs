//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /api/health` - Liveness and version
//! - `GET /api/diagnostic` - Store round trip
//!
//! ## Catalog
//! - `GET|POST /api/venues`, `GET|PUT|DELETE /api/venues/{id}`
//! - `GET|POST /api/events`, `GET|PUT|DELETE /api/events/{id}`
//! - `GET|POST /api/speakers`, `GET|PUT|DELETE /api/speakers/{id}`
//! - `GET|POST /api/attendees`, `GET|PUT|DELETE /api/attendees/{id}`
//!
//! ## Registrations
//! - `GET /api/event_attendees` - List, optionally `?eventID=` / `?attendeeID=`
//! - `POST /api/event_attendees` - Register `{eventID, attendeeID}`
//! - `PUT /api/event_attendees` - Reassign `{from, to}`
//! - `DELETE /api/event_attendees` - Unregister `{eventID, attendeeID}`
//! - `POST /api/attendees/{id}/register` - Register for `{eventID}`
//! - `DELETE /api/attendees/{id}/unregister` - Unregister from `{eventID}`
//!
//! # Usage
//!
//! ```no_run
//! use event_manager::api::rest::{AppState, create_router};
//! use event_manager::infrastructure::persistence::in_memory::InMemoryStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> std::io::Result<()> {
//! let store = InMemoryStore::new();
//! let router = create_router(Arc::new(AppState::new(store.repositories())));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8500").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, ApiResult, AppState, ErrorResponse, MessageResponse};
pub use routes::create_router;
