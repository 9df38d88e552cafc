//! # REST Routes
//!
//! The route table of the service.

use super::handlers::{AppState, attendees, events, health, registrations, speakers, venues};
use axum::Router;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the router with every endpoint, request tracing and CORS.
///
/// CORS allows any origin, method and header.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/diagnostic", get(health::diagnostic))
        .nest("/api/venues", venue_routes())
        .nest("/api/events", event_routes())
        .nest("/api/speakers", speaker_routes())
        .nest("/api/attendees", attendee_routes())
        .route(
            "/api/event_attendees",
            get(registrations::list_registrations)
                .post(registrations::create_registration)
                .put(registrations::reassign_registration)
                .delete(registrations::delete_registration),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn venue_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(venues::list_venues).post(venues::create_venue))
        .route(
            "/{id}",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
}

fn event_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}

fn speaker_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(speakers::list_speakers).post(speakers::create_speaker))
        .route(
            "/{id}",
            get(speakers::get_speaker)
                .put(speakers::update_speaker)
                .delete(speakers::delete_speaker),
        )
}

fn attendee_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(attendees::list_attendees).post(attendees::create_attendee),
        )
        .route(
            "/{id}",
            get(attendees::get_attendee)
                .put(attendees::update_attendee)
                .delete(attendees::delete_attendee),
        )
        .route("/{id}/register", post(registrations::register_attendee))
        .route("/{id}/unregister", delete(registrations::unregister_attendee))
}
