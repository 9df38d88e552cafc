//! Event endpoints.

use super::registrations::RegistrationResponse;
use super::speakers::SpeakerResponse;
use super::{ApiResult, AppState, MessageResponse};
use crate::application::error::ApplicationError;
use crate::application::services::EventDetail;
use crate::domain::entities::{Event, EventDetails, EventListing};
use crate::domain::value_objects::{EventId, VenueId};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Event create/update body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Event name.
    pub event_name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub event_date: NaiveDate,
    /// Hosting venue.
    #[serde(rename = "venueID")]
    pub venue_id: VenueId,
    /// Free-form description.
    #[serde(default)]
    pub event_description: String,
}

impl TryFrom<EventRequest> for EventDetails {
    type Error = ApplicationError;

    fn try_from(req: EventRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(
            &req.event_name,
            req.event_date,
            &req.event_description,
            req.venue_id,
        )?)
    }
}

/// Event as returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Event ID.
    #[serde(rename = "eventID")]
    pub event_id: EventId,
    /// Event name.
    pub event_name: String,
    /// Calendar date.
    pub event_date: NaiveDate,
    /// Free-form description.
    pub event_description: String,
    /// Hosting venue.
    #[serde(rename = "venueID")]
    pub venue_id: VenueId,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.id,
            event_name: event.details.name().to_string(),
            event_date: event.details.date(),
            event_description: event.details.description().to_string(),
            venue_id: event.details.venue_id(),
        }
    }
}

/// Event joined with its venue, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListingResponse {
    /// Event fields.
    #[serde(flatten)]
    pub event: EventResponse,
    /// Venue name.
    pub venue_name: String,
    /// Venue location.
    pub location: String,
    /// Venue seat count.
    pub capacity: i32,
}

impl From<EventListing> for EventListingResponse {
    fn from(listing: EventListing) -> Self {
        Self {
            event: listing.event.into(),
            venue_name: listing.venue_name,
            location: listing.location,
            capacity: listing.capacity,
        }
    }
}

/// Event with its venue, speakers and attendees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetailResponse {
    /// Event and venue fields.
    #[serde(flatten)]
    pub listing: EventListingResponse,
    /// Assigned speakers.
    pub speakers: Vec<SpeakerResponse>,
    /// Registered attendees.
    pub attendees: Vec<RegistrationResponse>,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(detail: EventDetail) -> Self {
        Self {
            listing: detail.listing.into(),
            speakers: detail.speakers.into_iter().map(SpeakerResponse::from).collect(),
            attendees: detail
                .registrations
                .into_iter()
                .map(RegistrationResponse::from)
                .collect(),
        }
    }
}

/// `GET /api/events`
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EventListingResponse>>> {
    let events = state.catalog.list_events().await?;
    Ok(Json(
        events.into_iter().map(EventListingResponse::from).collect(),
    ))
}

/// `GET /api/events/{id}`
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<EventDetailResponse>> {
    let detail = state.catalog.get_event(id).await?;
    Ok(Json(detail.into()))
}

/// `POST /api/events`
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EventRequest>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let event = state.catalog.create_event(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// `PUT /api/events/{id}`
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
    Json(req): Json<EventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let event = state.catalog.update_event(id, req.try_into()?).await?;
    Ok(Json(event.into()))
}

/// `DELETE /api/events/{id}`
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete_event(id).await?;
    Ok(MessageResponse::new("Event deleted successfully"))
}
