//! Venue endpoints.

use super::{ApiResult, AppState, MessageResponse};
use crate::application::error::ApplicationError;
use crate::domain::entities::{Venue, VenueDetails};
use crate::domain::value_objects::VenueId;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Venue create/update body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueRequest {
    /// Venue name.
    pub venue_name: String,
    /// Free-form location.
    pub location: String,
    /// Seat count.
    pub capacity: i32,
}

impl TryFrom<VenueRequest> for VenueDetails {
    type Error = ApplicationError;

    fn try_from(req: VenueRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(&req.venue_name, &req.location, req.capacity)?)
    }
}

/// Venue as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    /// Venue ID.
    #[serde(rename = "venueID")]
    pub venue_id: VenueId,
    /// Venue name.
    pub venue_name: String,
    /// Free-form location.
    pub location: String,
    /// Seat count.
    pub capacity: i32,
}

impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        Self {
            venue_id: venue.id,
            venue_name: venue.details.name().to_string(),
            location: venue.details.location().to_string(),
            capacity: venue.details.capacity(),
        }
    }
}

/// `GET /api/venues`
pub async fn list_venues(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<VenueResponse>>> {
    let venues = state.catalog.list_venues().await?;
    Ok(Json(venues.into_iter().map(VenueResponse::from).collect()))
}

/// `GET /api/venues/{id}`
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<VenueId>,
) -> ApiResult<Json<VenueResponse>> {
    let venue = state.catalog.get_venue(id).await?;
    Ok(Json(venue.into()))
}

/// `POST /api/venues`
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VenueRequest>,
) -> ApiResult<(StatusCode, Json<VenueResponse>)> {
    let venue = state.catalog.create_venue(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(venue.into())))
}

/// `PUT /api/venues/{id}`
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<VenueId>,
    Json(req): Json<VenueRequest>,
) -> ApiResult<Json<VenueResponse>> {
    let venue = state.catalog.update_venue(id, req.try_into()?).await?;
    Ok(Json(venue.into()))
}

/// `DELETE /api/venues/{id}`
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<VenueId>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete_venue(id).await?;
    Ok(MessageResponse::new("Venue deleted successfully"))
}
