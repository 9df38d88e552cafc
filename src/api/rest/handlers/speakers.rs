//! Speaker endpoints.

use super::{ApiResult, AppState, MessageResponse};
use crate::application::error::ApplicationError;
use crate::domain::entities::{Speaker, SpeakerDetails, SpeakerListing};
use crate::domain::value_objects::{EventId, SpeakerId};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Speaker create/update body.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerRequest {
    /// Assigned event; `null` or absent leaves the speaker unassigned.
    #[serde(rename = "eventID", default)]
    pub event_id: Option<EventId>,
    /// Given name.
    #[serde(rename = "fName")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lName")]
    pub last_name: String,
    /// Topic area.
    #[serde(default)]
    pub specialization: String,
}

impl TryFrom<SpeakerRequest> for SpeakerDetails {
    type Error = ApplicationError;

    fn try_from(req: SpeakerRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(
            &req.first_name,
            &req.last_name,
            &req.specialization,
            req.event_id,
        )?)
    }
}

/// Speaker as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerResponse {
    /// Speaker ID.
    #[serde(rename = "speakerID")]
    pub speaker_id: SpeakerId,
    /// Assigned event, if any.
    #[serde(rename = "eventID")]
    pub event_id: Option<EventId>,
    /// Given name.
    #[serde(rename = "fName")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lName")]
    pub last_name: String,
    /// Topic area.
    pub specialization: String,
}

impl From<Speaker> for SpeakerResponse {
    fn from(speaker: Speaker) -> Self {
        Self {
            speaker_id: speaker.id,
            event_id: speaker.details.event_id(),
            first_name: speaker.details.first_name().to_string(),
            last_name: speaker.details.last_name().to_string(),
            specialization: speaker.details.specialization().to_string(),
        }
    }
}

/// Speaker with the name and date of its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerListingResponse {
    /// Speaker fields.
    #[serde(flatten)]
    pub speaker: SpeakerResponse,
    /// Assigned event name.
    pub event_name: Option<String>,
    /// Assigned event date.
    pub event_date: Option<NaiveDate>,
}

impl From<SpeakerListing> for SpeakerListingResponse {
    fn from(listing: SpeakerListing) -> Self {
        Self {
            speaker: listing.speaker.into(),
            event_name: listing.event_name,
            event_date: listing.event_date,
        }
    }
}

/// `GET /api/speakers`
pub async fn list_speakers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SpeakerListingResponse>>> {
    let speakers = state.catalog.list_speakers().await?;
    Ok(Json(
        speakers
            .into_iter()
            .map(SpeakerListingResponse::from)
            .collect(),
    ))
}

/// `GET /api/speakers/{id}`
pub async fn get_speaker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SpeakerId>,
) -> ApiResult<Json<SpeakerListingResponse>> {
    let speaker = state.catalog.get_speaker(id).await?;
    Ok(Json(speaker.into()))
}

/// `POST /api/speakers`
pub async fn create_speaker(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakerRequest>,
) -> ApiResult<(StatusCode, Json<SpeakerResponse>)> {
    let speaker = state.catalog.create_speaker(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(speaker.into())))
}

/// `PUT /api/speakers/{id}`
pub async fn update_speaker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SpeakerId>,
    Json(req): Json<SpeakerRequest>,
) -> ApiResult<Json<SpeakerResponse>> {
    let speaker = state.catalog.update_speaker(id, req.try_into()?).await?;
    Ok(Json(speaker.into()))
}

/// `DELETE /api/speakers/{id}`
pub async fn delete_speaker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SpeakerId>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete_speaker(id).await?;
    Ok(MessageResponse::new("Speaker deleted successfully"))
}
