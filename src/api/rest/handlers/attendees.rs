//! Attendee endpoints.

use super::{ApiResult, AppState, MessageResponse};
use crate::application::error::ApplicationError;
use crate::application::services::AttendeeDetail;
use crate::domain::entities::{Attendee, AttendeeDetails, RegistrationDetail};
use crate::domain::value_objects::{AttendeeId, EventId};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Attendee create/update body.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendeeRequest {
    /// Given name.
    #[serde(rename = "fName")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lName")]
    pub last_name: String,
    /// Email address.
    pub email: String,
}

impl TryFrom<AttendeeRequest> for AttendeeDetails {
    type Error = ApplicationError;

    fn try_from(req: AttendeeRequest) -> Result<Self, Self::Error> {
        Ok(Self::new(&req.first_name, &req.last_name, &req.email)?)
    }
}

/// Attendee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeResponse {
    /// Attendee ID.
    #[serde(rename = "attendeeID")]
    pub attendee_id: AttendeeId,
    /// Given name.
    #[serde(rename = "fName")]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lName")]
    pub last_name: String,
    /// Email address.
    pub email: String,
}

impl From<Attendee> for AttendeeResponse {
    fn from(attendee: Attendee) -> Self {
        Self {
            attendee_id: attendee.id,
            first_name: attendee.details.first_name().to_string(),
            last_name: attendee.details.last_name().to_string(),
            email: attendee.details.email().to_string(),
        }
    }
}

/// An event an attendee is registered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeEventResponse {
    /// Event ID.
    #[serde(rename = "eventID")]
    pub event_id: EventId,
    /// Event name.
    pub event_name: String,
    /// Event date.
    pub event_date: NaiveDate,
}

impl From<RegistrationDetail> for AttendeeEventResponse {
    fn from(detail: RegistrationDetail) -> Self {
        Self {
            event_id: detail.event_id,
            event_name: detail.event_name,
            event_date: detail.event_date,
        }
    }
}

/// Attendee with its events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeDetailResponse {
    /// Attendee fields.
    #[serde(flatten)]
    pub attendee: AttendeeResponse,
    /// Registered events.
    pub events: Vec<AttendeeEventResponse>,
}

impl From<AttendeeDetail> for AttendeeDetailResponse {
    fn from(detail: AttendeeDetail) -> Self {
        Self {
            attendee: detail.attendee.into(),
            events: detail
                .registrations
                .into_iter()
                .map(AttendeeEventResponse::from)
                .collect(),
        }
    }
}

/// `GET /api/attendees`
pub async fn list_attendees(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AttendeeResponse>>> {
    let attendees = state.catalog.list_attendees().await?;
    Ok(Json(
        attendees.into_iter().map(AttendeeResponse::from).collect(),
    ))
}

/// `GET /api/attendees/{id}`
pub async fn get_attendee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AttendeeId>,
) -> ApiResult<Json<AttendeeDetailResponse>> {
    let detail = state.catalog.get_attendee(id).await?;
    Ok(Json(detail.into()))
}

/// `POST /api/attendees`
pub async fn create_attendee(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AttendeeRequest>,
) -> ApiResult<(StatusCode, Json<AttendeeResponse>)> {
    let attendee = state.catalog.create_attendee(req.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(attendee.into())))
}

/// `PUT /api/attendees/{id}`
pub async fn update_attendee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AttendeeId>,
    Json(req): Json<AttendeeRequest>,
) -> ApiResult<Json<AttendeeResponse>> {
    let attendee = state.catalog.update_attendee(id, req.try_into()?).await?;
    Ok(Json(attendee.into()))
}

/// `DELETE /api/attendees/{id}`
pub async fn delete_attendee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AttendeeId>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog.delete_attendee(id).await?;
    Ok(MessageResponse::new("Attendee deleted successfully"))
}
