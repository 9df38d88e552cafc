//! Event↔Attendee registration endpoints.
//!
//! Registrations are addressed by their `{eventID, attendeeID}` pair, either
//! in the body (`/api/event_attendees`) or split between the path and the
//! body (`/api/attendees/{id}/register`).

use super::{ApiResult, AppState, MessageResponse};
use crate::domain::entities::RegistrationDetail;
use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registration joined with its event and attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Event ID.
    #[serde(rename = "eventID")]
    pub event_id: EventId,
    /// Event name.
    pub event_name: String,
    /// Event date.
    pub event_date: NaiveDate,
    /// Attendee ID.
    #[serde(rename = "attendeeID")]
    pub attendee_id: AttendeeId,
    /// Attendee given name.
    pub first_name: String,
    /// Attendee family name.
    pub last_name: String,
    /// Attendee display name.
    pub attendee_name: String,
    /// Attendee email.
    pub email: String,
}

impl From<RegistrationDetail> for RegistrationResponse {
    fn from(detail: RegistrationDetail) -> Self {
        Self {
            attendee_name: detail.attendee_name(),
            event_id: detail.event_id,
            event_name: detail.event_name,
            event_date: detail.event_date,
            attendee_id: detail.attendee_id,
            first_name: detail.first_name,
            last_name: detail.last_name,
            email: detail.email,
        }
    }
}

/// Body of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The stored registration.
    pub registration: RegistrationResponse,
}

impl RegisteredResponse {
    fn created(detail: RegistrationDetail) -> (StatusCode, Json<Self>) {
        (
            StatusCode::CREATED,
            Json(Self {
                message: "Successfully registered attendee for event".to_string(),
                registration: detail.into(),
            }),
        )
    }
}

/// Reassignment body: the pair to move and where to move it.
#[derive(Debug, Clone, Deserialize)]
pub struct ReassignRequest {
    /// Registered pair.
    pub from: RegistrationKey,
    /// Replacement pair.
    pub to: RegistrationKey,
}

/// Registration listing filter; both sides optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationFilter {
    /// Only registrations for this event.
    #[serde(rename = "eventID")]
    pub event_id: Option<EventId>,
    /// Only registrations of this attendee.
    #[serde(rename = "attendeeID")]
    pub attendee_id: Option<AttendeeId>,
}

/// Body of the per-attendee register and unregister routes.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRef {
    /// Event to register for or leave.
    #[serde(rename = "eventID")]
    pub event_id: EventId,
}

/// `GET /api/event_attendees`
///
/// Accepts `?eventID=` and `?attendeeID=` filters; an unknown side is 404.
pub async fn list_registrations(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RegistrationFilter>,
) -> ApiResult<Json<Vec<RegistrationResponse>>> {
    let rows = match (filter.event_id, filter.attendee_id) {
        (Some(event_id), Some(attendee_id)) => {
            let key = RegistrationKey::new(event_id, attendee_id);
            state.registrations.list_for_pair(key).await?
        }
        (Some(event_id), None) => state.registrations.list_for_event(event_id).await?,
        (None, Some(attendee_id)) => state.registrations.list_for_attendee(attendee_id).await?,
        (None, None) => state.registrations.list().await?,
    };
    Ok(Json(
        rows.into_iter().map(RegistrationResponse::from).collect(),
    ))
}

/// `POST /api/event_attendees`
pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    Json(key): Json<RegistrationKey>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    let detail = state.registrations.register(key).await?;
    Ok(RegisteredResponse::created(detail))
}

/// `PUT /api/event_attendees`
pub async fn reassign_registration(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReassignRequest>,
) -> ApiResult<Json<RegisteredResponse>> {
    let detail = state.registrations.reassign(req.from, req.to).await?;
    Ok(Json(RegisteredResponse {
        message: "Successfully updated registration".to_string(),
        registration: detail.into(),
    }))
}

/// `DELETE /api/event_attendees`
pub async fn delete_registration(
    State(state): State<Arc<AppState>>,
    Json(key): Json<RegistrationKey>,
) -> ApiResult<Json<MessageResponse>> {
    state.registrations.unregister(key).await?;
    Ok(MessageResponse::new(
        "Successfully unregistered attendee from event",
    ))
}

/// `POST /api/attendees/{id}/register`
pub async fn register_attendee(
    State(state): State<Arc<AppState>>,
    Path(attendee_id): Path<AttendeeId>,
    Json(body): Json<EventRef>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    let key = RegistrationKey::new(body.event_id, attendee_id);
    let detail = state.registrations.register(key).await?;
    Ok(RegisteredResponse::created(detail))
}

/// `DELETE /api/attendees/{id}/unregister`
pub async fn unregister_attendee(
    State(state): State<Arc<AppState>>,
    Path(attendee_id): Path<AttendeeId>,
    Json(body): Json<EventRef>,
) -> ApiResult<Json<MessageResponse>> {
    let key = RegistrationKey::new(body.event_id, attendee_id);
    state.registrations.unregister(key).await?;
    Ok(MessageResponse::new("Successfully unregistered from event"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_wire_names() {
        let detail = RegistrationDetail {
            event_id: EventId::new(1),
            event_name: "Launch Party".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            attendee_id: AttendeeId::new(7),
            first_name: "A.".to_string(),
            last_name: "Lee".to_string(),
            email: "lee@example.com".to_string(),
        };
        let json = serde_json::to_value(RegistrationResponse::from(detail)).unwrap();

        assert_eq!(json["eventID"], 1);
        assert_eq!(json["attendeeID"], 7);
        assert_eq!(json["eventName"], "Launch Party");
        assert_eq!(json["attendeeName"], "A. Lee");
        assert_eq!(json["eventDate"], "2025-06-01");
    }

    #[test]
    fn reassign_body_parses_both_pairs() {
        let req: ReassignRequest = serde_json::from_str(
            r#"{"from":{"eventID":1,"attendeeID":7},"to":{"eventID":2,"attendeeID":7}}"#,
        )
        .unwrap();
        assert_eq!(req.from, RegistrationKey::new(EventId::new(1), AttendeeId::new(7)));
        assert_eq!(req.to.event_id, EventId::new(2));
    }
}
